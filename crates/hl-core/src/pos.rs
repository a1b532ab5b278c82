//! 3-D system positions and light-year distances.
//!
//! Source coordinates are stored in metres on the upstream data scale, where
//! a single axis value can exceed 1e17 — `f64` throughout.  Jump-range checks
//! convert to light-years via [`METRES_PER_LY`], matching the upstream dump's
//! unit convention.

/// Metres per light-year on the source coordinate scale.
pub const METRES_PER_LY: f64 = 9.4607e15;

/// A system's position in 3-D space, metres on the source scale.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other` in light-years.
    ///
    /// Axis deltas are scaled to light-years *before* squaring so the
    /// intermediate products stay far from `f64` overflow territory.
    pub fn distance_ly(self, other: Position) -> f64 {
        let dx = (self.x - other.x) / METRES_PER_LY;
        let dy = (self.y - other.y) / METRES_PER_LY;
        let dz = (self.z - other.z) / METRES_PER_LY;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Position expressed in light-years, for spatial-index keys.
    #[inline]
    pub fn to_ly(self) -> [f64; 3] {
        [
            self.x / METRES_PER_LY,
            self.y / METRES_PER_LY,
            self.z / METRES_PER_LY,
        ]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x, y, z] = self.to_ly();
        write!(f, "({x:.2}, {y:.2}, {z:.2}) ly")
    }
}
