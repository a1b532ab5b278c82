//! Static star-map representation and builder.
//!
//! # Data layout
//!
//! Gate adjacency uses **Compressed Sparse Row (CSR)** format.  Given a
//! `SystemId s`, its outgoing gate edges occupy the slice:
//!
//! ```text
//! gate_to[ sys_out_start[s] .. sys_out_start[s+1] ]
//! ```
//!
//! Gates are undirected in the source data; the builder stores each as two
//! directed edges so neighbor iteration is a contiguous memory scan.
//!
//! # Jump index
//!
//! An R-tree (via `rstar`) over the 3-D light-year positions of every
//! jump-capable system (security at or below [`JUMP_SECURITY_MAX`]).  Range
//! queries during route search return candidate jump targets without scanning
//! the full system table.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use hl_core::{Position, SystemId};

/// Maximum security value at which a system can originate or receive a jump.
///
/// Matches the upstream data's convention: low-security and null-security
/// space only.
pub const JUMP_SECURITY_MAX: f32 = 0.4;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry in the jump-candidate index: a 3-D light-year point with the
/// associated `SystemId`.
#[derive(Clone, Debug)]
struct JumpEntry {
    point: [f64; 3], // light-years
    id: SystemId,
}

impl RTreeObject for JumpEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for JumpEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── Starmap ───────────────────────────────────────────────────────────────────

/// Immutable star map: per-system attributes in SoA layout, CSR gate
/// adjacency, a name lookup table, and the jump-candidate R-tree.
///
/// Built once at startup via [`StarmapBuilder`] and never mutated; dynamic
/// links live in `hl-links` and are overlaid at query time.
#[derive(Debug)]
pub struct Starmap {
    // ── System data (indexed by SystemId) ─────────────────────────────────
    names: Vec<String>,
    positions: Vec<Position>,
    security: Vec<f32>,
    regions: Vec<u32>,

    // ── Lookup ────────────────────────────────────────────────────────────
    name_to_id: FxHashMap<String, SystemId>,

    // ── CSR gate adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `system_count + 1`.
    sys_out_start: Vec<u32>,
    /// Destination of each directed gate edge, sorted by source system.
    gate_to: Vec<SystemId>,

    // ── Jump index ────────────────────────────────────────────────────────
    jump_idx: RTree<JumpEntry>,
}

impl Starmap {
    /// Construct an empty map with no systems or gates.
    pub fn empty() -> Self {
        StarmapBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn system_count(&self) -> usize {
        self.names.len()
    }

    /// Number of *directed* gate edges (twice the undirected gate count).
    pub fn gate_count(&self) -> usize {
        self.gate_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    // ── System attributes ─────────────────────────────────────────────────

    /// Resolve a system name to its ID.  Names are matched exactly.
    pub fn system_id(&self, name: &str) -> Option<SystemId> {
        self.name_to_id.get(name).copied()
    }

    #[inline]
    pub fn name(&self, sys: SystemId) -> &str {
        &self.names[sys.index()]
    }

    #[inline]
    pub fn position(&self, sys: SystemId) -> Position {
        self.positions[sys.index()]
    }

    #[inline]
    pub fn security(&self, sys: SystemId) -> f32 {
        self.security[sys.index()]
    }

    #[inline]
    pub fn region(&self, sys: SystemId) -> u32 {
        self.regions[sys.index()]
    }

    /// `true` if `sys` may originate or receive a jump (security gate only;
    /// the active policy decides whether jumping is enabled at all).
    #[inline]
    pub fn is_jump_capable(&self, sys: SystemId) -> bool {
        self.security[sys.index()] <= JUMP_SECURITY_MAX
    }

    // ── Gate traversal ────────────────────────────────────────────────────

    /// Iterator over the systems reachable from `sys` by a single gate.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn gate_neighbors(&self, sys: SystemId) -> impl Iterator<Item = SystemId> + '_ {
        let start = self.sys_out_start[sys.index()] as usize;
        let end = self.sys_out_start[sys.index() + 1] as usize;
        self.gate_to[start..end].iter().copied()
    }

    /// Gate out-degree of `sys`.
    #[inline]
    pub fn gate_degree(&self, sys: SystemId) -> usize {
        let start = self.sys_out_start[sys.index()] as usize;
        let end = self.sys_out_start[sys.index() + 1] as usize;
        end - start
    }

    // ── Jump queries ──────────────────────────────────────────────────────

    /// All jump-capable systems within `range_ly` of `origin`, excluding
    /// `origin` itself.  `origin` need not be jump-capable.
    pub fn jump_candidates_within(&self, origin: SystemId, range_ly: f64) -> Vec<SystemId> {
        let center = self.positions[origin.index()].to_ly();
        self.jump_idx
            .locate_within_distance(center, range_ly * range_ly)
            .map(|e| e.id)
            .filter(|&id| id != origin)
            .collect()
    }
}

// ── StarmapBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Starmap`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts systems and undirected gates in any order.  `build()`
/// sorts edges by source system, constructs the CSR arrays, and bulk-loads
/// the jump-candidate R-tree.
///
/// # Example
///
/// ```
/// use hl_core::{METRES_PER_LY, Position};
/// use hl_map::StarmapBuilder;
///
/// let mut b = StarmapBuilder::new();
/// let a = b.add_system("Alpha", Position::new(0.0, 0.0, 0.0), 0.3, 1);
/// let c = b.add_system("Ceti", Position::new(2.0 * METRES_PER_LY, 0.0, 0.0), 0.9, 1);
/// b.add_gate(a, c);
/// let map = b.build();
/// assert_eq!(map.system_count(), 2);
/// assert_eq!(map.gate_count(), 2); // bidirectional
/// ```
pub struct StarmapBuilder {
    names: Vec<String>,
    positions: Vec<Position>,
    security: Vec<f32>,
    regions: Vec<u32>,
    raw_gates: Vec<(SystemId, SystemId)>,
}

impl StarmapBuilder {
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            positions: Vec::new(),
            security: Vec::new(),
            regions: Vec::new(),
            raw_gates: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of systems and undirected gates
    /// to reduce reallocations when bulk-loading from the CSV dumps.
    pub fn with_capacity(systems: usize, gates: usize) -> Self {
        Self {
            names: Vec::with_capacity(systems),
            positions: Vec::with_capacity(systems),
            security: Vec::with_capacity(systems),
            regions: Vec::with_capacity(systems),
            raw_gates: Vec::with_capacity(gates * 2),
        }
    }

    /// Add a system and return its `SystemId` (sequential from 0).
    ///
    /// Name uniqueness is the loader's responsibility; if two systems share
    /// a name, the later one wins the name lookup.
    pub fn add_system(
        &mut self,
        name: impl Into<String>,
        pos: Position,
        security: f32,
        region: u32,
    ) -> SystemId {
        let id = SystemId(self.names.len() as u32);
        self.names.push(name.into());
        self.positions.push(pos);
        self.security.push(security);
        self.regions.push(region);
        id
    }

    /// Add an undirected gate between `a` and `b` (stored as two directed
    /// edges).
    pub fn add_gate(&mut self, a: SystemId, b: SystemId) {
        self.raw_gates.push((a, b));
        self.raw_gates.push((b, a));
    }

    pub fn system_count(&self) -> usize {
        self.names.len()
    }

    /// Consume the builder and produce a [`Starmap`].
    ///
    /// Time complexity: O(E log E) for the edge sort + O(N log N) for the
    /// R-tree bulk load.
    pub fn build(self) -> Starmap {
        let system_count = self.names.len();
        let edge_count = self.raw_gates.len();

        // Sort edges by source system for CSR construction.
        let mut raw = self.raw_gates;
        raw.sort_unstable();

        let gate_to: Vec<SystemId> = raw.iter().map(|&(_, to)| to).collect();

        // Build CSR row pointer (sys_out_start).
        let mut sys_out_start = vec![0u32; system_count + 1];
        for &(from, _) in &raw {
            sys_out_start[from.index() + 1] += 1;
        }
        for i in 1..=system_count {
            sys_out_start[i] += sys_out_start[i - 1];
        }
        debug_assert_eq!(sys_out_start[system_count] as usize, edge_count);

        // Name lookup.
        let name_to_id: FxHashMap<String, SystemId> = self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), SystemId(i as u32)))
            .collect();

        // Bulk-load the jump index over jump-capable systems only.
        let entries: Vec<JumpEntry> = self
            .security
            .iter()
            .enumerate()
            .filter(|&(_, &sec)| sec <= JUMP_SECURITY_MAX)
            .map(|(i, _)| JumpEntry {
                point: self.positions[i].to_ly(),
                id: SystemId(i as u32),
            })
            .collect();
        let jump_idx = RTree::bulk_load(entries);

        Starmap {
            names: self.names,
            positions: self.positions,
            security: self.security,
            regions: self.regions,
            name_to_id,
            sys_out_start,
            gate_to,
            jump_idx,
        }
    }
}

impl Default for StarmapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
