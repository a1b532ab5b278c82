//! Jump policies — which long-range jump mechanisms a query permits and the
//! resulting maximum range.

use std::str::FromStr;

use crate::error::RouteError;

/// Range of a titan bridge, light-years.
pub const TITAN_RANGE_LY: f64 = 6.0;
/// Range of a black-ops bridge, light-years.
pub const BLOPS_RANGE_LY: f64 = 8.0;

/// Default per-query jump budget when the caller supplies none.
pub const DEFAULT_MAX_JUMPS: u32 = 3;

/// Which jump mechanism(s) a route query may use.
///
/// Each named policy maps to a fixed range; `Custom` takes a caller-supplied
/// range; `TitanOrBlops` combines the two named policies, and the effective
/// range is the larger of the pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum JumpPolicy {
    /// Jumps disabled: no system is jump-capable, the search uses gates and
    /// dynamic links only.
    Disabled,
    Titan,
    Blops,
    TitanOrBlops,
    /// Generic policy with an explicit range in light-years.
    Custom(f64),
}

impl JumpPolicy {
    /// Maximum jump range in light-years, or `None` when jumping is disabled.
    pub fn max_range_ly(self) -> Option<f64> {
        match self {
            JumpPolicy::Disabled => None,
            JumpPolicy::Titan => Some(TITAN_RANGE_LY),
            JumpPolicy::Blops => Some(BLOPS_RANGE_LY),
            JumpPolicy::TitanOrBlops => Some(TITAN_RANGE_LY.max(BLOPS_RANGE_LY)),
            JumpPolicy::Custom(range) => Some(range),
        }
    }
}

impl FromStr for JumpPolicy {
    type Err = RouteError;

    /// Parse the policy names the front end speaks.  `Custom` has no name —
    /// callers construct it directly from a range parameter.
    fn from_str(s: &str) -> Result<Self, RouteError> {
        match s {
            "none" => Ok(JumpPolicy::Disabled),
            "titan" => Ok(JumpPolicy::Titan),
            "blops" => Ok(JumpPolicy::Blops),
            "titan-or-blops" => Ok(JumpPolicy::TitanOrBlops),
            other => Err(RouteError::InvalidPolicy(other.to_string())),
        }
    }
}
