//! Typed route steps and the query result.

use hl_links::DynamicLink;

/// One step of a route.  The first step of every route is `Start`; each
/// following step names the system arrived at and how it was reached.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteStep {
    Start { system: String },
    /// Arrival via a permanent gate.
    Gate { system: String },
    /// Arrival via a dynamic link; carries the link's metadata.
    Wormhole { system: String, link: DynamicLink },
    /// Arrival via a long-range jump, consuming one unit of the budget.
    Jump { system: String },
}

impl RouteStep {
    /// The system this step arrives at (or starts from).
    pub fn system(&self) -> &str {
        match self {
            RouteStep::Start { system }
            | RouteStep::Gate { system }
            | RouteStep::Wormhole { system, .. }
            | RouteStep::Jump { system } => system,
        }
    }
}

/// The result of a route query: an ordered step sequence starting at `Start`.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub steps: Vec<RouteStep>,
}

impl Route {
    /// Total hop count — every step after `Start` costs one hop.
    pub fn total_hops(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// `true` if any step is a jump.
    pub fn used_jump(&self) -> bool {
        self.steps
            .iter()
            .any(|s| matches!(s, RouteStep::Jump { .. }))
    }

    /// Number of jump steps taken.
    pub fn jumps_used(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, RouteStep::Jump { .. }))
            .count()
    }
}
