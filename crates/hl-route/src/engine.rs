//! The route engine — priority search over the composite graph.
//!
//! # State space
//!
//! The search runs over `(system, jumps_used)` states, not bare systems: the
//! same system may be worth revisiting with a different amount of jump budget
//! spent, so all bookkeeping (best cost, predecessor) is keyed on the full
//! state.
//!
//! # Cost model
//!
//! A state's cost is the pair `(hops, jumps_used)` compared lexicographically:
//! total hop count dominates, and among equal hop counts fewer jumps wins.
//! Gates and dynamic links cost `(1, 0)`; a jump costs `(1, 1)`.  Because the
//! min-heap pops costs in non-decreasing order, the first time the goal
//! system is popped its path is optimal and is returned immediately.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use hl_core::SystemId;
use hl_links::{LinkSet, LinkStore};
use hl_map::Starmap;

use crate::error::RouteError;
use crate::policy::JumpPolicy;
use crate::step::{Route, RouteStep};

/// A search state: where we are and how much jump budget is spent.
type State = (SystemId, u32);

#[derive(Copy, Clone)]
enum StepKind {
    Gate,
    Wormhole,
    Jump,
}

// ── RouteEngine ───────────────────────────────────────────────────────────────

/// Shared route engine: an immutable starmap plus the live link store.
///
/// `find_route` takes one link snapshot per query and searches lock-free
/// against it, so concurrent queries never block the feed refresher (nor
/// each other).  Two queries overlapping a reconciliation may legitimately
/// observe different link sets.
pub struct RouteEngine {
    map: Arc<Starmap>,
    links: Arc<LinkStore>,
}

impl RouteEngine {
    pub fn new(map: Arc<Starmap>, links: Arc<LinkStore>) -> Self {
        Self { map, links }
    }

    /// Compute the best route from `start` to `end` under `policy`, using at
    /// most `max_jumps` jumps.
    pub fn find_route(
        &self,
        start: &str,
        end: &str,
        policy: JumpPolicy,
        max_jumps: u32,
    ) -> Result<Route, RouteError> {
        let snapshot = self.links.current();
        find_route_over(&self.map, &snapshot, start, end, policy, max_jumps)
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Route over an explicit link snapshot.  [`RouteEngine::find_route`] is the
/// usual entry point; this form exists so callers holding a snapshot (or
/// tests) can search without a store.
pub fn find_route_over(
    map: &Starmap,
    links: &LinkSet,
    start: &str,
    end: &str,
    policy: JumpPolicy,
    max_jumps: u32,
) -> Result<Route, RouteError> {
    let from = map
        .system_id(start)
        .ok_or_else(|| RouteError::UnknownSystem(start.to_string()))?;
    let to = map
        .system_id(end)
        .ok_or_else(|| RouteError::UnknownSystem(end.to_string()))?;

    // Pure isolation check, independent of reachability between the two.
    for (name, id) in [(start, from), (end, to)] {
        if map.gate_degree(id) + links.degree(id) == 0 {
            return Err(RouteError::Disconnected(name.to_string()));
        }
    }

    search(map, links, from, to, policy, max_jumps).ok_or_else(|| RouteError::NoRoute {
        from: start.to_string(),
        to: end.to_string(),
    })
}

fn search(
    map: &Starmap,
    links: &LinkSet,
    from: SystemId,
    to: SystemId,
    policy: JumpPolicy,
    max_jumps: u32,
) -> Option<Route> {
    let jump_range = policy.max_range_ly();

    // best[state] = fewest hops known for that state.  Within one state the
    // jump component of the cost is fixed, so hops alone orders it.
    let mut best: FxHashMap<State, u32> = FxHashMap::default();
    // prev[state] = (predecessor state, how the step was made).
    let mut prev: FxHashMap<State, (State, StepKind)> = FxHashMap::default();

    // Min-heap over (hops, jumps_used, system).  Reverse makes BinaryHeap
    // (max) behave as min-heap; the system ID gives deterministic tie-breaks.
    let mut heap: BinaryHeap<Reverse<(u32, u32, SystemId)>> = BinaryHeap::new();

    best.insert((from, 0), 0);
    heap.push(Reverse((0, 0, from)));

    while let Some(Reverse((hops, jumps, sys))) = heap.pop() {
        let state = (sys, jumps);

        // Skip stale heap entries.
        if hops > best.get(&state).copied().unwrap_or(u32::MAX) {
            continue;
        }

        if sys == to {
            return Some(reconstruct(map, links, &prev, state, from));
        }

        let mut relax = |next: State, kind: StepKind| {
            let new_hops = hops + 1;
            if new_hops < best.get(&next).copied().unwrap_or(u32::MAX) {
                best.insert(next, new_hops);
                prev.insert(next, (state, kind));
                heap.push(Reverse((new_hops, next.1, next.0)));
            }
        };

        // Composite neighbors: a pair that is currently a dynamic link is
        // tagged as such even if a gate also connects it.
        for n in map.gate_neighbors(sys) {
            let kind = if links.link_between(sys, n).is_some() {
                StepKind::Wormhole
            } else {
                StepKind::Gate
            };
            relax((n, jumps), kind);
        }
        for &n in links.neighbors(sys) {
            relax((n, jumps), StepKind::Wormhole);
        }

        // Jump branch: only from jump-capable systems, only while budget
        // remains, only to jump-capable systems within policy range.
        if let Some(range) = jump_range
            && jumps < max_jumps
            && map.is_jump_capable(sys)
        {
            for t in map.jump_candidates_within(sys, range) {
                relax((t, jumps + 1), StepKind::Jump);
            }
        }
    }

    None
}

fn reconstruct(
    map: &Starmap,
    links: &LinkSet,
    prev: &FxHashMap<State, (State, StepKind)>,
    goal: State,
    from: SystemId,
) -> Route {
    let mut steps = Vec::new();
    let mut cur = goal;

    while let Some(&(parent, kind)) = prev.get(&cur) {
        let system = map.name(cur.0).to_string();
        let step = match kind {
            StepKind::Jump => RouteStep::Jump { system },
            StepKind::Gate => RouteStep::Gate { system },
            StepKind::Wormhole => match links.link_between(parent.0, cur.0) {
                Some(link) => RouteStep::Wormhole { system, link: link.clone() },
                // Unreachable on a single snapshot; degrade to a gate step.
                None => RouteStep::Gate { system },
            },
        };
        steps.push(step);
        cur = parent;
    }

    steps.push(RouteStep::Start {
        system: map.name(from).to_string(),
    });
    steps.reverse();
    Route { steps }
}
