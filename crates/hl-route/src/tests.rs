//! Unit tests for hl-route.
//!
//! Maps are hand-crafted per scenario.  Stores write their snapshots into
//! temp directories; tests that need no dynamic links search over
//! `LinkSet::empty()` directly.

mod helpers {
    use std::sync::Arc;

    use tempfile::TempDir;

    use hl_core::{METRES_PER_LY, Position, SystemId};
    use hl_links::LinkStore;
    use hl_map::{Starmap, StarmapBuilder};

    pub fn at_ly(x: f64) -> Position {
        Position::new(x * METRES_PER_LY, 0.0, 0.0)
    }

    /// The reference scenario map.
    ///
    /// Chain gates: Ayra — Bex — Cask — Dal, with Ayra (sec 0.2) and Dal
    /// (sec 0.1) jump-capable and 5 ly apart; Bex and Cask are high-sec.
    /// `Iso` is a fifth system with no gates at all.
    pub fn chain_map() -> (Arc<Starmap>, [SystemId; 5]) {
        let mut b = StarmapBuilder::new();
        let a = b.add_system("Ayra", at_ly(0.0), 0.2, 1);
        let bx = b.add_system("Bex", at_ly(2.0), 0.8, 1);
        let c = b.add_system("Cask", at_ly(4.0), 0.8, 1);
        let d = b.add_system("Dal", at_ly(5.0), 0.1, 2);
        let iso = b.add_system("Iso", at_ly(40.0), 0.3, 3);
        b.add_gate(a, bx);
        b.add_gate(bx, c);
        b.add_gate(c, d);
        (Arc::new(b.build()), [a, bx, c, d, iso])
    }

    pub fn store_over(map: &Arc<Starmap>) -> (LinkStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = LinkStore::open(Arc::clone(map), dir.path().join("links.json"));
        (store, dir)
    }
}

// ── Policies ─────────────────────────────────────────────────────────────────

mod policy {
    use crate::{JumpPolicy, RouteError};

    #[test]
    fn named_ranges() {
        assert_eq!(JumpPolicy::Disabled.max_range_ly(), None);
        assert_eq!(JumpPolicy::Titan.max_range_ly(), Some(6.0));
        assert_eq!(JumpPolicy::Blops.max_range_ly(), Some(8.0));
        // Combined policy takes the larger constant.
        assert_eq!(JumpPolicy::TitanOrBlops.max_range_ly(), Some(8.0));
        assert_eq!(JumpPolicy::Custom(3.5).max_range_ly(), Some(3.5));
    }

    #[test]
    fn parse_round_trip() {
        assert_eq!("none".parse::<JumpPolicy>().unwrap(), JumpPolicy::Disabled);
        assert_eq!("titan".parse::<JumpPolicy>().unwrap(), JumpPolicy::Titan);
        assert_eq!("blops".parse::<JumpPolicy>().unwrap(), JumpPolicy::Blops);
        assert_eq!(
            "titan-or-blops".parse::<JumpPolicy>().unwrap(),
            JumpPolicy::TitanOrBlops
        );
        assert!(matches!(
            "warp".parse::<JumpPolicy>(),
            Err(RouteError::InvalidPolicy(_))
        ));
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

mod validation {
    use hl_links::LinkSet;

    use super::helpers::chain_map;
    use crate::{JumpPolicy, RouteError, find_route_over};

    #[test]
    fn unknown_start_system() {
        let (map, _) = chain_map();
        let err = find_route_over(&map, &LinkSet::empty(), "Ghost", "Ayra", JumpPolicy::Disabled, 3)
            .unwrap_err();
        assert!(matches!(err, RouteError::UnknownSystem(name) if name == "Ghost"));
    }

    #[test]
    fn unknown_end_system() {
        let (map, _) = chain_map();
        let err = find_route_over(&map, &LinkSet::empty(), "Ayra", "Ghost", JumpPolicy::Disabled, 3)
            .unwrap_err();
        assert!(matches!(err, RouteError::UnknownSystem(name) if name == "Ghost"));
    }

    #[test]
    fn isolated_endpoint_is_disconnected() {
        let (map, _) = chain_map();
        for (start, end) in [("Iso", "Ayra"), ("Ayra", "Iso")] {
            let err =
                find_route_over(&map, &LinkSet::empty(), start, end, JumpPolicy::Titan, 3)
                    .unwrap_err();
            assert!(matches!(err, RouteError::Disconnected(name) if name == "Iso"));
        }
    }

    #[test]
    fn dynamic_link_lifts_isolation() {
        let (map, _) = chain_map();
        let (store, _dir) = super::helpers::store_over(&map);
        store
            .assert_local("Iso", "Ayra", hl_links::LinkMetadata::default())
            .unwrap();

        let snapshot = store.current();
        let route =
            find_route_over(&map, &snapshot, "Iso", "Dal", JumpPolicy::Disabled, 0).unwrap();
        assert_eq!(route.total_hops(), 4); // Iso ~ Ayra – Bex – Cask – Dal
    }
}

// ── Search ───────────────────────────────────────────────────────────────────

mod search {
    use hl_links::LinkSet;

    use super::helpers::{at_ly, chain_map};
    use crate::{JumpPolicy, Route, RouteError, RouteStep, find_route_over};

    fn names(route: &Route) -> Vec<&str> {
        route.steps.iter().map(RouteStep::system).collect()
    }

    #[test]
    fn disabled_policy_takes_the_shortest_gate_path() {
        let (map, _) = chain_map();
        let route =
            find_route_over(&map, &LinkSet::empty(), "Ayra", "Dal", JumpPolicy::Disabled, 3)
                .unwrap();
        assert_eq!(names(&route), vec!["Ayra", "Bex", "Cask", "Dal"]);
        assert_eq!(route.total_hops(), 3);
        assert!(!route.used_jump());
    }

    #[test]
    fn one_hop_jump_beats_three_gate_hops() {
        // Lexicographic cost: (1, 1) < (3, 0) because hops dominate.
        let (map, _) = chain_map();
        let route = find_route_over(&map, &LinkSet::empty(), "Ayra", "Dal", JumpPolicy::Titan, 1)
            .unwrap();
        assert_eq!(route.steps.len(), 2);
        assert!(matches!(&route.steps[1], RouteStep::Jump { system } if system == "Dal"));
        assert_eq!(route.jumps_used(), 1);
    }

    #[test]
    fn zero_budget_never_jumps() {
        let (map, _) = chain_map();
        let route = find_route_over(&map, &LinkSet::empty(), "Ayra", "Dal", JumpPolicy::Titan, 0)
            .unwrap();
        assert!(!route.used_jump());
        assert_eq!(route.total_hops(), 3);
    }

    #[test]
    fn equal_hops_prefer_fewer_jumps() {
        // Two jump-capable systems 3 ly apart that are *also* gated: the gate
        // route and the jump route both cost one hop, so the gate wins the
        // tie on the jump component.
        let mut b = hl_map::StarmapBuilder::new();
        let e = b.add_system("Esk", at_ly(0.0), 0.1, 1);
        let f = b.add_system("Fel", at_ly(3.0), 0.1, 1);
        b.add_gate(e, f);
        let map = b.build();

        let route =
            find_route_over(&map, &LinkSet::empty(), "Esk", "Fel", JumpPolicy::Titan, 3).unwrap();
        assert_eq!(route.total_hops(), 1);
        assert!(matches!(&route.steps[1], RouteStep::Gate { .. }));
    }

    #[test]
    fn start_equals_end_is_a_bare_start_step() {
        let (map, _) = chain_map();
        let route =
            find_route_over(&map, &LinkSet::empty(), "Bex", "Bex", JumpPolicy::Disabled, 3)
                .unwrap();
        assert_eq!(route.steps.len(), 1);
        assert!(matches!(&route.steps[0], RouteStep::Start { system } if system == "Bex"));
        assert_eq!(route.total_hops(), 0);
    }

    #[test]
    fn range_gates_which_policies_reach() {
        // Two jump-capable systems 7 ly apart, each with a pad gate so the
        // isolation check passes; no gate path between the halves.
        let mut b = hl_map::StarmapBuilder::new();
        let g1 = b.add_system("Gyr", at_ly(0.0), 0.0, 1);
        let p1 = b.add_system("Gyr-Pad", at_ly(0.5), 0.0, 1);
        let g2 = b.add_system("Hux", at_ly(7.0), 0.0, 2);
        let p2 = b.add_system("Hux-Pad", at_ly(7.5), 0.0, 2);
        b.add_gate(g1, p1);
        b.add_gate(g2, p2);
        let map = b.build();

        // 7 ly exceeds titan range (6) but not blops (8).
        assert!(matches!(
            find_route_over(&map, &LinkSet::empty(), "Gyr", "Hux", JumpPolicy::Titan, 3),
            Err(RouteError::NoRoute { .. })
        ));
        for policy in [
            JumpPolicy::Blops,
            JumpPolicy::TitanOrBlops,
            JumpPolicy::Custom(7.5),
        ] {
            let route =
                find_route_over(&map, &LinkSet::empty(), "Gyr", "Hux", policy, 3).unwrap();
            assert_eq!(route.total_hops(), 1);
            assert_eq!(route.jumps_used(), 1);
        }
    }

    #[test]
    fn budget_limits_a_two_jump_chain() {
        // X(0) → Y(5) → Z(10): each hop within titan range, the full span is
        // not.  Pads keep the endpoints connected.
        let mut b = hl_map::StarmapBuilder::new();
        let x = b.add_system("Xel", at_ly(0.0), 0.0, 1);
        let y = b.add_system("Yor", at_ly(5.0), 0.0, 1);
        let z = b.add_system("Zan", at_ly(10.0), 0.0, 1);
        let px = b.add_system("Xel-Pad", at_ly(0.5), 0.9, 1);
        let pz = b.add_system("Zan-Pad", at_ly(9.5), 0.9, 1);
        b.add_gate(x, px);
        b.add_gate(z, pz);
        let map = b.build();
        let _ = y;

        let route =
            find_route_over(&map, &LinkSet::empty(), "Xel", "Zan", JumpPolicy::Titan, 2).unwrap();
        assert_eq!(names(&route), vec!["Xel", "Yor", "Zan"]);
        assert_eq!(route.jumps_used(), 2);

        assert!(matches!(
            find_route_over(&map, &LinkSet::empty(), "Xel", "Zan", JumpPolicy::Titan, 1),
            Err(RouteError::NoRoute { .. })
        ));
    }

    #[test]
    fn same_system_revisited_with_different_budget() {
        // S and A are gated *and* within jump range; G is one more jump from
        // A.  Both 2-hop routes exist: gate-then-jump (1 jump) and
        // jump-then-jump (2 jumps).  The search must keep (A, 0) and (A, 1)
        // as distinct states and return the 1-jump variant.
        let mut b = hl_map::StarmapBuilder::new();
        let s = b.add_system("Sor", at_ly(0.0), 0.1, 1);
        let a = b.add_system("Ank", at_ly(5.0), 0.1, 1);
        let g = b.add_system("Gol", at_ly(10.0), 0.1, 1);
        let pad = b.add_system("Gol-Pad", at_ly(10.5), 0.9, 1);
        b.add_gate(s, a);
        b.add_gate(g, pad);
        let map = b.build();

        let route =
            find_route_over(&map, &LinkSet::empty(), "Sor", "Gol", JumpPolicy::Titan, 2).unwrap();
        assert_eq!(route.total_hops(), 2);
        assert_eq!(route.jumps_used(), 1);
        assert!(matches!(&route.steps[1], RouteStep::Gate { .. }));
        assert!(matches!(&route.steps[2], RouteStep::Jump { .. }));
    }
}

// ── Dynamic links in routes ───────────────────────────────────────────────────

mod dynamic {
    use std::sync::Arc;

    use hl_links::LinkMetadata;

    use super::helpers::{chain_map, store_over};
    use crate::{JumpPolicy, RouteEngine, RouteStep};

    #[test]
    fn wormhole_shortcut_carries_metadata_and_retract_restores_gates() {
        let (map, _) = chain_map();
        let (store, _dir) = store_over(&map);
        let store = Arc::new(store);
        let engine = RouteEngine::new(Arc::clone(&map), Arc::clone(&store));

        store
            .assert_local("Ayra", "Dal", LinkMetadata {
                sig_a: Some("AAA-111".into()),
                link_type: Some("C5".into()),
                ..LinkMetadata::default()
            })
            .unwrap();

        let route = engine
            .find_route("Ayra", "Dal", JumpPolicy::Disabled, 3)
            .unwrap();
        assert_eq!(route.total_hops(), 1);
        match &route.steps[1] {
            RouteStep::Wormhole { system, link } => {
                assert_eq!(system, "Dal");
                assert_eq!(link.sig_a.as_deref(), Some("AAA-111"));
                assert_eq!(link.link_type.as_deref(), Some("C5"));
            }
            other => panic!("expected wormhole step, got {other:?}"),
        }

        // Retraction removes the edge; the 3-hop gate path is back.
        assert_eq!(store.retract_local("Ayra", "AAA-111"), 1);
        let route = engine
            .find_route("Ayra", "Dal", JumpPolicy::Disabled, 3)
            .unwrap();
        assert_eq!(route.total_hops(), 3);
        assert!(
            route
                .steps
                .iter()
                .all(|s| !matches!(s, RouteStep::Wormhole { .. }))
        );
    }

    #[test]
    fn gated_pair_is_tagged_wormhole_while_linked() {
        // A dynamic link over an existing gate pair: the traversal is tagged
        // with the link's metadata while the link lives.
        let (map, _) = chain_map();
        let (store, _dir) = store_over(&map);
        let store = Arc::new(store);
        let engine = RouteEngine::new(Arc::clone(&map), Arc::clone(&store));

        store
            .assert_local("Ayra", "Bex", LinkMetadata::default())
            .unwrap();
        let route = engine
            .find_route("Ayra", "Bex", JumpPolicy::Disabled, 3)
            .unwrap();
        assert_eq!(route.total_hops(), 1);
        assert!(matches!(&route.steps[1], RouteStep::Wormhole { .. }));
    }
}
