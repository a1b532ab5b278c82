//! Unit tests for hl-core.

mod ids {
    use crate::SystemId;

    #[test]
    fn index_round_trip() {
        let id = SystemId(7);
        assert_eq!(id.index(), 7);
        assert_eq!(SystemId::try_from(7usize).unwrap(), id);
    }

    #[test]
    fn display_includes_type_name() {
        assert_eq!(SystemId(3).to_string(), "SystemId(3)");
    }
}

mod pos {
    use crate::{METRES_PER_LY, Position};

    #[test]
    fn distance_along_one_axis() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(6.0 * METRES_PER_LY, 0.0, 0.0);
        assert!((a.distance_ly(b) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Position::new(1.0e16, -2.0e16, 3.0e16);
        let b = Position::new(-4.0e16, 5.0e16, 0.5e16);
        assert_eq!(a.distance_ly(b), b.distance_ly(a));
    }

    #[test]
    fn pythagorean_triple() {
        // 3-4-5 triangle in light-years.
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0 * METRES_PER_LY, 4.0 * METRES_PER_LY, 0.0);
        assert!((a.distance_ly(b) - 5.0).abs() < 1e-9);
    }
}

mod pair {
    use crate::{PairKey, SystemId};

    #[test]
    fn canonical_ordering() {
        let k1 = PairKey::new(SystemId(2), SystemId(9));
        let k2 = PairKey::new(SystemId(9), SystemId(2));
        assert_eq!(k1, k2);
        assert_eq!(k1.low(), SystemId(2));
        assert_eq!(k1.high(), SystemId(9));
    }

    #[test]
    fn touches_either_endpoint() {
        let k = PairKey::new(SystemId(1), SystemId(4));
        assert!(k.touches(SystemId(1)));
        assert!(k.touches(SystemId(4)));
        assert!(!k.touches(SystemId(2)));
    }
}
