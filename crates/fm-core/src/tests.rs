//! Unit tests for fm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EmpireId, FleetId, ShipId, SystemId};
    use crate::ids::raw_system;

    #[test]
    fn index_roundtrip() {
        let id = FleetId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(FleetId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(ShipId(0) < ShipId(1));
        assert!(SystemId(100) > SystemId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(FleetId::INVALID.0, u32::MAX);
        assert_eq!(SystemId::INVALID.0, u32::MAX);
        assert_eq!(EmpireId::INVALID.0, u16::MAX);
    }

    #[test]
    fn empire_id_rejects_oversized_index() {
        assert!(EmpireId::try_from(70_000usize).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(SystemId(7).to_string(), "SystemId(7)");
    }

    #[test]
    fn raw_system_encodes_none_as_invalid() {
        assert_eq!(raw_system(Some(SystemId(3))), 3);
        assert_eq!(raw_system(None), u32::MAX);
    }
}

#[cfg(test)]
mod geo {
    use crate::Point;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn step_toward_moves_along_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let p = a.step_toward(b, 10.0, 4.0);
        assert!((p.x - 4.0).abs() < 1e-12);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn step_toward_zero_distance_is_noop() {
        let a = Point::new(1.0, 1.0);
        assert_eq!(a.step_toward(a, 0.0, 5.0), a);
    }

    #[test]
    fn vector_ops() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 5.0);
        assert_eq!(b - a, Point::new(2.0, 3.0));
        assert_eq!(a + b, Point::new(4.0, 7.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
    }
}

#[cfg(test)]
mod time {
    use crate::{Turn, TurnClock};

    #[test]
    fn turn_arithmetic() {
        let t = Turn(10);
        assert_eq!(t + 5, Turn(15));
        assert_eq!(t.offset(3), Turn(13));
        assert_eq!(Turn(15).since(Turn(10)), 5);
        assert_eq!(Turn(5).since(Turn(10)), 0);
    }

    #[test]
    fn clock_advances() {
        let mut clock = TurnClock::new();
        assert_eq!(clock.current, Turn::ZERO);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current, Turn(2));
        assert_eq!(TurnClock::starting_at(Turn(9)).current, Turn(9));
    }
}

#[cfg(test)]
mod config {
    use crate::{MovementRules, SimConfig, Turn};

    #[test]
    fn defaults_are_valid() {
        assert!(SimConfig::default().validate().is_ok());
        let rules = MovementRules::default();
        assert_eq!(rules.epsilon, 0.1);
        assert_eq!(rules.max_ship_speed, 500.0);
        assert_eq!(rules.horizon_turns, 200);
    }

    #[test]
    fn rejects_non_positive_epsilon() {
        let rules = MovementRules { epsilon: 0.0, ..MovementRules::default() };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn rejects_zero_horizon() {
        let rules = MovementRules { horizon_turns: 0, ..MovementRules::default() };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn snapshot_interval() {
        let cfg = SimConfig { output_interval_turns: 5, ..SimConfig::default() };
        assert!(cfg.snapshot_due(Turn(0)));
        assert!(!cfg.snapshot_due(Turn(3)));
        assert!(cfg.snapshot_due(Turn(10)));

        let off = SimConfig { output_interval_turns: 0, ..SimConfig::default() };
        assert!(!off.snapshot_due(Turn(0)));
    }
}
