//! Unit tests for lift-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CarId, PassengerId, TaskId};

    #[test]
    fn try_from_usize() {
        assert_eq!(CarId::try_from(3usize).unwrap(), CarId(3));
        assert_eq!(TaskId::try_from(9usize).unwrap(), TaskId(9));
    }

    #[test]
    fn try_from_overflow_fails() {
        assert!(CarId::try_from(70_000usize).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(CarId(2).to_string(), "CarId(2)");
        assert_eq!(PassengerId(17).to_string(), "PassengerId(17)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_display_and_order() {
        assert_eq!(Tick(10).to_string(), "T10");
        assert!(Tick::ZERO < Tick(1));
    }

    #[test]
    fn clock_advances_and_reports_seconds() {
        let mut clock = SimClock::new(0.5);
        for _ in 0..130 {
            clock.advance();
        }
        assert_eq!(clock.current_tick, Tick(130));
        assert!((clock.elapsed_secs() - 65.0).abs() < 1e-6);
        assert_eq!(clock.elapsed_ms(), (1, 5));
        assert_eq!(clock.to_string(), "T130 (01:05)");
    }
}

#[cfg(test)]
mod building {
    use crate::{FloorLayout, UniformFloors};

    fn tower() -> UniformFloors {
        UniformFloors::new(5, 3.0, 10.0)
    }

    #[test]
    fn floor_heights() {
        let b = tower();
        assert_eq!(b.floor_height(0), Some(10.0));
        assert_eq!(b.floor_height(4), Some(22.0));
        assert_eq!(b.floor_height(5), None);
        assert_eq!(b.floor_height(-1), None);
    }

    #[test]
    fn floor_for_height_bands() {
        let b = tower();
        assert_eq!(b.floor_for_height(10.0), Some(0));
        assert_eq!(b.floor_for_height(12.9), Some(0));
        assert_eq!(b.floor_for_height(13.0), Some(1));
        assert_eq!(b.floor_for_height(25.0), Some(4));
        assert_eq!(b.floor_for_height(9.9), None);
        assert_eq!(b.floor_for_height(25.1), None);
    }

    #[test]
    fn contains_floor() {
        let b = tower();
        assert!(b.contains_floor(0));
        assert!(b.contains_floor(4));
        assert!(!b.contains_floor(5));
        assert!(!b.contains_floor(-3));
    }
}

#[cfg(test)]
mod config {
    use crate::{Config, LiftError, parse_config};

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.cars.len(), 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = parse_config(
            r#"
            [sim]
            seed = 7

            [building]
            floor_count = 12

            [[cars]]
            per_floor_secs = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.sim.seed, 7);
        assert_eq!(cfg.sim.total_ticks, 18_000);
        assert_eq!(cfg.building.floor_count, 12);
        assert_eq!(cfg.cars.len(), 1);
        assert_eq!(cfg.cars[0].per_floor_secs, 2.5);
        assert_eq!(cfg.cars[0].capacity, 8);
    }

    #[test]
    fn door_travel_accounts_for_stick_out() {
        let cfg = Config::default();
        assert!((cfg.doors.travel() - 0.72).abs() < 1e-6);
    }

    #[test]
    fn validate_rejects_bad_settings() {
        let mut cfg = Config::default();
        cfg.cars.clear();
        assert!(matches!(cfg.validate(), Err(LiftError::Config(_))));

        let mut cfg = Config::default();
        cfg.building.floor_count = 1;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.doors.tolerance_percent = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.cars[1].start_floor = 8;
        assert!(matches!(cfg.validate(), Err(LiftError::FloorOutOfRange(8))));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = parse_config("[sim\nseed = 1").unwrap_err();
        assert!(matches!(err, LiftError::Parse(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = crate::load_config(std::path::Path::new("/nonexistent/lift.toml")).unwrap_err();
        assert!(matches!(err, LiftError::Io(_)));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..16 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn gen_range_stays_in_bounds() {
        let mut rng = SimRng::new(1);
        for _ in 0..100 {
            let f: i32 = rng.gen_range(0..8);
            assert!((0..8).contains(&f));
        }
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(3);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert!(rng.choose(&[1, 2, 3]).is_some());
    }
}
