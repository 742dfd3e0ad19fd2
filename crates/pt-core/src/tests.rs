//! Unit tests for pt-core primitives.

#[cfg(test)]
mod ids {
    use crate::{GroupId, RouteId, StationId};

    #[test]
    fn index_roundtrip() {
        let id = StationId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(StationId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(RouteId(0) < RouteId(1));
        assert!(GroupId(100) > GroupId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(StationId::INVALID.0, u32::MAX);
        assert_eq!(RouteId::INVALID.0, u32::MAX);
        assert_eq!(StationId::default(), StationId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(StationId(7).to_string(), "StationId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, SimTime};

    #[test]
    fn offset_and_sub() {
        let t = SimTime(10.0);
        assert_eq!(t.offset(5.5), SimTime(15.5));
        assert_eq!(SimTime(15.0) - SimTime(10.0), 5.0);
        assert_eq!(t + 2.0, SimTime(12.0));
    }

    #[test]
    fn wall_includes_env_start() {
        let mut clock = SimClock::new(720); // window opens at noon
        assert_eq!(clock.wall(), 720.0);
        clock.advance_to(SimTime(30.0));
        assert_eq!(clock.wall(), 750.0);
        assert_eq!(clock.wall_at(SimTime(45.0)), 765.0);
    }

    #[test]
    fn config_horizon_wall() {
        let config = SimConfig { env_start: 420, horizon: 120.0, ..SimConfig::default() };
        assert_eq!(config.horizon_wall(), 540.0);
        assert_eq!(config.make_clock().env_start, 420);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn clock_rejects_backwards_jump() {
        let mut clock = SimClock::new(0);
        clock.advance_to(SimTime(10.0));
        clock.advance_to(SimTime(5.0));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(99);
        let mut b = SimRng::new(99);
        for _ in 0..32 {
            assert_eq!(a.gen_range(0..1_000_000u32), b.gen_range(0..1_000_000u32));
        }
    }

    #[test]
    fn choose_on_empty_is_none() {
        let mut rng = SimRng::new(1);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[7u8]), Some(&7));
    }
}
