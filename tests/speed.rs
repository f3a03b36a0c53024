mod tests {
    use wheel_light::fixed::EWMA_SHIFT;
    use wheel_light::{Duration, Mode, SpeedEstimator, WheelConfig};

    const CONFIG: WheelConfig = WheelConfig::DEFAULT;

    /// Estimator that has seen one capture at `timestamp`
    fn armed(timestamp: u16) -> SpeedEstimator {
        let mut speed = SpeedEstimator::new(&CONFIG);
        assert_eq!(speed.on_capture(timestamp), Some(Mode::Active));
        speed
    }

    #[test]
    fn test_starts_idle() {
        let speed = SpeedEstimator::new(&CONFIG);
        assert_eq!(speed.mode(), Mode::Idle);
        assert_eq!(speed.speed(), 0);
        assert_eq!(speed.last_capture(), None);
    }

    #[test]
    fn test_instantaneous_speed() {
        let speed = SpeedEstimator::new(&CONFIG);
        // 2136 mm * 15625 Hz / 300 ticks
        assert_eq!(speed.instantaneous_speed(300), 111_250);
        assert_eq!(speed.instantaneous_speed(0), 2136 * 15625);
    }

    #[test]
    fn test_first_capture_only_arms() {
        let speed = armed(1234);
        assert_eq!(speed.mode(), Mode::Active);
        assert_eq!(speed.last_capture(), Some(1234));
        assert_eq!(speed.speed(), 0);
    }

    #[test]
    fn test_converges_monotonically() {
        const PERIOD: u16 = 4000;
        let mut speed = armed(0);
        let target = speed.instantaneous_speed(u32::from(PERIOD));

        let mut previous = speed.speed();
        for n in 1..=300u16 {
            speed.on_capture(n.wrapping_mul(PERIOD));
            let current = speed.speed();
            assert!(current >= previous, "capture {n}: {current} < {previous}");
            assert!(current <= target);
            previous = current;

            if n == 16 {
                assert!(current > target / 2, "{current} after 16 captures");
            }
        }
        assert!(target - speed.speed() < 1 << EWMA_SHIFT);
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut speed = armed(1000);
        speed.on_capture(5000);
        let accepted = speed.speed();
        assert!(accepted > 0);

        for bounce in [5001, 5050, 5000 + CONFIG.debounce_ticks - 1] {
            assert_eq!(speed.on_capture(bounce), None);
            assert_eq!(speed.last_capture(), Some(5000));
            assert_eq!(speed.speed(), accepted);
        }

        speed.on_capture(5000 + CONFIG.debounce_ticks);
        assert_eq!(speed.last_capture(), Some(5000 + CONFIG.debounce_ticks));
    }

    #[test]
    fn test_bounce_across_counter_wrap() {
        let mut speed = armed(u16::MAX - 10);
        assert_eq!(speed.on_capture(20), None);
        assert_eq!(speed.last_capture(), Some(u16::MAX - 10));
    }

    #[test]
    fn test_period_longer_than_counter_wrap() {
        const PERIOD: u32 = 70_000;
        const LOOP_TICKS: u32 = 300;
        let config = WheelConfig {
            idle_timeout: Duration::from_secs(10),
            ..CONFIG
        };
        let mut speed = SpeedEstimator::new(&config);
        speed.on_capture(0);
        let target = speed.instantaneous_speed(PERIOD);
        assert_eq!(target, 476);

        let mut now = 0u32;
        let mut next_capture = PERIOD;
        let mut captures = 0;
        while captures < 100 {
            now += LOOP_TICKS;
            if now >= next_capture {
                #[allow(clippy::cast_possible_truncation)]
                speed.on_capture(next_capture as u16);
                next_capture += PERIOD;
                captures += 1;
                assert!(speed.speed() <= target, "{} mm/s", speed.speed());
            }
            if now % (1 << 16) < LOOP_TICKS {
                speed.on_overflow();
            }
            speed.elapse(LOOP_TICKS);
        }

        assert_eq!(speed.mode(), Mode::Active);
        assert!(target - speed.speed() < 1 << EWMA_SHIFT);
    }

    #[test]
    fn test_missing_wraps_are_restored() {
        let mut speed = armed(1000);
        speed.elapse(3 * 65_536 + 400);
        speed.on_capture(1500);
        let expected = speed.instantaneous_speed(3 * 65_536 + 500) >> EWMA_SHIFT;
        assert_eq!(speed.speed(), expected);
    }

    #[test]
    fn test_goes_idle_exactly_once() {
        let mut speed = armed(0);
        speed.on_capture(4000);
        speed.on_capture(8000);
        assert!(speed.speed() > 0);

        // captures happened during this counter period
        assert_eq!(speed.on_overflow(), None);
        speed.elapse(CONFIG.idle_timeout_ticks() + 1);

        assert_eq!(speed.on_overflow(), Some(Mode::Idle));
        assert_eq!(speed.mode(), Mode::Idle);
        assert_eq!(speed.speed(), 0);

        speed.elapse(100_000);
        assert_eq!(speed.on_overflow(), None);
        assert_eq!(speed.on_overflow(), None);
        assert_eq!(speed.mode(), Mode::Idle);
    }

    #[test]
    fn test_stays_active_before_timeout() {
        let mut speed = armed(0);
        speed.on_capture(4000);
        assert_eq!(speed.on_overflow(), None);
        speed.elapse(CONFIG.idle_timeout_ticks());
        assert_eq!(speed.on_overflow(), None);
        assert_eq!(speed.mode(), Mode::Active);
    }

    #[test]
    fn test_capture_resets_idle_time() {
        let mut speed = armed(0);
        speed.elapse(50_000);
        speed.on_capture(40_000);
        assert_eq!(speed.ticks_since_capture(), 0);
    }

    #[test]
    fn test_wakes_up_without_stale_speed() {
        let mut speed = armed(0);
        speed.on_capture(4000);
        speed.on_overflow();
        speed.elapse(70_000);
        assert_eq!(speed.on_overflow(), Some(Mode::Idle));

        // the period to the old capture is meaningless after a stop
        assert_eq!(speed.on_capture(4010), Some(Mode::Active));
        assert_eq!(speed.speed(), 0);
        assert_eq!(speed.last_capture(), Some(4010));

        speed.on_capture(8010);
        assert!(speed.speed() > 0);
    }
}
