mod tests {
    use wheel_light::fixed::{OFFSET_MODULUS, OFFSET_ONE, ScrollOffset};
    use wheel_light::{PositionIntegrator, WheelConfig};

    const CONFIG: WheelConfig = WheelConfig {
        led_pitch_um: 10_000,
        ..WheelConfig::DEFAULT
    };

    #[test]
    fn test_zero_speed_does_not_move() {
        let mut position = PositionIntegrator::new(&CONFIG);
        assert_eq!(position.advance(60_000, 0), ScrollOffset::ZERO);
    }

    #[test]
    fn test_distance_in_led_pitches() {
        let mut position = PositionIntegrator::new(&CONFIG);
        // 10 m/s for one second over a 10 mm pitch
        let offset = position.advance(CONFIG.tick_hz, 10_000);
        assert_eq!(offset.whole(), 1000);
        assert_eq!(offset.raw(), 1000 * OFFSET_ONE);
    }

    #[test]
    fn test_slow_speed_accumulates() {
        let mut position = PositionIntegrator::new(&CONFIG);
        // 1 mm/s, one tick at a time: each step alone is far below one unit
        for _ in 0..CONFIG.tick_hz {
            position.advance(1, 1);
        }
        // 1 mm = 0.1 LED = 25.6 units
        assert_eq!(position.offset().raw(), 25);
    }

    #[test]
    fn test_wraps_at_modulus() {
        let offset = ScrollOffset::from_raw(OFFSET_MODULUS - 10);
        assert_eq!(offset.wrapping_add(25).raw(), 15);
        assert_eq!(offset.wrapping_add(10).raw(), 0);
        assert_eq!(offset.wrapping_add(9).raw(), OFFSET_MODULUS - 1);
    }

    #[test]
    fn test_no_values_skipped_across_wrap() {
        let mut offset = ScrollOffset::from_raw(OFFSET_MODULUS - 3);
        let mut seen = Vec::new();
        for _ in 0..6 {
            offset = offset.wrapping_add(1);
            seen.push(offset.raw());
        }
        assert_eq!(
            seen,
            [
                OFFSET_MODULUS - 2,
                OFFSET_MODULUS - 1,
                0,
                1,
                2,
                3
            ]
        );
    }

    #[test]
    fn test_large_steps_stay_in_range() {
        let mut position = PositionIntegrator::new(&CONFIG);
        for _ in 0..100 {
            let offset = position.advance(u32::from(u16::MAX), u32::MAX);
            assert!(offset.raw() < OFFSET_MODULUS);
        }
    }

    #[test]
    fn test_reset() {
        let mut position = PositionIntegrator::new(&CONFIG);
        position.advance(1000, 5000);
        assert_ne!(position.offset(), ScrollOffset::ZERO);
        position.reset();
        assert_eq!(position.offset(), ScrollOffset::ZERO);
    }
}
