mod tests {
    use embedded_hal::delay::DelayNs;
    use wheel_light::driver::{DEFAULT_LATCH, Pulse, encode_byte};
    use wheel_light::pixel::{LED_COUNT, Pixel, PixelBuffer};
    use wheel_light::{OutputDriver, PulseTrace, SlotTiming, Sk6812};

    const FRAME_SLOTS: usize = LED_COUNT * 4 * 8;
    const TIMING: SlotTiming = SlotTiming::SK6812_16MHZ;

    #[derive(Default)]
    struct RecordingDelay {
        total_ns: u64,
        calls: usize,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
            self.calls += 1;
        }
    }

    type TestDriver = Sk6812<PulseTrace<2048>, RecordingDelay>;

    fn driver() -> TestDriver {
        Sk6812::new(
            PulseTrace::new(),
            RecordingDelay::default(),
            TIMING,
            DEFAULT_LATCH,
        )
    }

    #[test]
    fn test_default_timing_fits_sk6812() {
        let zero = TIMING.pulse(false);
        let one = TIMING.pulse(true);
        assert_eq!(TIMING.slot_ns(), 1187);
        assert_eq!(zero, Pulse { high_ns: 312, low_ns: 875 });
        assert_eq!(one, Pulse { high_ns: 625, low_ns: 562 });

        assert!((150..=450).contains(&zero.high_ns));
        assert!((450..=750).contains(&one.high_ns));
    }

    #[test]
    fn test_encode_byte_msb_first() {
        let long = TIMING.one_compare;
        let short = TIMING.zero_compare;
        assert_eq!(
            encode_byte(0b1011_0000, TIMING),
            [long, short, long, long, short, short, short, short]
        );
        assert_eq!(encode_byte(0, TIMING), [short; 8]);
        assert_eq!(encode_byte(0xFF, TIMING), [long; 8]);
    }

    #[test]
    fn test_single_byte_pulses() {
        let mut driver = driver();
        driver.write_bytes([0b1011_0000]);

        let long = TIMING.pulse(true);
        let short = TIMING.pulse(false);
        let pulses: Vec<Pulse> = driver.timer().pulses(TIMING).collect();
        assert_eq!(
            pulses,
            [long, short, long, long, short, short, short, short]
        );
        assert_eq!(driver.timer().boundaries(), 8);
    }

    #[test]
    fn test_frame_is_sent_in_wire_order() {
        let mut buffer = PixelBuffer::new();
        buffer.set(0, Pixel::new(0x01, 0x02, 0x03, 0x04));
        buffer.set(LED_COUNT - 1, Pixel::new(0xF0, 0x0F, 0xAA, 0x55));

        let mut driver = driver();
        driver.transmit(&buffer);

        let trace = driver.timer();
        assert_eq!(trace.compares().len(), FRAME_SLOTS);
        assert!(!trace.overflowed());
        let sent: Vec<u8> = trace.decode(TIMING).collect();
        let expected: Vec<u8> = buffer.bytes().collect();
        assert_eq!(sent, expected);
        assert_eq!(&sent[..4], &[0x02, 0x01, 0x03, 0x04]);
    }

    #[test]
    fn test_frame_ends_with_latch() {
        let mut driver = driver();
        assert!(driver.timer().is_low());

        driver.write(&PixelBuffer::new());

        let trace = driver.timer();
        assert!(trace.pulse_ended());
        assert!(trace.is_low());
        assert_eq!(trace.frames(), 1);
    }

    #[test]
    fn test_latch_is_held_long_enough() {
        let mut driver = Sk6812::new(
            PulseTrace::<64>::new(),
            RecordingDelay::default(),
            TIMING,
            DEFAULT_LATCH,
        );
        driver.write_bytes([0x00]);
        driver.write_bytes([0xFF]);
        assert_eq!(driver.delay().total_ns, 2 * 80_000);
        assert_eq!(driver.timer().frames(), 2);
        // only the last frame is kept
        assert_eq!(driver.timer().compares(), &[TIMING.one_compare; 8]);
    }

    #[test]
    fn test_trace_reports_overflow() {
        let mut driver = Sk6812::new(
            PulseTrace::<8>::new(),
            RecordingDelay::default(),
            TIMING,
            DEFAULT_LATCH,
        );
        driver.write_bytes([0x12, 0x34]);
        assert!(driver.timer().overflowed());
        assert_eq!(driver.timer().compares().len(), 8);
    }

    #[test]
    fn test_frame_duration() {
        assert_eq!(TIMING.transmit_ns(LED_COUNT * 4), FRAME_SLOTS as u64 * 1187);
    }
}
