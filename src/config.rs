//! Wheel and timing configuration

use embassy_time::Duration;

use crate::driver::{DEFAULT_LATCH, SlotTiming};

/// Nominal rate of the free-running capture counter
pub const DEFAULT_TICK_HZ: u32 = 15_625;

/// Captures closer than this are sensor bounce (6.4 ms at 15625 Hz)
pub const DEBOUNCE_TICKS: u16 = 100;

/// Time without an accepted capture before the wheel counts as stopped.
///
/// One full wrap of the 16-bit counter at the nominal rate.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_micros(4_194_304);

/// Pause between frames
pub const DEFAULT_SETTLE: Duration = Duration::from_micros(80);

/// Static configuration of the wheel light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelConfig {
    /// Capture counter frequency
    pub tick_hz: u32,
    /// Wheel circumference
    pub circumference_mm: u32,
    /// Sensor edges per wheel revolution
    pub ticks_per_revolution: u32,
    /// Distance between neighbouring LEDs, in micrometres
    pub led_pitch_um: u32,
    /// Minimum accepted capture period
    pub debounce_ticks: u16,
    /// Stationary time before switching to the idle animation
    pub idle_timeout: Duration,
    /// Delay between frames
    pub settle: Duration,
    /// Low time after each frame
    pub latch: Duration,
    /// Bit slot timing of the LED driver
    pub timing: SlotTiming,
}

impl WheelConfig {
    /// 28" wheel, one magnet, 60 LEDs/m strip
    pub const DEFAULT: Self = Self {
        tick_hz: DEFAULT_TICK_HZ,
        circumference_mm: 2_136,
        ticks_per_revolution: 1,
        led_pitch_um: 16_667,
        debounce_ticks: DEBOUNCE_TICKS,
        idle_timeout: DEFAULT_IDLE_TIMEOUT,
        settle: DEFAULT_SETTLE,
        latch: DEFAULT_LATCH,
        timing: SlotTiming::SK6812_16MHZ,
    };

    /// Convert a duration to capture counter ticks
    #[allow(clippy::cast_possible_truncation)]
    pub const fn ticks(&self, duration: Duration) -> u32 {
        let ticks = duration.as_micros() as u128 * self.tick_hz as u128 / 1_000_000;
        if ticks > u32::MAX as u128 {
            u32::MAX
        } else {
            ticks as u32
        }
    }

    pub const fn idle_timeout_ticks(&self) -> u32 {
        self.ticks(self.idle_timeout)
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
