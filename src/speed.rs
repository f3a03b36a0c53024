//! Wheel speed estimation from rotation edge captures
//!
//! Every accepted capture yields one period measurement which is converted
//! to an instantaneous speed and folded into an exponential moving average.
//! Captures that follow the previous one too closely are sensor bounce and
//! are dropped. Counter overflows act as a coarse clock for detecting a
//! stopped wheel.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::WheelConfig;
use crate::fixed::ewma;

/// Animation mode derived from wheel motion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Wheel is stopped
    #[default]
    Idle,
    /// Wheel is turning
    Active,
}

/// Smoothed wheel speed and idle/active state
#[derive(Debug, Clone)]
pub struct SpeedEstimator {
    // Configuration
    circumference_mm: u32,
    ticks_per_revolution: u32,
    tick_hz: u32,
    debounce_ticks: u16,
    idle_timeout_ticks: u32,

    // State
    /// Smoothed speed in mm/s
    speed: u32,
    last_capture: Option<u16>,
    ticks_since_capture: u32,
    captured_since_overflow: bool,
    mode: Mode,
}

impl SpeedEstimator {
    pub const fn new(config: &WheelConfig) -> Self {
        Self {
            circumference_mm: config.circumference_mm,
            ticks_per_revolution: config.ticks_per_revolution,
            tick_hz: config.tick_hz,
            debounce_ticks: config.debounce_ticks,
            idle_timeout_ticks: config.idle_timeout_ticks(),
            speed: 0,
            last_capture: None,
            ticks_since_capture: 0,
            captured_since_overflow: false,
            mode: Mode::Idle,
        }
    }

    /// Smoothed speed in mm/s
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Timestamp of the last accepted capture
    pub const fn last_capture(&self) -> Option<u16> {
        self.last_capture
    }

    pub const fn ticks_since_capture(&self) -> u32 {
        self.ticks_since_capture
    }

    /// Speed in mm/s for a single capture period
    #[allow(clippy::cast_possible_truncation)]
    pub const fn instantaneous_speed(&self, period: u32) -> u32 {
        let mut divisor = period as u64 * self.ticks_per_revolution as u64;
        if divisor == 0 {
            divisor = 1;
        }
        let speed = self.circumference_mm as u64 * self.tick_hz as u64 / divisor;
        if speed > u32::MAX as u64 {
            u32::MAX
        } else {
            speed as u32
        }
    }

    /// Handle a rotation edge captured at `timestamp`
    ///
    /// Returns the new mode if the capture changed it.
    pub fn on_capture(&mut self, timestamp: u16) -> Option<Mode> {
        // A stopped wheel has no usable reference: the counter may have
        // wrapped any number of times since the last edge.
        let last = match (self.mode, self.last_capture) {
            (Mode::Active, Some(last)) => last,
            _ => return self.accept(timestamp),
        };

        let period = self.full_period(timestamp.wrapping_sub(last));
        if period < u32::from(self.debounce_ticks) {
            return None;
        }

        self.speed = ewma(self.speed, self.instantaneous_speed(period));
        self.accept(timestamp)
    }

    /// Restore the counter wraps lost in a 16-bit capture period
    ///
    /// Picks the period congruent to `wrapped` that is closest to the time
    /// counted since the last capture.
    fn full_period(&self, wrapped: u16) -> u32 {
        let wrapped = u32::from(wrapped);
        let wraps = self
            .ticks_since_capture
            .saturating_sub(wrapped)
            .saturating_add(1 << 15)
            >> 16;
        wrapped.saturating_add(wraps << 16)
    }

    fn accept(&mut self, timestamp: u16) -> Option<Mode> {
        self.last_capture = Some(timestamp);
        self.ticks_since_capture = 0;
        self.captured_since_overflow = true;
        if self.mode == Mode::Active {
            return None;
        }
        #[cfg(feature = "esp32-log")]
        println!("[SpeedEstimator.on_capture] wheel started at {:?}", timestamp);
        self.mode = Mode::Active;
        Some(Mode::Active)
    }

    /// Handle a counter overflow
    ///
    /// Switches to [`Mode::Idle`] when nothing was captured during the last
    /// counter period and the idle timeout has passed. Returns the new mode
    /// if it changed.
    pub fn on_overflow(&mut self) -> Option<Mode> {
        let captured = core::mem::replace(&mut self.captured_since_overflow, false);
        if captured
            || self.mode != Mode::Active
            || self.ticks_since_capture <= self.idle_timeout_ticks
        {
            return None;
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[SpeedEstimator.on_overflow] wheel stopped after {:?} ticks",
            self.ticks_since_capture
        );
        self.mode = Mode::Idle;
        self.speed = 0;
        Some(Mode::Idle)
    }

    /// Account for time passed since the previous call
    pub fn elapse(&mut self, ticks: u32) {
        self.ticks_since_capture = self.ticks_since_capture.saturating_add(ticks);
    }
}
