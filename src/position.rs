//! Scroll position integration

use crate::config::WheelConfig;
use crate::fixed::{OFFSET_ONE, ScrollOffset};

/// Micrometres per millimetre
const UM_PER_MM: u64 = 1_000;

/// Integrates wheel speed into a wrapping scroll offset
///
/// The offset counts travelled distance in LED pitches (24.8 fixed point).
/// The part of a step too small to move the offset by one raw unit is kept
/// and added to the next step, so slow speeds still advance.
#[derive(Debug, Clone)]
pub struct PositionIntegrator {
    offset: ScrollOffset,
    /// Offset units per (mm/s * tick), as numerator over `denominator`
    numerator: u64,
    denominator: u64,
    remainder: u64,
}

impl PositionIntegrator {
    pub const fn new(config: &WheelConfig) -> Self {
        let mut denominator = config.tick_hz as u64 * config.led_pitch_um as u64;
        if denominator == 0 {
            denominator = 1;
        }
        Self {
            offset: ScrollOffset::ZERO,
            numerator: OFFSET_ONE as u64 * UM_PER_MM,
            denominator,
            remainder: 0,
        }
    }

    pub const fn offset(&self) -> ScrollOffset {
        self.offset
    }

    /// Move the offset by the distance covered at `speed` mm/s during
    /// `elapsed_ticks` counter ticks
    #[allow(clippy::cast_possible_truncation)]
    pub fn advance(&mut self, elapsed_ticks: u32, speed: u32) -> ScrollOffset {
        let total = u128::from(elapsed_ticks) * u128::from(speed) * u128::from(self.numerator)
            + u128::from(self.remainder);
        let denominator = u128::from(self.denominator);
        let delta = total / denominator;
        self.remainder = (total % denominator) as u64;

        let delta = if delta > u128::from(u64::MAX) {
            u64::MAX
        } else {
            delta as u64
        };
        self.offset = self.offset.wrapping_add(delta);
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = ScrollOffset::ZERO;
        self.remainder = 0;
    }
}
