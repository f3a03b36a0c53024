//! Idle pulse
//!
//! The half-strip is the middle third of a virtual track three strips long.
//! Two soft pulses shaped like the shared curve sweep along the track in
//! opposite directions, cross on the strip and leave at the far ends.
//! Only blue and white are lit.

use super::{Effect, FrameContext};
use crate::lut::{LUT_LEN, STEPS_PER_LED, window};
use crate::pixel::{HALF_LEN, Pixel};

/// Counter ticks per track step of the pulses (~3 s per sweep at 15625 Hz)
pub const IDLE_TICKS_PER_STEP: u32 = 72;

/// Track length in curve samples
#[allow(clippy::cast_possible_wrap)]
const TRACK_LEN: i32 = 3 * LUT_LEN as i32;

/// Position of the first LED on the track
#[allow(clippy::cast_possible_wrap)]
const STRIP_START: i32 = LUT_LEN as i32;

#[allow(clippy::cast_possible_wrap)]
const PULSE_HALF_WIDTH: i32 = (LUT_LEN / 2) as i32;

#[allow(clippy::cast_possible_wrap)]
const STEP: i32 = STEPS_PER_LED as i32;

#[derive(Debug, Clone, Default)]
pub struct PulseEffect {
    /// Ticks spent idle since the effect was entered
    idle_ticks: u64,
}

impl PulseEffect {
    pub const fn new() -> Self {
        Self { idle_ticks: 0 }
    }

    pub const fn idle_ticks(&self) -> u64 {
        self.idle_ticks
    }

    /// Track position of the forward pulse
    #[allow(clippy::cast_possible_truncation)]
    pub const fn shift(&self) -> i32 {
        ((self.idle_ticks / IDLE_TICKS_PER_STEP as u64) % TRACK_LEN as u64) as i32
    }

    /// Brightness of both pulses at a track position
    fn intensity(position: i32, shift: i32) -> u16 {
        let forward = window(position - shift + PULSE_HALF_WIDTH);
        let backward = window(position - (TRACK_LEN - shift) + PULSE_HALF_WIDTH);
        u16::from(forward) + u16::from(backward)
    }
}

impl Effect for PulseEffect {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn render(&mut self, frame: &FrameContext, leds: &mut [Pixel; HALF_LEN]) {
        self.idle_ticks = self
            .idle_ticks
            .saturating_add(u64::from(frame.elapsed_ticks));
        let shift = self.shift();

        for (i, led) in leds.iter_mut().enumerate() {
            // sample at the LED center
            let position = STRIP_START + i as i32 * STEP + STEP / 2;
            let sum = Self::intensity(position, shift);
            *led = Pixel::new(0, 0, (sum >> 2) as u8, (sum >> 3) as u8);
        }
    }
}
