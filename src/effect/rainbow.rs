//! Speed-driven rainbow
//!
//! Red, green and blue each follow one hump of the shared curve. The humps
//! are spaced two thirds of their width apart on a cycle of two humps, so
//! neighbouring channels overlap and the hue changes smoothly. Blue's hump
//! crosses the end of the cycle and is sampled twice. The whole pattern is
//! anchored to the scroll offset, so it moves with the wheel.

use smart_leds::RGB8;

use super::{Effect, FrameContext};
use crate::fixed::{OFFSET_FRACTION_BITS, ScrollOffset};
use crate::lut::{LUT_LEN, STEPS_PER_LED, window};
use crate::pixel::{HALF_LEN, Pixel};

/// How much faster the colors travel than the wheel surface
pub const RAINBOW_SPEEDUP: u32 = 2;

/// Right shift applied to every channel
pub const RAINBOW_ATTENUATION_SHIFT: u32 = 2;

/// Curve samples in one full hue cycle
const CYCLE: u32 = 2 * LUT_LEN as u32;

/// Distance between the humps of neighbouring channels
#[allow(clippy::cast_possible_wrap)]
const CHANNEL_SPACING: i32 = (LUT_LEN * 2 / 3) as i32;

/// Hue advance per LED, so that each half shows one full cycle
const PHASE_PER_LED: u32 = CYCLE / HALF_LEN as u32;

/// Bits of LUT resolution carried by the scroll offset
const STEP_BITS: u32 = STEPS_PER_LED.trailing_zeros();

/// Raw offset units after which the rainbow repeats
const ANCHOR_PERIOD: u32 = (CYCLE / RAINBOW_SPEEDUP) << (OFFSET_FRACTION_BITS - STEP_BITS);

#[derive(Debug, Clone, Default)]
pub struct RainbowEffect {
    /// Offset seen on the previous frame
    last_offset: Option<ScrollOffset>,
    /// Scroll position reduced modulo [`ANCHOR_PERIOD`]
    anchor: u32,
}

impl RainbowEffect {
    pub const fn new() -> Self {
        Self {
            last_offset: None,
            anchor: 0,
        }
    }

    /// Hue phase of the first LED
    ///
    /// Follows the offset by its frame-to-frame distance, so the hue stays
    /// continuous when the offset wraps.
    fn start_phase(&mut self, offset: ScrollOffset) -> u32 {
        let moved = match self.last_offset {
            Some(last) => offset.distance_from(last),
            None => offset.raw(),
        };
        self.last_offset = Some(offset);
        self.anchor = (self.anchor + moved % ANCHOR_PERIOD) % ANCHOR_PERIOD;
        (self.anchor >> (OFFSET_FRACTION_BITS - STEP_BITS)) * RAINBOW_SPEEDUP % CYCLE
    }

    /// Unattenuated color at a point of the hue cycle
    #[allow(clippy::cast_possible_wrap)]
    pub fn color_at(phase: u32) -> RGB8 {
        let phase = (phase % CYCLE) as i32;
        RGB8 {
            r: window(phase),
            g: window(phase - CHANNEL_SPACING),
            b: window(phase - 2 * CHANNEL_SPACING)
                .saturating_add(window(phase + CHANNEL_SPACING)),
        }
    }
}

impl Effect for RainbowEffect {
    fn render(&mut self, frame: &FrameContext, leds: &mut [Pixel; HALF_LEN]) {
        let mut phase = self.start_phase(frame.offset);
        for led in leds.iter_mut() {
            let color = Self::color_at(phase);
            *led = Pixel::from(RGB8 {
                r: color.r >> RAINBOW_ATTENUATION_SHIFT,
                g: color.g >> RAINBOW_ATTENUATION_SHIFT,
                b: color.b >> RAINBOW_ATTENUATION_SHIFT,
            });
            phase = (phase + PHASE_PER_LED) % CYCLE;
        }
    }
}
