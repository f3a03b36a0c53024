//! Effect system with the two wheel animations
//!
//! Effects are stored in an enum to avoid heap allocations. Each effect
//! renders one half of the wheel; the renderer mirrors it onto the other.

mod pulse;
mod rainbow;

pub use pulse::{IDLE_TICKS_PER_STEP, PulseEffect};
pub use rainbow::{RAINBOW_ATTENUATION_SHIFT, RAINBOW_SPEEDUP, RainbowEffect};

use crate::fixed::ScrollOffset;
use crate::pixel::{HALF_LEN, Pixel};
use crate::speed::Mode;

const EFFECT_NAME_PULSE: &str = "pulse";
const EFFECT_NAME_RAINBOW: &str = "rainbow";

/// Inputs shared by all effects for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameContext {
    /// Current scroll position
    pub offset: ScrollOffset,
    /// Counter ticks since the previous frame
    pub elapsed_ticks: u32,
}

pub trait Effect {
    /// Render a single frame into one half of the wheel
    ///
    /// `leds` is cleared before every call.
    fn render(&mut self, frame: &FrameContext, leds: &mut [Pixel; HALF_LEN]);
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    /// Sweeping pulses shown while the wheel stands still
    Pulse(PulseEffect),
    /// Rainbow moving with the wheel
    Rainbow(RainbowEffect),
}

/// Known effect ids
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    Pulse = 0,
    Rainbow = 1,
}

impl EffectId {
    /// Effect shown in a given mode
    pub const fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Idle => Self::Pulse,
            Mode::Active => Self::Rainbow,
        }
    }

    pub fn to_slot(self) -> EffectSlot {
        match self {
            Self::Pulse => EffectSlot::Pulse(PulseEffect::new()),
            Self::Rainbow => EffectSlot::Rainbow(RainbowEffect::new()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pulse => EFFECT_NAME_PULSE,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
        }
    }
}

impl Default for EffectSlot {
    fn default() -> Self {
        Self::Pulse(PulseEffect::new())
    }
}

impl EffectSlot {
    /// Render the current effect
    pub fn render(&mut self, frame: &FrameContext, leds: &mut [Pixel; HALF_LEN]) {
        match self {
            Self::Pulse(effect) => effect.render(frame, leds),
            Self::Rainbow(effect) => effect.render(frame, leds),
        }
    }

    pub fn id(&self) -> EffectId {
        match self {
            Self::Pulse(_) => EffectId::Pulse,
            Self::Rainbow(_) => EffectId::Rainbow,
        }
    }
}
