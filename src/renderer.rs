#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::effect::{EffectId, EffectSlot, FrameContext};
use crate::pixel::{HALF_LEN, Pixel, PixelBuffer};
use crate::speed::Mode;

/// Picks the effect for the current mode and draws it onto both halves
#[derive(Debug, Clone)]
pub struct Renderer {
    effect: EffectSlot,
    half: [Pixel; HALF_LEN],
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Mode::Idle)
    }
}

impl Renderer {
    pub fn new(mode: Mode) -> Self {
        Self {
            effect: EffectId::for_mode(mode).to_slot(),
            half: [Pixel::OFF; HALF_LEN],
        }
    }

    /// Id of the effect currently shown
    pub fn effect_id(&self) -> EffectId {
        self.effect.id()
    }

    /// Render one frame
    ///
    /// Switching modes starts the new effect from its initial state.
    pub fn render(&mut self, mode: Mode, frame: &FrameContext, buffer: &mut PixelBuffer) {
        let id = EffectId::for_mode(mode);
        if id != self.effect.id() {
            self.set_effect(id);
        }

        buffer.clear();
        self.half.fill(Pixel::OFF);
        self.effect.render(frame, &mut self.half);
        buffer.fill_mirrored(&self.half);
    }

    fn set_effect(&mut self, id: EffectId) {
        #[cfg(feature = "esp32-log")]
        println!("[Renderer.set_effect] switching to {}", id.as_str());
        self.effect = id.to_slot();
    }
}
