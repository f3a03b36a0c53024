#![no_std]

pub mod config;
pub mod control_loop;
pub mod driver;
pub mod effect;
pub mod fixed;
pub mod lut;
pub mod pixel;
pub mod position;
pub mod renderer;
pub mod sensor;
pub mod speed;

pub use config::WheelConfig;
pub use control_loop::{ControlLoop, FrameReport};
pub use driver::{PulseTrace, SlotTimer, SlotTiming, Sk6812};
pub use effect::{EffectId, EffectSlot, FrameContext};
pub use fixed::ScrollOffset;
pub use pixel::{HALF_LEN, LED_COUNT, Pixel, PixelBuffer};
pub use position::PositionIntegrator;
pub use renderer::Renderer;
pub use sensor::{EventLatch, LatchedSensor, RotationSensor};
pub use speed::{Mode, SpeedEstimator};

pub use embassy_time::Duration;
pub use smart_leds::RGB8;

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The control loop is generic over this trait.
pub trait OutputDriver {
    /// Write a frame to the LED strip
    fn write(&mut self, frame: &PixelBuffer);
}
