//! Main control loop
//!
//! One iteration polls the sensor, updates speed and position, renders a
//! frame and sends it to the strip. Nothing here waits for events; the
//! only blocking parts are the frame transmission and the settle delay.
//!
//! # Usage
//!
//! ```ignore
//! static EVENTS: EventLatch = EventLatch::new();
//!
//! let sensor = LatchedSensor::new(&EVENTS, || timer1.count());
//! let driver = Sk6812::new(timer0, delay, config.timing, config.latch);
//! let mut control = ControlLoop::new(sensor, driver, delay, &config);
//!
//! control.run()
//! ```

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

use crate::OutputDriver;
use crate::config::WheelConfig;
use crate::effect::FrameContext;
use crate::fixed::ScrollOffset;
use crate::pixel::PixelBuffer;
use crate::position::PositionIntegrator;
use crate::renderer::Renderer;
use crate::sensor::RotationSensor;
use crate::speed::{Mode, SpeedEstimator};

/// Outcome of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Mode the frame was rendered in
    pub mode: Mode,
    /// Mode change caused by this iteration's events
    pub transition: Option<Mode>,
    /// Smoothed speed in mm/s
    pub speed: u32,
    /// Scroll position used for the frame
    pub offset: ScrollOffset,
    /// Counter ticks since the previous iteration
    pub elapsed_ticks: u32,
}

/// Drives sensor, state and output once per frame
pub struct ControlLoop<S: RotationSensor, O: OutputDriver, D: DelayNs> {
    // External dependencies and configuration
    sensor: S,
    output: O,
    delay: D,
    settle: Duration,

    // Internal state
    speed: SpeedEstimator,
    position: PositionIntegrator,
    renderer: Renderer,
    buffer: PixelBuffer,
    last_counter: u16,
}

impl<S: RotationSensor, O: OutputDriver, D: DelayNs> ControlLoop<S, O, D> {
    pub fn new(sensor: S, output: O, delay: D, config: &WheelConfig) -> Self {
        let last_counter = sensor.counter();
        Self {
            sensor,
            output,
            delay,
            settle: config.settle,
            speed: SpeedEstimator::new(config),
            position: PositionIntegrator::new(config),
            renderer: Renderer::new(Mode::Idle),
            buffer: PixelBuffer::new(),
            last_counter,
        }
    }

    /// Run one iteration
    pub fn tick(&mut self) -> FrameReport {
        let mut transition = None;
        if let Some(timestamp) = self.sensor.take_capture() {
            transition = self.speed.on_capture(timestamp);
        }
        if self.sensor.take_overflow() {
            transition = self.speed.on_overflow().or(transition);
        }

        let now = self.sensor.counter();
        let elapsed_ticks = u32::from(now.wrapping_sub(self.last_counter));
        self.last_counter = now;
        self.speed.elapse(elapsed_ticks);

        // position stays frozen while the wheel stands still
        let mode = self.speed.mode();
        if mode == Mode::Active {
            self.position.advance(elapsed_ticks, self.speed.speed());
        }

        let frame = FrameContext {
            offset: self.position.offset(),
            elapsed_ticks,
        };
        self.renderer.render(mode, &frame, &mut self.buffer);
        self.output.write(&self.buffer);

        #[allow(clippy::cast_possible_truncation)]
        let settle_us = self.settle.as_micros().min(u64::from(u32::MAX)) as u32;
        self.delay.delay_us(settle_us);

        FrameReport {
            mode,
            transition,
            speed: self.speed.speed(),
            offset: frame.offset,
            elapsed_ticks,
        }
    }

    /// Run forever
    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
        }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn speed(&self) -> &SpeedEstimator {
        &self.speed
    }

    pub fn position(&self) -> &PositionIntegrator {
        &self.position
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
