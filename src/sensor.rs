//! Rotation sensor input
//!
//! The capture and overflow interrupts store their events in an
//! [`EventLatch`]; the control loop takes them through [`RotationSensor`].
//! Each latch holds a single event, so a second capture before the loop
//! reads the first one replaces it.

use core::cell::Cell;

use critical_section::Mutex;

/// Source of wheel rotation events
pub trait RotationSensor {
    /// Take the timestamp of the last rotation edge, clearing it
    fn take_capture(&mut self) -> Option<u16>;

    /// Take the counter overflow flag, clearing it
    fn take_overflow(&mut self) -> bool;

    /// Current value of the free-running counter
    fn counter(&self) -> u16;
}

/// Interrupt-safe storage for capture and overflow events
pub struct EventLatch {
    capture: Mutex<Cell<Option<u16>>>,
    overflow: Mutex<Cell<bool>>,
}

impl EventLatch {
    pub const fn new() -> Self {
        Self {
            capture: Mutex::new(Cell::new(None)),
            overflow: Mutex::new(Cell::new(false)),
        }
    }

    /// Store a capture timestamp. Call from the capture interrupt.
    pub fn record_capture(&self, timestamp: u16) {
        critical_section::with(|cs| self.capture.borrow(cs).set(Some(timestamp)));
    }

    /// Flag a counter overflow. Call from the overflow interrupt.
    pub fn record_overflow(&self) {
        critical_section::with(|cs| self.overflow.borrow(cs).set(true));
    }

    pub fn take_capture(&self) -> Option<u16> {
        critical_section::with(|cs| self.capture.borrow(cs).take())
    }

    pub fn take_overflow(&self) -> bool {
        critical_section::with(|cs| self.overflow.borrow(cs).replace(false))
    }
}

impl Default for EventLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// [`RotationSensor`] backed by an [`EventLatch`] and a counter read function
pub struct LatchedSensor<'a, C: Fn() -> u16> {
    latch: &'a EventLatch,
    counter: C,
}

impl<'a, C: Fn() -> u16> LatchedSensor<'a, C> {
    pub const fn new(latch: &'a EventLatch, counter: C) -> Self {
        Self { latch, counter }
    }
}

impl<C: Fn() -> u16> RotationSensor for LatchedSensor<'_, C> {
    fn take_capture(&mut self) -> Option<u16> {
        self.latch.take_capture()
    }

    fn take_overflow(&mut self) -> bool {
        self.latch.take_overflow()
    }

    fn counter(&self) -> u16 {
        (self.counter)()
    }
}
