//! SK6812 RGBW protocol driver
//!
//! Every bit of the frame takes one timer slot. The line goes high at the
//! start of the slot and falls when the timer reaches the compare value, so a
//! short compare encodes a 0 and a long one encodes a 1. The driver only
//! swaps compare values between slots; the timer hardware shapes the pulses.
//!
//! A compare value written during a slot takes effect on the following slot,
//! so the driver writes the value for a bit right after the boundary that
//! precedes it.

mod trace;

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

pub use trace::PulseTrace;

use crate::OutputDriver;
use crate::pixel::PixelBuffer;

/// Minimum low time the strip needs to latch a frame
pub const DEFAULT_LATCH: Duration = Duration::from_micros(80);

/// Hardware primitives needed to clock out bits
///
/// Implement this on top of a PWM-capable timer whose period is one bit slot.
pub trait SlotTimer {
    /// Start counting slots
    fn start(&mut self);

    /// Connect (`true`) or disconnect (`false`) the compare output.
    ///
    /// A disconnected output is held low.
    fn set_output_level(&mut self, driven: bool);

    /// Set the compare value used for the next slot
    fn set_compare(&mut self, compare: u8);

    /// Block until the current slot elapses, acknowledging the event
    fn wait_slot_boundary(&mut self);

    /// Block until the pulse of the current slot has ended
    fn wait_compare_match(&mut self);

    /// Stop the timer
    fn stop(&mut self);
}

/// High and low time of one bit slot, in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub high_ns: u32,
    pub low_ns: u32,
}

/// Timer configuration for bit slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTiming {
    /// Timer input clock
    pub clock_hz: u32,
    /// Last counter value of a slot (the slot lasts `top + 1` clocks)
    pub top: u8,
    /// Compare value for a 0 bit
    pub zero_compare: u8,
    /// Compare value for a 1 bit
    pub one_compare: u8,
}

impl SlotTiming {
    /// 16 MHz timer: 1187.5 ns slots, 312.5 ns and 625 ns pulses
    pub const SK6812_16MHZ: Self = Self {
        clock_hz: 16_000_000,
        top: 18,
        zero_compare: 4,
        one_compare: 9,
    };

    /// Compare value encoding `bit`
    pub const fn compare(self, bit: bool) -> u8 {
        if bit {
            self.one_compare
        } else {
            self.zero_compare
        }
    }

    /// Length of one slot in timer clocks
    pub const fn slot_clocks(self) -> u32 {
        self.top as u32 + 1
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn clocks_to_ns(self, clocks: u32) -> u32 {
        if self.clock_hz == 0 {
            return 0;
        }
        (clocks as u64 * 1_000_000_000 / self.clock_hz as u64) as u32
    }

    /// Duration of one slot
    pub const fn slot_ns(self) -> u32 {
        self.clocks_to_ns(self.slot_clocks())
    }

    /// Pulse produced by a compare value
    pub const fn pulse_for_compare(self, compare: u8) -> Pulse {
        let slot = self.slot_clocks();
        let mut high = compare as u32 + 1;
        if high > slot {
            high = slot;
        }
        let high_ns = self.clocks_to_ns(high);
        Pulse {
            high_ns,
            low_ns: self.slot_ns() - high_ns,
        }
    }

    /// Pulse encoding `bit`
    pub const fn pulse(self, bit: bool) -> Pulse {
        self.pulse_for_compare(self.compare(bit))
    }

    /// Time spent clocking out `bytes` bytes, without the latch
    pub const fn transmit_ns(self, bytes: usize) -> u64 {
        bytes as u64 * 8 * self.slot_ns() as u64
    }
}

impl Default for SlotTiming {
    fn default() -> Self {
        Self::SK6812_16MHZ
    }
}

/// Compare values for the bits of `byte`, most significant first
pub const fn encode_byte(byte: u8, timing: SlotTiming) -> [u8; 8] {
    let mut compares = [0; 8];
    let mut i = 0;
    while i < 8 {
        compares[i] = timing.compare(byte & (0x80 >> i) != 0);
        i += 1;
    }
    compares
}

/// Bit-banging SK6812 driver
pub struct Sk6812<T: SlotTimer, D: DelayNs> {
    timer: T,
    delay: D,
    timing: SlotTiming,
    latch: Duration,
}

impl<T: SlotTimer, D: DelayNs> Sk6812<T, D> {
    /// Create a driver and park the line low
    pub fn new(mut timer: T, delay: D, timing: SlotTiming, latch: Duration) -> Self {
        timer.stop();
        timer.set_output_level(false);
        Self {
            timer,
            delay,
            timing,
            latch,
        }
    }

    pub const fn timing(&self) -> SlotTiming {
        self.timing
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Send the whole buffer, then hold the line low for the latch interval
    ///
    /// Blocks for the full frame. Nothing else may touch the timer meanwhile.
    pub fn transmit(&mut self, buffer: &PixelBuffer) {
        self.write_bytes(buffer.bytes());
    }

    /// Send raw bytes back-to-back, followed by the latch interval
    pub fn write_bytes<I: IntoIterator<Item = u8>>(&mut self, bytes: I) {
        self.timer.start();
        for byte in bytes {
            self.send_byte(byte);
        }
        // let the last pulse finish before the output is cut
        self.timer.wait_compare_match();
        self.timer.stop();
        self.timer.set_output_level(false);

        #[allow(clippy::cast_possible_truncation)]
        let latch_us = self.latch.as_micros().min(u64::from(u32::MAX)) as u32;
        self.delay.delay_us(latch_us);
    }

    fn send_byte(&mut self, byte: u8) {
        for (i, compare) in encode_byte(byte, self.timing).into_iter().enumerate() {
            self.timer.wait_slot_boundary();
            if i == 0 {
                self.timer.set_output_level(true);
            }
            self.timer.set_compare(compare);
        }
    }
}

impl<T: SlotTimer, D: DelayNs> OutputDriver for Sk6812<T, D> {
    fn write(&mut self, frame: &PixelBuffer) {
        self.transmit(frame);
    }
}
