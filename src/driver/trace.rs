use heapless::Vec;

use super::{Pulse, SlotTimer, SlotTiming};

/// Slot timer that records the compare value of every slot
///
/// Stands in for the timer hardware when checking frames off-target. Each
/// call to [`SlotTimer::start`] begins a new frame and drops the previous
/// recording.
#[derive(Debug, Default)]
pub struct PulseTrace<const N: usize> {
    compares: Vec<u8, N>,
    running: bool,
    driven: bool,
    overflowed: bool,
    boundaries: usize,
    frames: usize,
    pulse_ended: bool,
}

impl<const N: usize> PulseTrace<N> {
    pub const fn new() -> Self {
        Self {
            compares: Vec::new(),
            running: false,
            driven: false,
            overflowed: false,
            boundaries: 0,
            frames: 0,
            pulse_ended: false,
        }
    }

    /// Compare values of the last frame, one per slot
    pub fn compares(&self) -> &[u8] {
        &self.compares
    }

    /// Pulses of the last frame
    pub fn pulses(&self, timing: SlotTiming) -> impl Iterator<Item = Pulse> + '_ {
        self.compares
            .iter()
            .map(move |&compare| timing.pulse_for_compare(compare))
    }

    /// Decode the recorded slots back into bytes, most significant bit first
    ///
    /// Trailing bits that do not fill a byte are dropped.
    pub fn decode(&self, timing: SlotTiming) -> impl Iterator<Item = u8> + '_ {
        self.compares.chunks_exact(8).map(move |bits| {
            bits.iter().fold(0u8, |byte, &compare| {
                (byte << 1) | u8::from(compare == timing.one_compare)
            })
        })
    }

    /// Slot boundaries waited for in the last frame
    pub const fn boundaries(&self) -> usize {
        self.boundaries
    }

    /// Frames completed since creation
    pub const fn frames(&self) -> usize {
        self.frames
    }

    /// Whether the line is stopped and held low
    pub const fn is_low(&self) -> bool {
        !self.running && !self.driven
    }

    /// Whether the last pulse was allowed to finish before stopping
    pub const fn pulse_ended(&self) -> bool {
        self.pulse_ended
    }

    /// Whether the last frame had more slots than the trace can hold
    pub const fn overflowed(&self) -> bool {
        self.overflowed
    }
}

impl<const N: usize> SlotTimer for PulseTrace<N> {
    fn start(&mut self) {
        self.compares.clear();
        self.overflowed = false;
        self.boundaries = 0;
        self.pulse_ended = false;
        self.running = true;
    }

    fn set_output_level(&mut self, driven: bool) {
        self.driven = driven;
    }

    fn set_compare(&mut self, compare: u8) {
        if self.compares.push(compare).is_err() {
            self.overflowed = true;
        }
    }

    fn wait_slot_boundary(&mut self) {
        self.boundaries += 1;
    }

    fn wait_compare_match(&mut self) {
        self.pulse_ended = true;
    }

    fn stop(&mut self) {
        if self.running {
            self.frames += 1;
        }
        self.running = false;
    }
}
