//! Fixed-point helpers
//!
//! Integer-only math for the speed filter and the scroll position.

/// Weight of a new sample in the speed filter, as a shift (1/16)
pub const EWMA_SHIFT: u32 = 4;

/// Fractional bits of [`ScrollOffset`] (one unit = one LED pitch)
pub const OFFSET_FRACTION_BITS: u32 = 8;

/// One LED pitch in raw offset units
pub const OFFSET_ONE: u32 = 1 << OFFSET_FRACTION_BITS;

/// The scroll offset wraps at this value
pub const OFFSET_MODULUS: u32 = 1 << 31;

/// Exponential moving average step with weight `1 / 2^EWMA_SHIFT`
///
/// Never overshoots `sample`, so repeated steps converge monotonically.
#[inline]
pub const fn ewma(current: u32, sample: u32) -> u32 {
    current - (current >> EWMA_SHIFT) + (sample >> EWMA_SHIFT)
}

/// Cumulative scroll distance in 24.8 fixed point, kept below [`OFFSET_MODULUS`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScrollOffset(u32);

impl ScrollOffset {
    pub const ZERO: Self = Self(0);

    /// Create an offset from raw fixed-point units, wrapping into range
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw % OFFSET_MODULUS)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whole LEDs travelled (fraction dropped)
    pub const fn whole(self) -> u32 {
        self.0 >> OFFSET_FRACTION_BITS
    }

    /// Position with `bits` fractional bits instead of the full 8
    pub const fn with_fraction_bits(self, bits: u32) -> u32 {
        if bits >= OFFSET_FRACTION_BITS {
            self.0
        } else {
            self.0 >> (OFFSET_FRACTION_BITS - bits)
        }
    }

    /// Raw units travelled from `earlier` to `self`, across a wrap if needed
    pub const fn distance_from(self, earlier: Self) -> u32 {
        (self.0 + OFFSET_MODULUS - earlier.0) % OFFSET_MODULUS
    }

    /// Advance by `delta` raw units, wrapping at [`OFFSET_MODULUS`]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn wrapping_add(self, delta: u64) -> Self {
        let modulus = OFFSET_MODULUS as u64;
        let sum = (self.0 as u64 + delta % modulus) % modulus;
        Self(sum as u32)
    }
}
