//! Shared brightness curve
//!
//! One half-period of a sine-squared curve sampled at 8 points per LED of a
//! half-strip. Both animations build their colors from this table.

use core::f32::consts::PI;

use crate::pixel::HALF_LEN;

/// Samples per LED of the half-strip
pub const STEPS_PER_LED: usize = 8;

/// Number of samples in [`CURVE`]
pub const LUT_LEN: usize = HALF_LEN * STEPS_PER_LED;

/// `round(255 * sin²(π * i / LUT_LEN))`
#[rustfmt::skip]
pub const CURVE: [u8; LUT_LEN] = [
      0,   0,   0,   0,   1,   1,   2,   3,   3,   4,   5,   6,
      8,   9,  10,  12,  14,  15,  17,  19,  21,  23,  25,  27,
     30,  32,  35,  37,  40,  43,  46,  48,  51,  54,  57,  61,
     64,  67,  70,  74,  77,  80,  84,  87,  91,  95,  98, 102,
    105, 109, 113, 116, 120, 124, 127, 131, 135, 139, 142, 146,
    150, 153, 157, 160, 164, 168, 171, 175, 178, 181, 185, 188,
    191, 194, 198, 201, 204, 207, 209, 212, 215, 218, 220, 223,
    225, 228, 230, 232, 234, 236, 238, 240, 241, 243, 245, 246,
    247, 249, 250, 251, 252, 252, 253, 254, 254, 255, 255, 255,
    255, 255, 255, 255, 254, 254, 253, 252, 252, 251, 250, 249,
    247, 246, 245, 243, 241, 240, 238, 236, 234, 232, 230, 228,
    225, 223, 220, 218, 215, 212, 209, 207, 204, 201, 198, 194,
    191, 188, 185, 181, 178, 175, 171, 168, 164, 160, 157, 153,
    150, 146, 142, 139, 135, 131, 128, 124, 120, 116, 113, 109,
    105, 102,  98,  95,  91,  87,  84,  80,  77,  74,  70,  67,
     64,  61,  57,  54,  51,  48,  46,  43,  40,  37,  35,  32,
     30,  27,  25,  23,  21,  19,  17,  15,  14,  12,  10,   9,
      8,   6,   5,   4,   3,   3,   2,   1,   1,   0,   0,   0,
];

/// Sample the curve, returning `None` outside of the table
#[inline]
pub fn sample(index: usize) -> Option<u8> {
    CURVE.get(index).copied()
}

/// Sample the curve at a signed position relative to the window start
///
/// Anything outside `[0, LUT_LEN)` is dark.
#[inline]
#[allow(clippy::cast_sign_loss)]
pub fn window(position: i32) -> u8 {
    if position < 0 {
        return 0;
    }
    sample(position as usize).unwrap_or(0)
}

/// Compute a point of the curve for a table of `len` samples
///
/// Used to regenerate or verify [`CURVE`].
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn sine_squared(index: usize, len: usize) -> u8 {
    if len == 0 {
        return 0;
    }
    let s = libm::sinf(PI * index as f32 / len as f32);
    libm::roundf(255.0 * s * s).clamp(0.0, 255.0) as u8
}
