//! RGBW pixels and the frame buffer

use smart_leds::RGB8;

/// Number of LEDs on the wheel
pub const LED_COUNT: usize = 54;

/// Number of LEDs in one mirrored half
pub const HALF_LEN: usize = LED_COUNT / 2;

/// Bytes sent for every pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Single RGBW pixel
///
/// Fields are stored in the order the strip expects them on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pixel {
    pub g: u8,
    pub r: u8,
    pub b: u8,
    pub w: u8,
}

impl Pixel {
    pub const OFF: Self = Self::new(0, 0, 0, 0);

    /// Create a pixel from channels given in RGBW order
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { g, r, b, w }
    }

    /// Wire bytes: green, red, blue, white
    pub const fn bytes(self) -> [u8; BYTES_PER_PIXEL] {
        [self.g, self.r, self.b, self.w]
    }
}

impl From<RGB8> for Pixel {
    fn from(color: RGB8) -> Self {
        Self::new(color.r, color.g, color.b, 0)
    }
}

/// Frame buffer for the whole wheel
///
/// The first and second half hold the two sides of the wheel.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pixels: [Pixel; LED_COUNT],
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelBuffer {
    pub const fn new() -> Self {
        Self {
            pixels: [Pixel::OFF; LED_COUNT],
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.pixels.fill(Pixel::OFF);
    }

    /// Set a pixel
    ///
    /// Returns `false` and leaves the buffer untouched if `index` is out of range.
    pub fn set(&mut self, index: usize, pixel: Pixel) -> bool {
        match self.pixels.get_mut(index) {
            Some(slot) => {
                *slot = pixel;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<Pixel> {
        self.pixels.get(index).copied()
    }

    /// Write the same pixel to `index` on both halves
    pub fn set_mirrored(&mut self, index: usize, pixel: Pixel) -> bool {
        if index >= HALF_LEN {
            return false;
        }
        self.set(index, pixel) && self.set(HALF_LEN + index, pixel)
    }

    /// Copy a rendered half onto both halves
    pub fn fill_mirrored(&mut self, half: &[Pixel; HALF_LEN]) {
        let (first, second) = self.pixels.split_at_mut(HALF_LEN);
        first.copy_from_slice(half);
        second.copy_from_slice(half);
    }

    pub fn pixels(&self) -> &[Pixel; LED_COUNT] {
        &self.pixels
    }

    /// Iterate over the frame in transmission order
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.iter().flat_map(|pixel| pixel.bytes())
    }
}
