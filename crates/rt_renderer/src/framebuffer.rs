//! Floating-point framebuffer and the 8-bit packed pixel buffer.
//!
//! Packed pixels are `0x00RRGGBB`: red in bits 16-23, green in bits 8-15,
//! blue in bits 0-7, top byte zero. Packed rows run bottom-up, so row 0 of
//! a [`PackedImage`] is the last row of the [`Framebuffer`].

use crate::Color;
use rt_math::Interval;

/// Rescale a colour whose brightest channel exceeds 1 so that channel
/// becomes exactly 1, keeping the ratios between channels.
pub fn tone_map(color: Color) -> Color {
    let max = color.max_element();
    if max > 1.0 {
        color * (1.0 / max)
    } else {
        color
    }
}

/// Clamp a channel to [0, 1] and scale it to a byte, rounding to nearest.
#[inline]
pub fn quantize_channel(channel: f64) -> u8 {
    (255.0 * Interval::UNIT.clamp(channel)).round() as u8
}

/// Pack three channel bytes as `0x00RRGGBB`.
#[inline]
pub fn pack_rgb([r, g, b]: [u8; 3]) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Inverse of [`pack_rgb`]; the top byte is ignored.
#[inline]
pub fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8]
}

/// Tone map, quantize and pack one colour.
pub fn color_to_packed(color: Color) -> u32 {
    let c = tone_map(color);
    pack_rgb([quantize_channel(c.x), quantize_channel(c.y), quantize_channel(c.z)])
}

/// Linear colours straight out of the shader, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Quantize every pixel and flip the row order.
    pub fn to_packed(&self) -> PackedImage {
        let mut pixels = Vec::with_capacity(self.pixels.len());
        if self.width > 0 {
            for row in self.pixels.chunks_exact(self.width as usize).rev() {
                pixels.extend(row.iter().map(|c| color_to_packed(*c)));
            }
        }

        PackedImage {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// `width × height` packed `0x00RRGGBB` pixels, row 0 at the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl PackedImage {
    /// Packed pixel at column `x` of bottom-up row `row`.
    pub fn get(&self, x: u32, row: u32) -> u32 {
        self.pixels[row as usize * self.width as usize + x as usize]
    }

    /// Channel bytes of the pixel at (x, y) with y counted from the top,
    /// the same orientation as the framebuffer it came from.
    pub fn rgb_top_down(&self, x: u32, y: u32) -> [u8; 3] {
        unpack_rgb(self.get(x, self.height - 1 - y))
    }
}
