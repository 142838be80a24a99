//! The RGB canvas and its geometric transforms.
//!
//! The three planes are stored interleaved, one `[r, g, b]` triple per
//! pixel in row-major order, so every transform permutes all three planes
//! together and they can never drift out of sync.

mod frame;
mod transform;

pub use frame::{Frame, MAX_SCALE};

use crate::types::{Colour, Sprite};

/// One pixel: `[red, green, blue]`.
pub type Rgb = [u8; 3];

/// One of the three intensity planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Offset of this plane within an `Rgb` triple.
    pub const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// A mutable RGB raster of fixed pixel count.
///
/// Shifts keep the dimensions. Rotations swap width and height, which is a
/// no-op on square canvases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: usize,
    height: usize,

    /// Pixel grid (row-major: pixels[y * width + x]).
    pixels: Vec<Rgb>,
}

impl PixelCanvas {
    /// Allocate a canvas filled with a single background colour.
    pub fn filled(width: usize, height: usize, background: Colour) -> Self {
        Self {
            width,
            height,
            pixels: vec![background.to_rgb(); width * height],
        }
    }

    /// Rebuild a live canvas from a snapshot.
    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            width: frame.width(),
            height: frame.height(),
            pixels: frame.pixels().to_vec(),
        }
    }

    /// Stamp a sprite with its top-left corner at `(offset_x, offset_y)`.
    ///
    /// Transparent (all-zero) sprite pixels leave the canvas untouched.
    /// Pixels falling outside the canvas are clipped.
    pub fn stamp(&mut self, sprite: &Sprite, offset_x: usize, offset_y: usize) {
        for sy in 0..sprite.height() {
            let dy = offset_y + sy;
            if dy >= self.height {
                break;
            }
            for sx in 0..sprite.width() {
                let dx = offset_x + sx;
                if dx >= self.width {
                    break;
                }
                if sprite.is_transparent(sx, sy) {
                    continue;
                }
                if let Some(pixel) = sprite.get(sx, sy) {
                    self.pixels[dy * self.width + dx] = pixel.to_rgb();
                }
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get a pixel at the given position.
    pub fn get(&self, x: usize, y: usize) -> Option<Colour> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied().map(Colour::from_rgb)
    }

    /// Copy out a single plane, row-major.
    pub fn plane(&self, channel: Channel) -> Vec<u8> {
        let i = channel.index();
        self.pixels.iter().map(|px| px[i]).collect()
    }

    /// Take an owned copy of the canvas for persistence.
    pub fn snapshot(&self) -> Frame {
        Frame::new(self.width, self.height, self.pixels.clone())
    }
}
