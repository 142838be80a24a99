//! Immutable canvas snapshots.

use image::{ImageBuffer, Rgb as ImageRgb, RgbImage};

use super::{Channel, Rgb};
use crate::error::{MoveError, Result};
use crate::types::Colour;

/// Largest integer upscale accepted when converting a frame to an image.
pub const MAX_SCALE: u32 = 64;

/// An owned, immutable copy of the canvas at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Frame {
    pub(super) fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get a pixel at the given position.
    pub fn get(&self, x: usize, y: usize) -> Option<Colour> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied().map(Colour::from_rgb)
    }

    /// Row-major pixel triples.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Copy out a single plane, row-major.
    pub fn plane(&self, channel: Channel) -> Vec<u8> {
        let i = channel.index();
        self.pixels.iter().map(|px| px[i]).collect()
    }

    /// Convert to an RGB image buffer, optionally upscaled by an integer
    /// factor (nearest-neighbour). A scale of 0 is treated as 1.
    ///
    /// Fails with `InvalidScale` when the scale exceeds [`MAX_SCALE`] or the
    /// scaled dimensions do not fit an image buffer.
    pub fn to_rgb_image(&self, scale: u32) -> Result<RgbImage> {
        let scale = scale.max(1);
        let (width, height) = self.scaled_size(scale).ok_or(MoveError::InvalidScale {
            scale,
            width: self.width,
            height: self.height,
        })?;

        Ok(ImageBuffer::from_fn(width, height, |x, y| {
            let sx = (x / scale) as usize;
            let sy = (y / scale) as usize;
            ImageRgb(self.pixels[sy * self.width + sx])
        }))
    }

    fn scaled_size(&self, scale: u32) -> Option<(u32, u32)> {
        if scale > MAX_SCALE {
            return None;
        }
        let width = u32::try_from(self.width).ok()?.checked_mul(scale)?;
        let height = u32::try_from(self.height).ok()?.checked_mul(scale)?;
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(3)?;
        Some((width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelCanvas;
    use crate::types::Sprite;

    fn two_by_one() -> Frame {
        let mut canvas = PixelCanvas::filled(2, 1, Colour::WHITE);
        canvas.stamp(&Sprite::new(1, 1, vec![Colour::rgb(255, 0, 0)]).unwrap(), 0, 0);
        canvas.snapshot()
    }

    #[test]
    fn test_to_rgb_image() {
        let img = two_by_one().to_rgb_image(1).unwrap();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 1);
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_to_rgb_image_scaled() {
        let img = two_by_one().to_rgb_image(3).unwrap();
        assert_eq!(img.width(), 6);
        assert_eq!(img.height(), 3);
        assert_eq!(img.get_pixel(2, 2).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(3, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_scale_zero_treated_as_one() {
        let img = two_by_one().to_rgb_image(0).unwrap();
        assert_eq!(img.width(), 2);
    }

    #[test]
    fn test_oversized_scale_is_rejected() {
        let frame = PixelCanvas::filled(800, 800, Colour::WHITE).snapshot();

        let err = frame.to_rgb_image(6_000_000).unwrap_err();
        assert!(matches!(
            err,
            MoveError::InvalidScale { scale: 6_000_000, width: 800, height: 800 }
        ));
        assert!(frame.to_rgb_image(MAX_SCALE + 1).is_err());
        assert_eq!(two_by_one().to_rgb_image(MAX_SCALE).unwrap().width(), 2 * MAX_SCALE);
    }

    #[test]
    fn test_plane() {
        let frame = two_by_one();
        assert_eq!(frame.plane(Channel::Red), vec![255, 255]);
        assert_eq!(frame.plane(Channel::Blue), vec![0, 255]);
    }
}
