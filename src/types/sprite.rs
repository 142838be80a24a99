//! Sprite type for the initial canvas contents.
//!
//! Sprites are rectangular RGB grids stamped over the background fill.
//! Any pixel whose three channels are all zero is transparent, so the
//! background shows through it.
//!
//! The built-in sprite is described as an ASCII grid using the tokens:
//! - `$` = edge colour
//! - `.` = fill colour
//! - `x` = transparent

use std::path::Path;

use crate::error::{MoveError, Result};
use crate::types::Colour;

/// A pixel token in an ASCII sprite grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelToken {
    Edge,
    Fill,
    Transparent,
}

impl PixelToken {
    /// Parse a character into a pixel token.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '$' => Some(PixelToken::Edge),
            '.' => Some(PixelToken::Fill),
            'x' | 'X' => Some(PixelToken::Transparent),
            _ => None,
        }
    }

    /// Resolve this token to a colour using the given edge and fill colours.
    pub fn resolve(self, edge: Colour, fill: Colour) -> Colour {
        match self {
            PixelToken::Edge => edge,
            PixelToken::Fill => fill,
            PixelToken::Transparent => Colour::BLACK,
        }
    }
}

const BUILTIN_GRID: &[&str] = &[
    "xxxxx$$xxxxx",
    "xxxx$..$xxxx",
    "xxx$....$xxx",
    "xx$......$xx",
    "x$........$x",
    "$$$$....$$$$",
    "xxx$....$xxx",
    "xxx$....$xxx",
    "xxx$....$xxx",
    "xxx$....$xxx",
    "xxx$....$$$x",
    "xxx$......$x",
    "xxx$......$x",
    "xxx$$$$$$$$x",
];

const BUILTIN_EDGE: Colour = Colour::rgb(0x1A, 0x1A, 0x2E);
const BUILTIN_FILL: Colour = Colour::rgb(0xE9, 0x45, 0x60);

/// A rectangular RGB sprite (row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: usize,
    height: usize,
    pixels: Vec<Colour>,
}

impl Sprite {
    /// Create a sprite from row-major pixels.
    pub fn new(width: usize, height: usize, pixels: Vec<Colour>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(MoveError::Parse {
                message: format!(
                    "Sprite of {}x{} needs {} pixels, got {}",
                    width,
                    height,
                    width * height,
                    pixels.len()
                ),
                help: None,
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a sprite from an ASCII grid, expanding every cell to a
    /// `scale` x `scale` block.
    pub fn from_ascii(rows: &[&str], edge: Colour, fill: Colour, scale: usize) -> Result<Self> {
        let scale = scale.max(1);
        let grid_w = rows.first().map_or(0, |r| r.chars().count());

        let mut tokens = Vec::with_capacity(grid_w * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != grid_w {
                return Err(MoveError::Parse {
                    message: format!("Sprite row {} is not {} cells wide", y + 1, grid_w),
                    help: Some("All sprite rows must have the same length".to_string()),
                });
            }
            for c in row.chars() {
                let token = PixelToken::from_char(c).ok_or_else(|| MoveError::Parse {
                    message: format!("Unknown sprite token '{}' on row {}", c, y + 1),
                    help: Some("Use '$' for edge, '.' for fill, 'x' for transparent".to_string()),
                })?;
                tokens.push(token);
            }
        }

        let width = grid_w * scale;
        let height = rows.len() * scale;
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let token = tokens[(y / scale) * grid_w + x / scale];
                pixels.push(token.resolve(edge, fill));
            }
        }

        Self::new(width, height, pixels)
    }

    /// The built-in arrow sprite at the given scale.
    pub fn builtin(scale: usize) -> Self {
        // The grid is a constant with uniform rows, so this cannot fail.
        Self::from_ascii(BUILTIN_GRID, BUILTIN_EDGE, BUILTIN_FILL, scale)
            .unwrap_or_else(|_| Self::empty())
    }

    /// Load a sprite from an image file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path)
            .map_err(|e| MoveError::Io {
                path: path.to_path_buf(),
                message: format!("Failed to read sprite: {}", e),
            })?
            .to_rgb8();

        let pixels = img.pixels().map(|p| Colour::from_rgb(p.0)).collect();
        Self::new(img.width() as usize, img.height() as usize, pixels)
    }

    fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
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
        self.pixels.get(y * self.width + x).copied()
    }

    /// Whether the pixel lets the background show through.
    pub fn is_transparent(&self, x: usize, y: usize) -> bool {
        self.get(x, y).map_or(true, Colour::is_black)
    }
}
