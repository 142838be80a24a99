//! Project settings (moving.yaml) parsing.
//!
//! Settings fix the canvas dimensions, the initial artwork, the history
//! policies and where frames are written.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::canvas::{PixelCanvas, MAX_SCALE};
use crate::error::{MoveError, Result};
use crate::history::{HistoryConfig, RedoPolicy, RepeatPolicy};
use crate::types::{Colour, Sprite};

/// Default settings file name.
pub const SETTINGS_FILENAME: &str = "moving.yaml";

/// Settings loaded from moving.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Canvas width in pixels.
    pub width: usize,

    /// Canvas height in pixels.
    pub height: usize,

    /// Background fill colour.
    pub background: Colour,

    /// PNG to use as the sprite. The built-in sprite is used when unset.
    pub sprite: Option<PathBuf>,

    /// Block size for each cell of the built-in sprite.
    pub sprite_scale: usize,

    /// Top-left position of the sprite, `[x, y]`.
    pub offset: [usize; 2],

    /// Output directory for frames.
    pub output: PathBuf,

    /// Integer upscaling applied when writing frames.
    pub scale: Option<u32>,

    pub redo_policy: RedoPolicy,

    pub repeat_policy: RepeatPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            background: Colour::WHITE,
            sprite: None,
            sprite_scale: 8,
            offset: [240, 200],
            output: PathBuf::from("frames"),
            scale: None,
            redo_policy: RedoPolicy::default(),
            repeat_policy: RepeatPolicy::default(),
        }
    }
}

impl Settings {
    /// Load settings from a moving.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MoveError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read settings: {}", e),
        })?;

        let mut settings = Self::parse(&content)?;

        // A relative sprite path is relative to the settings file.
        if let (Some(sprite), Some(parent)) = (&settings.sprite, path.parent()) {
            if sprite.is_relative() {
                settings.sprite = Some(parent.join(sprite));
            }
        }

        Ok(settings)
    }

    /// Parse settings from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(content).map_err(|e| MoveError::Parse {
            message: format!("Invalid settings: {}", e),
            help: Some(format!("Check {} syntax", SETTINGS_FILENAME)),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check dimensions and output scale. Called by `parse`, and again by
    /// the CLI after command-line overrides are applied.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MoveError::Parse {
                message: format!("Canvas must not be empty, got {}x{}", self.width, self.height),
                help: Some("Set width and height to at least 1".to_string()),
            });
        }
        if let Some(scale) = self.scale {
            if scale > MAX_SCALE {
                return Err(MoveError::InvalidScale {
                    scale,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }

    /// The history policies these settings select.
    pub fn history(&self) -> HistoryConfig {
        HistoryConfig {
            redo_policy: self.redo_policy,
            repeat_policy: self.repeat_policy,
        }
    }

    /// Get the effective scale factor.
    pub fn effective_scale(&self) -> u32 {
        self.scale.unwrap_or(1)
    }

    /// Resolve the sprite: the configured PNG, or the built-in one.
    pub fn load_sprite(&self) -> Result<Sprite> {
        match &self.sprite {
            Some(path) => Sprite::load(path),
            None => Ok(Sprite::builtin(self.sprite_scale)),
        }
    }

    /// Build the initial canvas: background fill with the sprite stamped
    /// at the configured offset.
    pub fn build_canvas(&self) -> Result<PixelCanvas> {
        let sprite = self.load_sprite()?;
        let mut canvas = PixelCanvas::filled(self.width, self.height, self.background);
        canvas.stamp(&sprite, self.offset[0], self.offset[1]);
        Ok(canvas)
    }
}
