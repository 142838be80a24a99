//! PNG output for canvas frames.
//!
//! Converts frames to PNG files with optional integer scaling.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::canvas::Frame;
use crate::error::{MoveError, Result};

use super::{FrameId, FrameSink};

/// Write a frame to a PNG file.
///
/// # Arguments
///
/// * `frame` - The snapshot to write
/// * `path` - Output file path
/// * `scale` - Integer scale factor (1 = no scaling)
pub fn write_png(frame: &Frame, path: &Path, scale: u32) -> Result<()> {
    let img = frame.to_rgb_image(scale)?;

    img.save(path).map_err(|e| MoveError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}

/// Writes each frame as `<stem>.png` in an output directory.
#[derive(Debug)]
pub struct PngSink {
    dir: PathBuf,
    scale: u32,
    written: Vec<PathBuf>,
}

impl PngSink {
    /// Create the sink, creating the output directory if needed.
    pub fn new(dir: impl Into<PathBuf>, scale: u32) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| MoveError::Io {
                path: dir.clone(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }

        Ok(Self {
            dir,
            scale,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in order. A path appears again if a later
    /// frame overwrote it.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSink {
    fn emit(&mut self, frame: &Frame, id: FrameId) -> Result<()> {
        if let FrameId::Named(name) = &id {
            FrameId::named(name)?;
        }
        let path = self.dir.join(format!("{}.png", id.stem()));
        write_png(frame, &path, self.scale)?;
        debug!(path = %path.display(), "wrote frame");
        self.written.push(path);
        Ok(())
    }
}
