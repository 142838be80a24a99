//! Frame output for moving-image.
//!
//! A `FrameSink` receives canvas snapshots, either numbered frames from a
//! history replay or named frames from a script's `draw` command.

mod png;

pub use png::{write_png, PngSink};

use std::fmt;

use crate::canvas::Frame;
use crate::error::{MoveError, Result};

/// Where a frame belongs in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameId {
    /// Position in a replay sequence; frame 0 is the initial canvas.
    Index(usize),
    /// A caller-chosen name.
    Named(String),
}

impl FrameId {
    /// A named frame, checked with [`frame_name_problem`].
    pub fn named(name: &str) -> Result<Self> {
        match frame_name_problem(name) {
            Some(problem) => Err(MoveError::Parse {
                message: format!("Invalid frame name '{}': {}", name, problem),
                help: Some("Use a plain name such as 'start' or 'shifted-left'".to_string()),
            }),
            None => Ok(FrameId::Named(name.to_string())),
        }
    }

    /// File stem for this frame: `007` for index 7, the name otherwise.
    pub fn stem(&self) -> String {
        match self {
            FrameId::Index(i) => format!("{:03}", i),
            FrameId::Named(name) => name.clone(),
        }
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem())
    }
}

/// Why `name` cannot be used as the stem of a named frame, if it cannot.
///
/// A name must be a single path component, and must not be all digits:
/// those stems belong to replay frames.
pub fn frame_name_problem(name: &str) -> Option<&'static str> {
    if name.is_empty() || name == "." || name == ".." {
        Some("not a file name")
    } else if name.contains(['/', '\\']) {
        Some("path separators are not allowed")
    } else if name.bytes().all(|b| b.is_ascii_digit()) {
        Some("all-digit names are reserved for replay frames")
    } else {
        None
    }
}

/// Accepts snapshots of the canvas and persists them.
pub trait FrameSink {
    fn emit(&mut self, frame: &Frame, id: FrameId) -> Result<()>;
}

/// Keeps every emitted frame in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    frames: Vec<(FrameId, Frame)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[(FrameId, Frame)] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<(FrameId, Frame)> {
        self.frames
    }
}

impl FrameSink for MemorySink {
    fn emit(&mut self, frame: &Frame, id: FrameId) -> Result<()> {
        self.frames.push((id, frame.clone()));
        Ok(())
    }
}
