//! moving-image - reversible image movements with full history
//!
//! A library for shifting and rotating an RGB canvas while recording every
//! operation, so that any sequence can be undone, redone, repeated or
//! replayed frame by frame.

pub mod canvas;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod output;
pub mod render;
pub mod script;
pub mod session;
pub mod types;

pub use canvas::{Channel, Frame, PixelCanvas};
pub use config::Settings;
pub use error::{HistoryKind, MoveError, Result};
pub use history::{HistoryConfig, HistoryEngine, HistoryExport, RedoPolicy, RepeatPolicy};
pub use render::{write_png, FrameId, FrameSink, MemorySink, PngSink};
pub use script::{parse_script, Action, ScriptLine};
pub use session::{Outcome, Session};
pub use types::{Colour, OpKind, Operation, Sprite};
