use miette::Diagnostic;
use thiserror::Error;

use crate::types::Operation;

/// Which of the two history stacks an `EmptyHistory` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    Undo,
    Redo,
}

impl std::fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryKind::Undo => f.write_str("undo"),
            HistoryKind::Redo => f.write_str("redo"),
        }
    }
}

/// Main error type for moving-image operations
#[derive(Error, Diagnostic, Debug)]
pub enum MoveError {
    #[error("Invalid argument: {op} exceeds the canvas {axis} of {limit}")]
    #[diagnostic(
        code(moving::invalid_argument),
        help("Shift distances must lie between 0 and the canvas dimension they wrap around")
    )]
    InvalidArgument {
        op: Operation,
        axis: &'static str,
        limit: usize,
    },

    #[error("Nothing to {history}: the {history} history is empty")]
    #[diagnostic(code(moving::empty_history))]
    EmptyHistory { history: HistoryKind },

    #[error("Nothing to repeat: no operation has been applied yet")]
    #[diagnostic(code(moving::empty_log))]
    EmptyLog,

    #[error("Scale {scale} is too large for a {width}x{height} frame")]
    #[diagnostic(
        code(moving::invalid_scale),
        help("Use an output scale between 1 and 64")
    )]
    InvalidScale {
        scale: u32,
        width: usize,
        height: usize,
    },

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(moving::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Script line {line}: {source}")]
    #[diagnostic(code(moving::script))]
    Script {
        line: usize,
        #[source]
        source: Box<MoveError>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(moving::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, MoveError>;
