//! Action scripts.
//!
//! A script is a plain text file with one action per line:
//!
//! ```text
//! # move the sprite around
//! down 50
//! draw shifted-down
//! undo
//! rotate
//! repeat-all
//! ```
//!
//! Blank lines and `#` comments are ignored.

use std::fmt;
use std::path::Path;

use crate::error::{MoveError, Result};
use crate::render::frame_name_problem;
use crate::types::Operation;

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Apply(Operation),
    Undo,
    Redo,
    Repeat,
    RepeatAll,
    /// Write the current canvas as a named frame.
    Draw(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Apply(op) => write!(f, "{}", op),
            Action::Undo => f.write_str("undo"),
            Action::Redo => f.write_str("redo"),
            Action::Repeat => f.write_str("repeat"),
            Action::RepeatAll => f.write_str("repeat-all"),
            Action::Draw(name) => write!(f, "draw {}", name),
        }
    }
}

/// An action together with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub action: Action,
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptLine>> {
    let source = std::fs::read_to_string(path).map_err(|e| MoveError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read script: {}", e),
    })?;
    parse_script(&source)
}

/// Parse script source into actions.
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>> {
    let mut lines = Vec::new();

    for (i, raw) in source.lines().enumerate() {
        let line = i + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        let action = parse_action(text).map_err(|message| MoveError::Parse {
            message: format!("line {}: {}", line, message),
            help: Some(
                "Expected one of: left N, right N, up N, down N, rotate [ccw|cw], \
                 undo, redo, repeat, repeat-all, draw NAME"
                    .to_string(),
            ),
        })?;
        lines.push(ScriptLine { line, action });
    }

    Ok(lines)
}

fn parse_action(text: &str) -> std::result::Result<Action, String> {
    let mut words = text.split_whitespace();
    let verb = words.next().unwrap_or("").to_ascii_lowercase();
    let rest: Vec<&str> = words.collect();

    let action = match verb.as_str() {
        "left" => Action::Apply(Operation::shift_left(distance(&verb, &rest)?)),
        "right" => Action::Apply(Operation::shift_right(distance(&verb, &rest)?)),
        "up" => Action::Apply(Operation::shift_up(distance(&verb, &rest)?)),
        "down" => Action::Apply(Operation::shift_down(distance(&verb, &rest)?)),
        "rotate" => match rest.as_slice() {
            [] | ["ccw"] => Action::Apply(Operation::rotate_ccw()),
            ["cw"] => Action::Apply(Operation::rotate_cw()),
            _ => return Err(format!("unknown rotation '{}'", rest.join(" "))),
        },
        "undo" => no_args(Action::Undo, &verb, &rest)?,
        "redo" => no_args(Action::Redo, &verb, &rest)?,
        "repeat" => no_args(Action::Repeat, &verb, &rest)?,
        "repeat-all" => no_args(Action::RepeatAll, &verb, &rest)?,
        "draw" => match rest.as_slice() {
            [name] => match frame_name_problem(name) {
                Some(problem) => return Err(format!("bad frame name '{}': {}", name, problem)),
                None => Action::Draw((*name).to_string()),
            },
            _ => return Err("draw takes exactly one frame name".to_string()),
        },
        _ => return Err(format!("unknown action '{}'", verb)),
    };

    Ok(action)
}

fn distance(verb: &str, rest: &[&str]) -> std::result::Result<usize, String> {
    match rest {
        [d] => d
            .parse()
            .map_err(|_| format!("{} needs a non-negative distance, got '{}'", verb, d)),
        _ => Err(format!("{} takes exactly one distance", verb)),
    }
}

fn no_args(action: Action, verb: &str, rest: &[&str]) -> std::result::Result<Action, String> {
    if rest.is_empty() {
        Ok(action)
    } else {
        Err(format!("{} takes no arguments", verb))
    }
}
