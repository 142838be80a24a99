//! Status lines for the moving-image CLI.
//!
//! Each script step is reported as one stderr line: a right-aligned verb
//! saying what happened to the canvas, then the operation and the script
//! line it came from. Stdout is left to `completions`.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::script::ScriptLine;
use crate::session::Outcome;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Width of the right-aligned verb column.
const VERB_COLUMN: usize = 12;

/// Colour of the verb column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Progress,
    Note,
    Failure,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Progress => "\x1b[32m",
            Tone::Note => "\x1b[36m",
            Tone::Failure => "\x1b[31m",
        }
    }
}

/// Writes status lines to stderr, coloured when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Progress on the canvas or the output directory.
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(Tone::Progress, verb, message);
    }

    /// Facts about the run, such as canvas size and history policies.
    pub fn info(&self, verb: &str, message: &str) {
        self.emit(Tone::Note, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.emit(Tone::Failure, verb, message);
    }

    /// Report one script step, e.g. `     Applied shift-down(50) (line 3)`.
    pub fn step(&self, step: &ScriptLine, outcome: &Outcome) {
        let (verb, subject) = describe(outcome);
        let origin = self.dim(&format!("(line {})", step.line));
        self.status(verb, &format!("{} {}", subject, origin));
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn format_line(&self, tone: Tone, verb: &str, message: &str) -> String {
        if self.color {
            format!("{BOLD}{}{verb:>VERB_COLUMN$}{RESET} {message}", tone.ansi())
        } else {
            format!("{verb:>VERB_COLUMN$} {message}")
        }
    }

    fn emit(&self, tone: Tone, verb: &str, message: &str) {
        let line = self.format_line(tone, verb, message);
        let _ = writeln!(io::stderr().lock(), "{line}");
    }
}

/// Verb and subject for a step outcome.
fn describe(outcome: &Outcome) -> (&'static str, String) {
    match outcome {
        Outcome::Applied(op) => ("Applied", op.clone()),
        Outcome::Undone(op) => ("Undone", op.clone()),
        Outcome::Redone(op) => ("Redone", op.clone()),
        Outcome::Repeated(op) => ("Repeated", op.clone()),
        Outcome::Replayed { frames } => ("Replayed", plural(*frames, "frame", "frames")),
        Outcome::Drawn(name) => ("Drew", format!("{}.png", name)),
    }
}

/// `plural(1, "frame", "frames")` is "1 frame".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    let noun = if n == 1 { singular } else { pluralized };
    format!("{} {}", n, noun)
}

/// Path relative to the working directory when it lies inside it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));

    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}
