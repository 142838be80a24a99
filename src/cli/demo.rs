//! Demo command implementation.
//!
//! Runs a fixed sequence exercising every movement, undo, redo, repeat and
//! a double full replay.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::Printer;
use crate::script::parse_script;

/// The demonstration sequence.
pub const DEMO_SCRIPT: &str = "\
draw image
down 50
draw shifted-down-50
undo
up 50
draw shifted-up-50
undo
left 50
draw shifted-left-50
undo
right 50
draw shifted-right-50
undo
rotate
draw rotated-ccw
undo

# repeat after an undo replays the undo's own inverse
up 200
down 200
undo
repeat
draw shifted-up-400
undo
draw shifted-up-200

left 300
rotate
repeat
undo
undo
redo
repeat-all
repeat-all
";

/// Run the built-in demonstration sequence
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Settings file (default: moving.yaml in the current directory)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: DemoArgs, printer: &Printer) -> Result<()> {
    let mut settings = super::resolve_settings(args.config.as_deref())?;
    if let Some(output) = args.output {
        settings.output = output;
    }

    let script = parse_script(DEMO_SCRIPT)?;
    super::run::execute(&settings, &script, false, printer)?;
    Ok(())
}
