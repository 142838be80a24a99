//! Run command implementation.
//!
//! Executes an action script against a fresh canvas and writes the frames
//! it draws as PNG files.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::{MoveError, Result};
use crate::history::{HistoryEngine, RedoPolicy, RepeatPolicy};
use crate::output::{display_path, plural, Printer};
use crate::render::PngSink;
use crate::script::{load_script, ScriptLine};
use crate::session::Session;

/// Run an action script and write the frames it draws
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Script file, one action per line
    pub script: PathBuf,

    /// Settings file (default: moving.yaml in the current directory)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Scale factor for output (integer upscaling)
    #[arg(long)]
    pub scale: Option<u32>,

    /// What fresh actions do to the redo history
    #[arg(long, value_enum)]
    pub redo: Option<RedoPolicy>,

    /// Which operation `repeat` replays
    #[arg(long, value_enum)]
    pub repeat: Option<RepeatPolicy>,

    /// Also write history.json with the final undo, redo and log contents
    #[arg(long)]
    pub export: bool,
}

pub fn run(args: RunArgs, printer: &Printer) -> Result<()> {
    let mut settings = super::resolve_settings(args.config.as_deref())?;
    if let Some(output) = args.output {
        settings.output = output;
    }
    if args.scale.is_some() {
        settings.scale = args.scale;
    }
    if let Some(redo) = args.redo {
        settings.redo_policy = redo;
    }
    if let Some(repeat) = args.repeat {
        settings.repeat_policy = repeat;
    }
    settings.validate()?;

    printer.status("Loading", &display_path(&args.script));
    let script = load_script(&args.script)?;

    execute(&settings, &script, args.export, printer)?;
    Ok(())
}

/// Build the canvas from `settings`, run `script` and report progress.
pub(crate) fn execute(
    settings: &Settings,
    script: &[ScriptLine],
    export: bool,
    printer: &Printer,
) -> Result<HistoryEngine> {
    let canvas = settings.build_canvas()?;
    printer.info(
        "Canvas",
        &format!("{}x{}, background {}", canvas.width(), canvas.height(), settings.background),
    );

    let engine = HistoryEngine::with_config(canvas, settings.history());
    let config = engine.config();
    printer.info(
        "History",
        &format!("redo {}, repeat {}", config.redo_policy, config.repeat_policy),
    );
    let mut sink = PngSink::new(&settings.output, settings.effective_scale())?;

    let mut session = Session::new(engine, &mut sink);
    let result = session.run(script, |step, outcome| printer.step(step, outcome));

    if let Err(e) = result {
        printer.error("Failed", &e.to_string());
        return Err(e);
    }

    let engine = session.into_engine();

    if export {
        let path = settings.output.join("history.json");
        let json = serde_json::to_string_pretty(&engine.export()).map_err(|e| MoveError::Io {
            path: path.clone(),
            message: format!("Failed to serialize history: {}", e),
        })?;
        fs::write(&path, json).map_err(|e| MoveError::Io {
            path: path.clone(),
            message: format!("Failed to write history: {}", e),
        })?;
        printer.status("Exported", &display_path(&path));
    }

    printer.status(
        "Finished",
        &format!(
            "{} to {}",
            plural(sink.written().len(), "frame", "frames"),
            display_path(sink.dir())
        ),
    );

    Ok(engine)
}
