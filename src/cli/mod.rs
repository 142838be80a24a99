pub mod completions;
pub mod demo;
pub mod init;
pub mod run;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::{Settings, SETTINGS_FILENAME};
use crate::error::Result;

/// moving-image - shift and rotate an image with full undo history
#[derive(Parser, Debug)]
#[command(name = "moving-image")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show debug logging (same as RUST_LOG=moving_image=debug)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an action script and write the frames it draws
    Run(run::RunArgs),

    /// Run the built-in demonstration sequence
    Demo(demo::DemoArgs),

    /// Write a default moving.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load the settings file if one was given, else `moving.yaml` in the
/// current directory if present, else the defaults.
pub fn resolve_settings(config: Option<&Path>) -> Result<Settings> {
    match config {
        Some(path) => Settings::load(path),
        None => {
            let local = PathBuf::from(SETTINGS_FILENAME);
            if local.exists() {
                Settings::load(&local)
            } else {
                Ok(Settings::default())
            }
        }
    }
}
