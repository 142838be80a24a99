//! Init command implementation.
//!
//! Generates a `moving.yaml` settings file with every default spelled out.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{Settings, SETTINGS_FILENAME};
use crate::error::{MoveError, Result};
use crate::output::{display_path, Printer};

/// Write a default moving.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing moving.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let settings_path = args.path.join(SETTINGS_FILENAME);

    if settings_path.exists() && !args.force {
        return Err(MoveError::Parse {
            message: format!("{} already exists", SETTINGS_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let yaml = serde_yaml::to_string(&Settings::default()).map_err(|e| MoveError::Parse {
        message: format!("Failed to serialize settings: {}", e),
        help: None,
    })?;

    fs::write(&settings_path, yaml).map_err(|e| MoveError::Io {
        path: settings_path.clone(),
        message: format!("Failed to write settings: {}", e),
    })?;

    printer.status("Created", &display_path(&settings_path));
    Ok(())
}
