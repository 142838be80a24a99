use clap::Parser;
use miette::Result;
use moving_image::cli::{Cli, Commands};
use moving_image::output::Printer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "warn,moving_image=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let printer = Printer::new();

    match cli.command {
        Commands::Run(args) => moving_image::cli::run::run(args, &printer)?,
        Commands::Demo(args) => moving_image::cli::demo::run(args, &printer)?,
        Commands::Init(args) => moving_image::cli::init::run(args, &printer)?,
        Commands::Completions(args) => moving_image::cli::completions::run(args)?,
    }

    Ok(())
}
