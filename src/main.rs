use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod build;
mod commands;
mod config;
mod theme;
mod util;

#[derive(Parser)]
#[command(name = "shortsite", version, about)]
struct Args {
    /// Show debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    /// The command to execute
    #[command(subcommand)]
    command: ShortsiteCommand,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the project in
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct BuildArgs {
    /// Directory containing the Markdown content
    #[arg(short, long, default_value = "content")]
    input: PathBuf,

    /// Directory to write the site to
    #[arg(short, long, default_value = "site")]
    output: PathBuf,

    /// The path to the configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config_file: PathBuf,
}

#[derive(Parser)]
struct CleanArgs {
    /// Directory the site was written to
    #[arg(short, long, default_value = "site")]
    output: PathBuf,

    /// Print what would be deleted without deleting it
    #[arg(long, default_value = "false")]
    dry_run: bool,
}

#[derive(Parser)]
struct ComponentsArgs {
    /// Print the catalog as JSON
    #[arg(long, default_value = "false")]
    json: bool,
}

#[derive(Subcommand)]
enum ShortsiteCommand {
    /// Initialize a new site
    Init(InitArgs),

    /// Build the site
    Build(BuildArgs),

    /// Delete the generated site
    Clean(CleanArgs),

    /// List the components available as shortcodes
    Components(ComponentsArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        ShortsiteCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        ShortsiteCommand::Build(args) => {
            commands::build::run(&args).await?;
        }
        ShortsiteCommand::Clean(args) => {
            commands::clean::run(&args).await?;
        }
        ShortsiteCommand::Components(args) => {
            commands::components::run(&args)?;
        }
    }

    Ok(())
}
