//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod assets;
mod build;
mod info;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::context::BuildContext;
use crate::engine::BasicEngine;

pub use assets::AssetAction;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "STYLEFORGE_LOG";

/// Styleforge - inspect and manage the build context of a style system
#[derive(Parser)]
#[command(name = "styleforge")]
#[command(about = "Styleforge - inspect and manage the build context of a style system")]
#[command(version)]
pub struct Cli {
    /// Config file (default: nearest styleforge.toml / styleforge.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the output layout and import map
    Paths {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show merged utilities, recipes, patterns and conditions
    Info,

    /// Create the output directories
    InitDirs,

    /// Generate atomic CSS for `prop=value` pairs
    Css {
        /// Style pairs, e.g. `bg=red.500 px=2`
        #[arg(required = true)]
        styles: Vec<String>,

        /// Apply under this named condition or breakpoint
        #[arg(long)]
        condition: Option<String>,

        /// Write the result to the aggregate stylesheet instead of stdout
        #[arg(long)]
        write: bool,
    },

    /// Manage cached CSS assets
    Assets {
        #[command(subcommand)]
        action: AssetAction,
    },
}

/// Install the stderr tracing subscriber.
fn init_tracing(verbose: bool) {
    let default = if verbose { "styleforge=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Load the build context or report why not.
pub(crate) fn load_context(config: Option<&Path>) -> Result<BuildContext, ExitCode> {
    BuildContext::from_config_file(config, &BasicEngine).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Paths { json } => info::run_paths(config, json),
        Commands::Info => info::run_info(config),
        Commands::InitDirs => build::run_init_dirs(config),
        Commands::Css { styles, condition, write } => {
            build::run_css(config, &styles, condition.as_deref(), write)
        }
        Commands::Assets { action } => assets::run_assets(config, action),
    }
}
