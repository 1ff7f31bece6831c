//! Asset cache commands

use clap::Subcommand;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{load_context, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Subcommand)]
pub enum AssetAction {
    /// Print the cache path for a source key
    Path {
        /// Source key, e.g. components/Button.tsx
        key: String,
    },
    /// List every file in the asset directory
    List,
    /// Print a cached asset by file name
    Cat {
        /// File name inside the asset directory
        file: String,
    },
    /// Cache the contents of a CSS file under a source key
    Write {
        /// Source key
        key: String,
        /// File holding the CSS to cache
        input: PathBuf,
    },
    /// Delete the cached asset for a source key
    Rm {
        /// Source key
        key: String,
    },
    /// Print the glob pattern matching every cached asset
    Glob,
}

/// Execute an assets subcommand
pub fn run_assets(config: Option<&Path>, action: AssetAction) -> ExitCode {
    let ctx = match load_context(config) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    let store = ctx.assets();

    let result = match action {
        AssetAction::Path { key } => {
            println!("{}", store.get_path(&key).display());
            Ok(())
        }
        AssetAction::List => store.get_files().map(|files| {
            for file in files {
                println!("{}", file);
            }
        }),
        AssetAction::Cat { file } => store.read_file(&file).map(|css| print!("{}", css)),
        AssetAction::Write { key, input } => {
            let css = match fs::read_to_string(&input) {
                Ok(css) => css,
                Err(e) => {
                    eprintln!("Error: cannot read {}: {}", input.display(), e);
                    return ExitCode::from(EXIT_ERROR);
                }
            };
            store.write(&key, &css).map(|path| println!("{}", path.display()))
        }
        AssetAction::Rm { key } => store.rm(&key),
        AssetAction::Glob => {
            println!("{}", store.glob());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
