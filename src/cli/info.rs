//! Info command implementations (paths, info)

use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use crate::layout::{ImportMap, OutputLayout};

use super::{load_context, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Serialize)]
struct PathsReport<'a> {
    root: &'a Path,
    paths: &'a OutputLayout,
    import_map: &'a ImportMap,
    exclude: &'a [String],
    asset_glob: String,
}

/// Execute the paths command
pub fn run_paths(config: Option<&Path>, json: bool) -> ExitCode {
    let ctx = match load_context(config) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    if json {
        let report = PathsReport {
            root: ctx.root(),
            paths: ctx.paths(),
            import_map: ctx.import_map(),
            exclude: ctx.exclude(),
            asset_glob: ctx.assets().glob(),
        };
        return match serde_json::to_string_pretty(&report) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    println!("Root: {}", ctx.root().display());
    println!();
    println!("Paths:");
    for (name, path) in ctx.paths().all() {
        println!("  {:<10} {}", name, path.display());
    }
    println!();
    println!("Import map:");
    for name in ["css", "recipe", "pattern"] {
        if let Some(target) = ctx.import_map().get(name) {
            println!("  {:<10} {}", name, target);
        }
    }
    println!();
    println!("Exclude: {}", ctx.exclude().join(", "));

    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the info command
pub fn run_info(config: Option<&Path>) -> ExitCode {
    let ctx = match load_context(config) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    println!("Tokens: {}", ctx.dictionary().len());

    println!("Utilities ({}):", ctx.utility_configs().len());
    for name in ctx.utility_configs().keys() {
        println!("  {}", name);
    }

    println!("Recipes ({}):", ctx.recipes().len());
    for (name, recipe) in ctx.recipes() {
        let variants: Vec<&str> = recipe.variants.keys().map(String::as_str).collect();
        if variants.is_empty() {
            println!("  {}", name);
        } else {
            println!("  {} [{}]", name, variants.join(", "));
        }
    }

    println!("Patterns ({}):", ctx.patterns().len());
    for name in ctx.patterns().keys() {
        println!("  {}", name);
    }

    let conditions = ctx.context().conditions;
    println!("Conditions ({}):", conditions.len());
    for name in conditions.names() {
        println!("  {}", name);
    }

    ExitCode::from(EXIT_SUCCESS)
}
