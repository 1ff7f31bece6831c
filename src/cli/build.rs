//! Build command implementations (init-dirs, css)

use std::path::Path;
use std::process::ExitCode;

use crate::config::StyleObject;

use super::{load_context, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the init-dirs command
pub fn run_init_dirs(config: Option<&Path>) -> ExitCode {
    let ctx = match load_context(config) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    if let Err(e) = ctx.ensure_dirs() {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    for dir in ctx.paths().directories() {
        println!("  {}", dir.display());
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Parse `prop=value` arguments into a style object.
fn parse_styles(pairs: &[String]) -> Result<StyleObject, String> {
    let mut style = StyleObject::new();
    for pair in pairs {
        match pair.split_once('=') {
            Some((prop, value)) if !prop.is_empty() && !value.is_empty() => {
                style.insert(prop.to_string(), value.to_string());
            }
            _ => return Err(format!("expected prop=value, got '{}'", pair)),
        }
    }
    Ok(style)
}

/// Execute the css command
pub fn run_css(config: Option<&Path>, pairs: &[String], condition: Option<&str>, write: bool) -> ExitCode {
    let style = match parse_styles(pairs) {
        Ok(style) => style,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut ctx = match load_context(config) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    if let Err(e) = ctx.stylesheet_mut().process(&style, condition) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    let css = ctx.stylesheet().to_css();

    if write {
        let output = ctx.output_css();
        if let Err(e) = output.write(&css) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
        println!("Wrote {}", output.path().display());
    } else {
        print!("{}", css);
    }

    ExitCode::from(EXIT_SUCCESS)
}
