//! Styleforge - build context and asset cache for style-system generators
//!
//! This library provides functionality to:
//! - Derive the output directory layout from a project root
//! - Merge utility, recipe and pattern declarations by name
//! - Cache per-source CSS artifacts on disk under normalized names
//! - Assemble the [`BuildContext`](context::BuildContext) every generation
//!   stage consumes, delegating token, utility, condition and stylesheet work
//!   to an [`Engine`](engine::Engine)
//!
//! # Example
//!
//! ```no_run
//! use styleforge::config::load_config;
//! use styleforge::context::BuildContext;
//! use styleforge::engine::BasicEngine;
//!
//! let config = load_config(None)?;
//! let ctx = BuildContext::new(config, &BasicEngine)?;
//! ctx.ensure_dirs()?;
//!
//! let path = ctx.assets().write("components/Button.tsx", ".btn { color: red; }")?;
//! println!("cached at {}", path.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assets;
pub mod cli;
pub mod config;
pub mod context;
pub mod engine;
pub mod layout;
pub mod merge;
pub mod shorthand;
pub mod style_tree;
