//! Output directory layout.
//!
//! Every generated artifact lives under `<root>/<outdir>`. The layout is a pure
//! function of those two values and is computed before any directory exists.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Entries always excluded from source scanning.
pub const BASE_IGNORE: &[&str] = &["node_modules", ".git"];

/// Absolute paths of every output location for one build context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputLayout {
    /// `config.js`
    pub config: PathBuf,
    /// `config.min.js`
    pub config_min: PathBuf,
    /// Compiled CSS directory
    pub css: PathBuf,
    /// Design-token export directory
    pub ds: PathBuf,
    /// Generated type declarations
    pub types: PathBuf,
    /// Recipe output directory
    pub recipe: PathBuf,
    /// Pattern output directory
    pub pattern: PathBuf,
    /// Asset cache directory
    pub asset: PathBuf,
    /// Aggregate stylesheet file
    pub styles: PathBuf,
}

impl OutputLayout {
    /// Compute the layout for `root` and a relative output directory name.
    pub fn new(root: &Path, outdir: &str) -> Self {
        let base = root.join(outdir);
        Self {
            config: base.join("config.js"),
            config_min: base.join("config.min.js"),
            css: base.join("css"),
            ds: base.join("design-tokens"),
            types: base.join("types"),
            recipe: base.join("recipes"),
            pattern: base.join("patterns"),
            asset: base.join("assets"),
            styles: base.join("styles.css"),
        }
    }

    /// Every path paired with its logical name.
    pub fn all(&self) -> [(&'static str, &Path); 9] {
        [
            ("config", &self.config),
            ("configMin", &self.config_min),
            ("css", &self.css),
            ("ds", &self.ds),
            ("types", &self.types),
            ("recipe", &self.recipe),
            ("pattern", &self.pattern),
            ("asset", &self.asset),
            ("styles", &self.styles),
        ]
    }

    /// The directories of the layout (everything but the single files).
    pub fn directories(&self) -> [&Path; 6] {
        [&self.css, &self.ds, &self.types, &self.recipe, &self.pattern, &self.asset]
    }
}

/// Logical output categories mapped to their paths relative to the root.
///
/// Downstream emitters use these to write import statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportMap {
    pub css: String,
    pub recipe: String,
    pub pattern: String,
}

impl ImportMap {
    pub fn new(outdir: &str) -> Self {
        Self {
            css: format!("{}/css", outdir),
            recipe: format!("{}/recipes", outdir),
            pattern: format!("{}/patterns", outdir),
        }
    }

    /// Look up an entry by logical name.
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "css" => Some(&self.css),
            "recipe" => Some(&self.recipe),
            "pattern" => Some(&self.pattern),
            _ => None,
        }
    }
}

/// Base ignore list, then the output directory, then user exclusions.
pub fn exclude_list(outdir: &str, user: &[String]) -> Vec<String> {
    BASE_IGNORE
        .iter()
        .map(|s| s.to_string())
        .chain(std::iter::once(outdir.to_string()))
        .chain(user.iter().cloned())
        .collect()
}
