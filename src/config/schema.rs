//! Configuration schema types for `styleforge.toml`
//!
//! Defines the structure of a styleforge project configuration. The layer that
//! consumes it does no schema validation; anything that deserializes is used
//! as-is.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::shorthand::Shorthand;

/// Default output directory name, relative to the project root.
pub const DEFAULT_OUTDIR: &str = "styled-system";

/// A flat style declaration block: property -> value
pub type StyleObject = BTreeMap<String, String>;

/// Nested design-token groups keyed by segment name
pub type TokenSet = BTreeMap<String, TokenNode>;

/// A single node in a token tree.
///
/// Leaves are strings or numbers; groups nest further segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenNode {
    /// String leaf (`"#FF0000"`, `"{colors.red.500}"`)
    Text(String),
    /// Numeric leaf (`500`, `1.5`)
    Number(f64),
    /// Nested group
    Group(BTreeMap<String, TokenNode>),
}

impl fmt::Display for TokenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenNode::Text(s) => write!(f, "{}", s),
            TokenNode::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{}", *n as i64),
            TokenNode::Number(n) => write!(f, "{}", n),
            TokenNode::Group(g) => write!(f, "{{{} entries}}", g.len()),
        }
    }
}

/// CSS variable options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssVarConfig {
    /// Prefix prepended to every generated custom property name
    #[serde(default)]
    pub prefix: Option<String>,
}

/// A utility declaration (`bg`, `px`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilityConfig {
    /// Utility name used as the style-object key
    pub name: String,
    /// Class name prefix for generated atomic classes (defaults to `name`)
    #[serde(default)]
    pub class_name: Option<String>,
    /// Target CSS property, or a record of property -> value template
    pub property: Shorthand,
    /// Token category name, or a record of value aliases
    #[serde(default)]
    pub values: Option<Shorthand>,
}

/// A recipe (multi-variant component style)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeConfig {
    /// Recipe name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Styles applied regardless of variant
    #[serde(default)]
    pub base: StyleObject,
    /// variant name -> option name -> styles
    #[serde(default)]
    pub variants: BTreeMap<String, BTreeMap<String, StyleObject>>,
    /// variant name -> option selected when none is given
    #[serde(default)]
    pub default_variants: BTreeMap<String, String>,
}

/// A layout pattern (`stack`, `grid`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Pattern name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Accepted properties: name -> type description
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Styles the pattern always applies
    #[serde(default)]
    pub styles: StyleObject,
    /// Component name emitted for JSX frameworks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsx: Option<String>,
}

/// Complete styleforge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Project root. Resolved against the process working directory when
    /// relative, and defaults to it when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    /// Output directory name, relative to the root
    #[serde(default = "default_outdir")]
    pub outdir: String,
    /// Breakpoint name -> minimum width
    #[serde(default)]
    pub breakpoints: BTreeMap<String, String>,
    /// Condition name -> selector (`&:hover`) or at-rule (`@media ...`)
    #[serde(default)]
    pub conditions: BTreeMap<String, String>,
    /// Raw design tokens
    #[serde(default)]
    pub tokens: TokenSet,
    /// Tokens whose values reference other tokens
    #[serde(default, alias = "semanticTokens")]
    pub semantic_tokens: TokenSet,
    /// CSS variable options
    #[serde(default, alias = "cssVar")]
    pub css_var: CssVarConfig,
    /// Extra glob patterns to exclude from source scanning
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Utility declarations, in declaration order
    #[serde(default)]
    pub utilities: Vec<UtilityConfig>,
    /// Recipe declarations, in declaration order
    #[serde(default)]
    pub recipes: Vec<RecipeConfig>,
    /// Pattern declarations, in declaration order
    #[serde(default)]
    pub patterns: Vec<PatternConfig>,
}

fn default_outdir() -> String {
    DEFAULT_OUTDIR.to_string()
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            cwd: None,
            outdir: default_outdir(),
            breakpoints: BTreeMap::new(),
            conditions: BTreeMap::new(),
            tokens: TokenSet::new(),
            semantic_tokens: TokenSet::new(),
            css_var: CssVarConfig::default(),
            exclude: Vec::new(),
            utilities: Vec::new(),
            recipes: Vec::new(),
            patterns: Vec::new(),
        }
    }
}

impl StyleConfig {
    /// CSS variable prefix, if one is configured.
    pub fn prefix(&self) -> Option<&str> {
        self.css_var.prefix.as_deref()
    }
}
