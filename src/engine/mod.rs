//! Generation engine interfaces
//!
//! The build context does not resolve tokens, expand utilities, compile
//! conditions or build stylesheets itself. It asks an [`Engine`] for each of
//! those and wires the results together. Errors raised by an engine reach the
//! caller unchanged.
//!
//! [`BasicEngine`] is a small reference implementation used by the CLI and the
//! tests.

pub mod basic;
pub mod conditions;
pub mod stylesheet;
pub mod tokens;
pub mod utilities;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{StyleObject, TokenSet, UtilityConfig};
use crate::context::GeneratorContext;
use crate::merge::NamedCollection;
use crate::style_tree::Declaration;

pub use basic::BasicEngine;
pub use conditions::{CompiledConditions, Condition};
pub use stylesheet::AtomicStylesheet;
pub use tokens::{TokenEntry, TokenMap};
pub use utilities::CssUtility;

/// Errors raised by engine collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// A token path segment is unusable
    #[error("invalid token '{path}': {reason}")]
    InvalidToken { path: String, reason: String },
    /// A `{path}` reference points at no token
    #[error("token '{token}' references unknown token '{reference}'")]
    UnknownTokenReference { token: String, reference: String },
    /// A condition is neither a nesting selector nor an at-rule
    #[error("invalid condition '{name}': {value}")]
    InvalidCondition { name: String, value: String },
    /// A style referenced a condition that was never declared
    #[error("unknown condition '{0}'")]
    UnknownCondition(String),
    /// A utility declaration is unusable
    #[error("invalid utility '{name}': {reason}")]
    InvalidUtility { name: String, reason: String },
    /// A utility name the resolver does not accept
    #[error("unknown utility '{0}'")]
    UnknownUtility(String),
    /// Two distinct rules would share one atomic class
    #[error("class '{class}' already holds different declarations")]
    ClassConflict { class: String },
    /// Error raised by a third-party engine
    #[error("{0}")]
    Other(String),
}

/// Resolved design tokens.
pub trait TokenDictionary: fmt::Debug + Send + Sync {
    /// Resolved value of a token path (`colors.red.500`).
    fn get(&self, path: &str) -> Option<&str>;

    /// `var(--...)` reference for a token path.
    fn var_ref(&self, path: &str) -> Option<String>;

    /// Tokens under a category: remaining path -> `var(--...)` reference.
    fn category(&self, category: &str) -> BTreeMap<String, String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turns a style property and value into CSS declarations.
pub trait UtilityResolver: fmt::Debug + Send + Sync {
    fn resolve(&self, prop: &str, value: &str) -> Result<Vec<Declaration>, EngineError>;

    /// Atomic class name for a property/value pair.
    fn class_name(&self, prop: &str, value: &str) -> String {
        atomic_class(prop, value)
    }
}

/// `<prefix>_<value>` with runs of whitespace in the value joined by `_`.
///
/// Other characters are kept; selectors escape them.
pub fn atomic_class(prefix: &str, value: &str) -> String {
    let cleaned: Vec<&str> = value.split_whitespace().collect();
    format!("{}_{}", prefix, cleaned.join("_"))
}

/// Accumulates rules into the style tree of the context it was built from.
pub trait Stylesheet: fmt::Debug {
    fn context(&self) -> &GeneratorContext;

    /// Process a style object, optionally under a named condition.
    fn process(&mut self, style: &StyleObject, condition: Option<&str>) -> Result<(), EngineError>;

    fn to_css(&self) -> String;
}

/// Constructors for every collaborator the build context needs.
pub trait Engine {
    fn token_dictionary(
        &self,
        tokens: &TokenSet,
        semantic_tokens: &TokenSet,
        prefix: Option<&str>,
    ) -> Result<Arc<dyn TokenDictionary>, EngineError>;

    fn utility_resolver(
        &self,
        dictionary: Arc<dyn TokenDictionary>,
        utilities: &NamedCollection<UtilityConfig>,
    ) -> Result<Arc<dyn UtilityResolver>, EngineError>;

    fn compile_conditions(
        &self,
        conditions: &BTreeMap<String, String>,
        breakpoints: &BTreeMap<String, String>,
    ) -> Result<CompiledConditions, EngineError>;

    fn stylesheet(&self, context: GeneratorContext) -> Result<Box<dyn Stylesheet>, EngineError>;
}
