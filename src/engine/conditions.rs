//! Condition compilation
//!
//! Conditions come in two shapes: nesting selectors (`&:hover`,
//! `.dark &`) and at-rules (`@media (prefers-color-scheme: dark)`).
//! Breakpoints compile to `min-width` media queries under their own name.

use std::collections::BTreeMap;

use super::EngineError;
use crate::style_tree::{Declaration, StyleNode};

/// A compiled condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Selector template; `&` stands for the rule's own selector
    Selector(String),
    /// At-rule wrapping the rule
    AtRule { name: String, params: String },
}

impl Condition {
    /// Parse a raw condition string.
    pub fn parse(name: &str, raw: &str) -> Result<Self, EngineError> {
        let raw = raw.trim();

        if let Some(rest) = raw.strip_prefix('@') {
            let (at_name, params) = match rest.split_once(char::is_whitespace) {
                Some((n, p)) => (n, p.trim()),
                None => (rest, ""),
            };
            if at_name.is_empty() {
                return Err(EngineError::InvalidCondition { name: name.to_string(), value: raw.to_string() });
            }
            return Ok(Condition::AtRule { name: at_name.to_string(), params: params.to_string() });
        }

        if raw.contains('&') {
            return Ok(Condition::Selector(raw.to_string()));
        }

        Err(EngineError::InvalidCondition { name: name.to_string(), value: raw.to_string() })
    }

    /// Build the node for `selector { declarations }` under this condition.
    pub fn apply(&self, selector: &str, declarations: Vec<Declaration>) -> StyleNode {
        match self {
            Condition::Selector(template) => StyleNode::rule(template.replace('&', selector), declarations),
            Condition::AtRule { name, params } => {
                StyleNode::at_rule(name.clone(), params.clone(), vec![StyleNode::rule(selector, declarations)])
            }
        }
    }
}

/// Every named condition available to a generator pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledConditions {
    entries: BTreeMap<String, Condition>,
}

impl CompiledConditions {
    /// Compile breakpoints, then conditions.
    ///
    /// A condition sharing a breakpoint's name replaces it.
    pub fn compile(
        conditions: &BTreeMap<String, String>,
        breakpoints: &BTreeMap<String, String>,
    ) -> Result<Self, EngineError> {
        let mut entries = BTreeMap::new();

        for (name, min_width) in breakpoints {
            let min_width = min_width.trim();
            if min_width.is_empty() {
                return Err(EngineError::InvalidCondition { name: name.clone(), value: String::new() });
            }
            entries.insert(
                name.clone(),
                Condition::AtRule {
                    name: "media".to_string(),
                    params: format!("screen and (min-width: {})", min_width),
                },
            );
        }

        for (name, raw) in conditions {
            entries.insert(name.clone(), Condition::parse(name, raw)?);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&Condition> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
