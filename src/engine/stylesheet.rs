//! Atomic stylesheet
//!
//! Every `(property, value)` pair becomes one single-declaration class. A pair
//! already emitted under the same condition is not emitted again. Two pairs
//! that would share a class with different declarations are an error.

use std::collections::HashMap;

use super::{EngineError, Stylesheet};
use crate::config::StyleObject;
use crate::context::GeneratorContext;
use crate::style_tree::{Declaration, StyleNode};

/// Escape a class name for use in a selector.
fn escape_class(class: &str) -> String {
    let mut out = String::with_capacity(class.len() + 2);
    for c in class.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

/// Class for `base` under an optional condition (`hover:bg_red`).
fn base_key(condition: Option<&str>, base: &str) -> String {
    match condition {
        Some(name) => format!("{}:{}", name, base),
        None => base.to_string(),
    }
}

#[derive(Debug)]
pub struct AtomicStylesheet {
    context: GeneratorContext,
    emitted: HashMap<String, Vec<Declaration>>,
}

impl AtomicStylesheet {
    pub fn new(context: GeneratorContext) -> Self {
        Self { context, emitted: HashMap::new() }
    }
}

impl Stylesheet for AtomicStylesheet {
    fn context(&self) -> &GeneratorContext {
        &self.context
    }

    fn process(&mut self, style: &StyleObject, condition: Option<&str>) -> Result<(), EngineError> {
        let compiled = match condition {
            Some(name) => Some(
                self.context.conditions.get(name).cloned().ok_or_else(|| EngineError::UnknownCondition(name.to_string()))?,
            ),
            None => None,
        };

        for (prop, value) in style {
            let declarations = self.context.transform(prop, value)?;
            let class = base_key(condition, &self.context.class_name(prop, value));

            if let Some(previous) = self.emitted.get(&class) {
                if *previous == declarations {
                    continue;
                }
                return Err(EngineError::ClassConflict { class });
            }

            let selector = format!(".{}", escape_class(&class));
            let node = match &compiled {
                Some(cond) => cond.apply(&selector, declarations.clone()),
                None => StyleNode::rule(selector, declarations.clone()),
            };

            self.emitted.insert(class, declarations);
            self.context.root.append(node);
        }

        Ok(())
    }

    fn to_css(&self) -> String {
        self.context.root.to_css()
    }
}
