//! In-memory style tree
//!
//! A generator pass appends rules to a [`StyleRoot`]; emitters serialize it.
//! The tree is write-only from this crate's point of view: CSS text is never
//! parsed back into it.

use std::fmt::Write as _;

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self { property: property.into(), value: value.into() }
    }
}

/// A node in the style tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleNode {
    /// `selector { declarations }`
    Rule { selector: String, declarations: Vec<Declaration> },
    /// `@name params { nodes }`
    AtRule { name: String, params: String, nodes: Vec<StyleNode> },
}

impl StyleNode {
    pub fn rule(selector: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        StyleNode::Rule { selector: selector.into(), declarations }
    }

    pub fn at_rule(name: impl Into<String>, params: impl Into<String>, nodes: Vec<StyleNode>) -> Self {
        StyleNode::AtRule { name: name.into(), params: params.into(), nodes }
    }

    fn write_css(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            StyleNode::Rule { selector, declarations } => {
                let _ = writeln!(out, "{}{} {{", indent, selector);
                for decl in declarations {
                    let _ = writeln!(out, "{}  {}: {};", indent, decl.property, decl.value);
                }
                let _ = writeln!(out, "{}}}", indent);
            }
            StyleNode::AtRule { name, params, nodes } => {
                if params.is_empty() {
                    let _ = writeln!(out, "{}@{} {{", indent, name);
                } else {
                    let _ = writeln!(out, "{}@{} {} {{", indent, name, params);
                }
                for node in nodes {
                    node.write_css(out, depth + 1);
                }
                let _ = writeln!(out, "{}}}", indent);
            }
        }
    }
}

/// Document root of one generator pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRoot {
    nodes: Vec<StyleNode>,
}

impl StyleRoot {
    /// Create an empty root.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn append(&mut self, node: StyleNode) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[StyleNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize the tree to CSS text.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_css(&mut out, 0);
        }
        out
    }
}
