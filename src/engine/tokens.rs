//! Flat token dictionary
//!
//! Nested token groups are flattened into dotted paths (`colors.red.500`),
//! each paired with a CSS custom property (`--colors-red-500`). Semantic
//! tokens may embed `{path}` references, which become `var(...)` references
//! to the raw token.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::OnceLock;

use super::{EngineError, TokenDictionary};
use crate::config::{TokenNode, TokenSet};

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_\-]+(?:\.[A-Za-z0-9_\-]+)*)\}").expect("valid regex"))
}

/// Extract the path of a value that is exactly one `{path}` reference.
pub fn as_reference(value: &str) -> Option<&str> {
    let inner = value.strip_prefix('{')?.strip_suffix('}')?;
    if inner.is_empty() || inner.contains(['{', '}']) {
        None
    } else {
        Some(inner)
    }
}

/// One flattened token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEntry {
    /// Resolved value (semantic references already rewritten to `var(...)`)
    pub value: String,
    /// Custom property name, including the leading `--`
    pub var_name: String,
    /// Whether the entry came from the semantic token set
    pub semantic: bool,
}

/// Token dictionary built from raw and semantic token sets.
#[derive(Debug, Clone, Default)]
pub struct TokenMap {
    prefix: Option<String>,
    entries: BTreeMap<String, TokenEntry>,
}

impl TokenMap {
    /// Flatten `tokens`, then `semantic_tokens`.
    ///
    /// A semantic token with the same path as a raw token replaces it.
    pub fn new(tokens: &TokenSet, semantic_tokens: &TokenSet, prefix: Option<&str>) -> Result<Self, EngineError> {
        let mut map = Self { prefix: prefix.map(str::to_string), entries: BTreeMap::new() };

        let mut raw = Vec::new();
        flatten(tokens, "", &mut raw)?;
        for (path, value) in raw {
            let var_name = map.var_name(&path);
            map.entries.insert(path, TokenEntry { value, var_name, semantic: false });
        }

        let mut semantic = Vec::new();
        flatten(semantic_tokens, "", &mut semantic)?;
        let mut resolved = Vec::with_capacity(semantic.len());
        for (path, value) in semantic {
            let value = map.rewrite_references(&path, &value)?;
            resolved.push((path, value));
        }
        for (path, value) in resolved {
            let var_name = map.var_name(&path);
            map.entries.insert(path, TokenEntry { value, var_name, semantic: true });
        }

        Ok(map)
    }

    /// Custom property name for a token path.
    pub fn var_name(&self, path: &str) -> String {
        let body = path.replace('.', "-");
        match &self.prefix {
            Some(prefix) if !prefix.is_empty() => format!("--{}-{}", prefix, body),
            _ => format!("--{}", body),
        }
    }

    pub fn entry(&self, path: &str) -> Option<&TokenEntry> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TokenEntry)> {
        self.entries.iter()
    }

    /// `:root` block declaring every token as a custom property.
    pub fn to_css(&self) -> String {
        let mut out = String::from(":root {\n");
        for entry in self.entries.values() {
            let _ = writeln!(out, "  {}: {};", entry.var_name, entry.value);
        }
        out.push_str("}\n");
        out
    }

    fn rewrite_references(&self, token: &str, value: &str) -> Result<String, EngineError> {
        let mut missing = None;
        let rewritten = reference_regex().replace_all(value, |caps: &regex::Captures<'_>| {
            let reference = &caps[1];
            match self.entries.get(reference) {
                Some(entry) => format!("var({})", entry.var_name),
                None => {
                    missing.get_or_insert_with(|| reference.to_string());
                    String::new()
                }
            }
        });

        match missing {
            Some(reference) => Err(EngineError::UnknownTokenReference { token: token.to_string(), reference }),
            None => Ok(rewritten.into_owned()),
        }
    }
}

fn flatten(set: &BTreeMap<String, TokenNode>, parent: &str, out: &mut Vec<(String, String)>) -> Result<(), EngineError> {
    for (segment, node) in set {
        let path = if parent.is_empty() { segment.clone() } else { format!("{}.{}", parent, segment) };

        if segment.is_empty() || segment.contains('.') || segment.chars().any(char::is_whitespace) {
            return Err(EngineError::InvalidToken {
                path,
                reason: "segments must be non-empty and contain no dots or whitespace".to_string(),
            });
        }

        match node {
            TokenNode::Group(children) => flatten(children, &path, out)?,
            TokenNode::Number(n) if !n.is_finite() => {
                return Err(EngineError::InvalidToken { path, reason: "number is not finite".to_string() });
            }
            leaf => out.push((path, leaf.to_string())),
        }
    }
    Ok(())
}

impl TokenDictionary for TokenMap {
    fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(|e| e.value.as_str())
    }

    fn var_ref(&self, path: &str) -> Option<String> {
        self.entries.get(path).map(|e| format!("var({})", e.var_name))
    }

    fn category(&self, category: &str) -> BTreeMap<String, String> {
        let prefix = format!("{}.", category);
        self.entries
            .iter()
            .filter_map(|(path, entry)| {
                path.strip_prefix(&prefix).map(|rest| (rest.to_string(), format!("var({})", entry.var_name)))
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
