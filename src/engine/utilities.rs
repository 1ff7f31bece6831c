//! Utility resolver
//!
//! Maps a style property such as `bg` to CSS declarations using the merged
//! utility table. Properties without a utility pass through unchanged.

use std::sync::Arc;

use super::tokens::as_reference;
use super::{atomic_class, EngineError, TokenDictionary, UtilityResolver};
use crate::config::UtilityConfig;
use crate::merge::NamedCollection;
use crate::shorthand::{Shorthand, VALUE_PLACEHOLDER};
use crate::style_tree::Declaration;

/// Resolver backed by a token dictionary and merged utility declarations.
#[derive(Debug)]
pub struct CssUtility {
    dictionary: Arc<dyn TokenDictionary>,
    configs: NamedCollection<UtilityConfig>,
}

impl CssUtility {
    pub fn new(
        dictionary: Arc<dyn TokenDictionary>,
        configs: NamedCollection<UtilityConfig>,
    ) -> Result<Self, EngineError> {
        for (name, config) in &configs {
            if let Shorthand::Record(record) = &config.property {
                if record.is_empty() {
                    return Err(EngineError::InvalidUtility {
                        name: name.clone(),
                        reason: "property record is empty".to_string(),
                    });
                }
            }
            if let Shorthand::Value(property) = &config.property {
                if property.trim().is_empty() {
                    return Err(EngineError::InvalidUtility {
                        name: name.clone(),
                        reason: "property is empty".to_string(),
                    });
                }
            }
        }

        Ok(Self { dictionary, configs })
    }

    /// Whether `prop` names a declared utility.
    pub fn has(&self, prop: &str) -> bool {
        self.configs.contains_key(prop)
    }

    /// Utility names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    /// Resolve a raw value against the utility's value source.
    ///
    /// `{path}` references always go through the dictionary. Otherwise a
    /// token category looks up `<category>.<value>` and an alias record
    /// looks up `value`; misses fall back to the raw value.
    fn resolve_value(&self, prop: &str, config: Option<&UtilityConfig>, value: &str) -> Result<String, EngineError> {
        if let Some(path) = as_reference(value) {
            return self.dictionary.var_ref(path).ok_or_else(|| EngineError::UnknownTokenReference {
                token: prop.to_string(),
                reference: path.to_string(),
            });
        }

        let resolved = match config.and_then(|c| c.values.as_ref()) {
            Some(Shorthand::Value(category)) => self.dictionary.var_ref(&format!("{}.{}", category, value)),
            Some(Shorthand::Record(aliases)) => aliases.get(value).cloned(),
            None => None,
        };

        Ok(resolved.unwrap_or_else(|| value.to_string()))
    }
}

impl UtilityResolver for CssUtility {
    fn resolve(&self, prop: &str, value: &str) -> Result<Vec<Declaration>, EngineError> {
        let config = self.configs.get(prop);
        let resolved = self.resolve_value(prop, config, value)?;

        let Some(config) = config else {
            return Ok(vec![Declaration::new(prop, resolved)]);
        };

        let declarations = config
            .property
            .normalize()
            .into_iter()
            .map(|(property, template)| Declaration::new(property, template.replace(VALUE_PLACEHOLDER, &resolved)))
            .collect();

        Ok(declarations)
    }

    fn class_name(&self, prop: &str, value: &str) -> String {
        let prefix = self.configs.get(prop).and_then(|c| c.class_name.as_deref()).unwrap_or(prop);
        atomic_class(prefix, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TokenNode, TokenSet};
    use crate::engine::TokenMap;
    use crate::merge::merge_utilities;
    use std::collections::BTreeMap;

    fn dictionary() -> Arc<dyn TokenDictionary> {
        let mut red = BTreeMap::new();
        red.insert("500".to_string(), TokenNode::Text("#ef4444".to_string()));
        let mut colors = BTreeMap::new();
        colors.insert("red".to_string(), TokenNode::Group(red));
        let mut spacing = BTreeMap::new();
        spacing.insert("2".to_string(), TokenNode::Text("8px".to_string()));
        let mut tokens = TokenSet::new();
        tokens.insert("colors".to_string(), TokenNode::Group(colors));
        tokens.insert("spacing".to_string(), TokenNode::Group(spacing));
        Arc::new(TokenMap::new(&tokens, &TokenSet::new(), None).unwrap())
    }

    fn utilities() -> Vec<UtilityConfig> {
        let mut px = BTreeMap::new();
        px.insert("padding-left".to_string(), "{value}".to_string());
        px.insert("padding-right".to_string(), "{value}".to_string());
        let mut radii = BTreeMap::new();
        radii.insert("full".to_string(), "9999px".to_string());
        vec![
            UtilityConfig {
                name: "bg".to_string(),
                class_name: None,
                property: Shorthand::from("background-color"),
                values: Some(Shorthand::from("colors")),
            },
            UtilityConfig {
                name: "px".to_string(),
                class_name: None,
                property: Shorthand::Record(px),
                values: Some(Shorthand::from("spacing")),
            },
            UtilityConfig {
                name: "rounded".to_string(),
                class_name: None,
                property: Shorthand::from("border-radius"),
                values: Some(Shorthand::Record(radii)),
            },
        ]
    }

    fn resolver() -> CssUtility {
        CssUtility::new(dictionary(), merge_utilities(&utilities())).unwrap()
    }

    #[test]
    fn test_resolve_category_token() {
        let decls = resolver().resolve("bg", "red.500").unwrap();
        assert_eq!(decls, vec![Declaration::new("background-color", "var(--colors-red-500)")]);
    }

    #[test]
    fn test_resolve_raw_value_fallback() {
        let decls = resolver().resolve("bg", "transparent").unwrap();
        assert_eq!(decls, vec![Declaration::new("background-color", "transparent")]);
    }

    #[test]
    fn test_resolve_record_property() {
        let decls = resolver().resolve("px", "2").unwrap();
        assert_eq!(
            decls,
            vec![
                Declaration::new("padding-left", "var(--spacing-2)"),
                Declaration::new("padding-right", "var(--spacing-2)"),
            ]
        );
    }

    #[test]
    fn test_resolve_alias_record() {
        let decls = resolver().resolve("rounded", "full").unwrap();
        assert_eq!(decls, vec![Declaration::new("border-radius", "9999px")]);
    }

    #[test]
    fn test_unknown_property_passes_through() {
        let r = resolver();
        assert!(!r.has("display"));
        let decls = r.resolve("display", "flex").unwrap();
        assert_eq!(decls, vec![Declaration::new("display", "flex")]);
    }

    #[test]
    fn test_explicit_reference() {
        let decls = resolver().resolve("color", "{colors.red.500}").unwrap();
        assert_eq!(decls, vec![Declaration::new("color", "var(--colors-red-500)")]);

        let err = resolver().resolve("color", "{colors.blue.500}").unwrap_err();
        assert!(matches!(err, EngineError::UnknownTokenReference { .. }));
    }

    #[test]
    fn test_class_name_uses_configured_prefix() {
        let mut configs = utilities();
        configs[0].class_name = Some("bgc".to_string());
        let r = CssUtility::new(dictionary(), merge_utilities(&configs)).unwrap();
        assert_eq!(r.class_name("bg", "red.500"), "bgc_red.500");
        assert_eq!(r.class_name("display", "flex"), "display_flex");
    }

    #[test]
    fn test_empty_property_record_rejected() {
        let bad = vec![UtilityConfig {
            name: "nothing".to_string(),
            class_name: None,
            property: Shorthand::Record(BTreeMap::new()),
            values: None,
        }];
        let err = CssUtility::new(dictionary(), merge_utilities(&bad)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidUtility { .. }));
    }
}
