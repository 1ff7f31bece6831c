//! Name-keyed merging of utility, recipe and pattern declarations
//!
//! Declarations arrive as ordered lists. Merging folds them into a table keyed
//! by name; when a name repeats, the later declaration replaces the earlier
//! one without error.

use std::collections::BTreeMap;

use crate::config::{PatternConfig, RecipeConfig, StyleObject, UtilityConfig};
use crate::engine::{EngineError, UtilityResolver};

/// Declarations keyed by their unique name
pub type NamedCollection<T> = BTreeMap<String, T>;

/// A declaration that carries its own name.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for UtilityConfig {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for RecipeConfig {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for PatternConfig {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Fold `items` into a table keyed by name. Later items win.
pub fn merge_named<T, I>(items: I) -> NamedCollection<T>
where
    T: Named,
    I: IntoIterator<Item = T>,
{
    let mut merged = NamedCollection::new();
    for item in items {
        let name = item.name().to_string();
        if merged.insert(name.clone(), item).is_some() {
            tracing::debug!(%name, "declaration overrides an earlier one with the same name");
        }
    }
    merged
}

pub fn merge_utilities(utilities: &[UtilityConfig]) -> NamedCollection<UtilityConfig> {
    merge_named(utilities.iter().cloned())
}

pub fn merge_patterns(patterns: &[PatternConfig]) -> NamedCollection<PatternConfig> {
    merge_named(patterns.iter().cloned())
}

/// Merge recipes by name, then expand every style object through `utilities`.
///
/// Each `(property, value)` pair is replaced by the declarations the resolver
/// produces for it.
pub fn merge_recipes(
    recipes: &[RecipeConfig],
    utilities: &dyn UtilityResolver,
) -> Result<NamedCollection<RecipeConfig>, EngineError> {
    let mut merged = merge_named(recipes.iter().cloned());

    for recipe in merged.values_mut() {
        recipe.base = expand_style(&recipe.base, utilities)?;
        for options in recipe.variants.values_mut() {
            for style in options.values_mut() {
                *style = expand_style(style, utilities)?;
            }
        }
    }

    Ok(merged)
}

fn expand_style(style: &StyleObject, utilities: &dyn UtilityResolver) -> Result<StyleObject, EngineError> {
    let mut expanded = StyleObject::new();
    for (prop, value) in style {
        for decl in utilities.resolve(prop, value)? {
            expanded.insert(decl.property, decl.value);
        }
    }
    Ok(expanded)
}
