//! Reference engine wiring [`TokenMap`], [`CssUtility`],
//! [`CompiledConditions`] and [`AtomicStylesheet`] together.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{
    AtomicStylesheet, CompiledConditions, CssUtility, Engine, EngineError, Stylesheet, TokenDictionary,
    TokenMap, UtilityResolver,
};
use crate::config::{TokenSet, UtilityConfig};
use crate::context::GeneratorContext;
use crate::merge::NamedCollection;

#[derive(Debug, Clone, Copy, Default)]
pub struct BasicEngine;

impl Engine for BasicEngine {
    fn token_dictionary(
        &self,
        tokens: &TokenSet,
        semantic_tokens: &TokenSet,
        prefix: Option<&str>,
    ) -> Result<Arc<dyn TokenDictionary>, EngineError> {
        Ok(Arc::new(TokenMap::new(tokens, semantic_tokens, prefix)?))
    }

    fn utility_resolver(
        &self,
        dictionary: Arc<dyn TokenDictionary>,
        utilities: &NamedCollection<UtilityConfig>,
    ) -> Result<Arc<dyn UtilityResolver>, EngineError> {
        Ok(Arc::new(CssUtility::new(dictionary, utilities.clone())?))
    }

    fn compile_conditions(
        &self,
        conditions: &BTreeMap<String, String>,
        breakpoints: &BTreeMap<String, String>,
    ) -> Result<CompiledConditions, EngineError> {
        CompiledConditions::compile(conditions, breakpoints)
    }

    fn stylesheet(&self, context: GeneratorContext) -> Result<Box<dyn Stylesheet>, EngineError> {
        Ok(Box::new(AtomicStylesheet::new(context)))
    }
}
