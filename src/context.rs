//! Build context containing configuration and state for a build.
//!
//! A [`BuildContext`] is assembled once per pipeline invocation from a loaded
//! [`StyleConfig`]. It resolves the project root, derives the
//! [`OutputLayout`], merges declarations, and asks the [`Engine`] for the
//! token dictionary, utility resolver, compiled conditions and stylesheet.
//!
//! Generation passes each take a fresh [`GeneratorContext`] from
//! [`BuildContext::context`]; a pass never sees nodes appended by another.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::assets::{AssetStore, OutputCss};
use crate::config::{load_config, ConfigError, PatternConfig, RecipeConfig, StyleConfig, UtilityConfig};
use crate::engine::{CompiledConditions, Engine, EngineError, Stylesheet, TokenDictionary, UtilityResolver};
use crate::layout::{exclude_list, ImportMap, OutputLayout};
use crate::merge::{merge_patterns, merge_recipes, merge_utilities, NamedCollection};
use crate::shorthand::TransformHelpers;
use crate::style_tree::{Declaration, StyleRoot};

/// Error while assembling a build context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Config file could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// An engine collaborator failed
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// The process working directory is unavailable
    #[error("Failed to resolve project root: {0}")]
    Cwd(#[source] io::Error),
    /// An output directory could not be created
    #[error("Failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-pass generation state.
///
/// Owns an empty [`StyleRoot`] when created; everything else is shared with
/// the producer it came from.
#[derive(Debug, Clone)]
pub struct GeneratorContext {
    /// Style tree this pass appends to
    pub root: StyleRoot,
    /// Breakpoint name -> minimum width
    pub breakpoints: BTreeMap<String, String>,
    /// Compiled conditions, breakpoints included
    pub conditions: CompiledConditions,
    /// Helper functions for transforms
    pub helpers: TransformHelpers,
    utilities: Arc<dyn UtilityResolver>,
}

impl GeneratorContext {
    /// Resolve a style property through the utility resolver.
    pub fn transform(&self, prop: &str, value: &str) -> Result<Vec<Declaration>, EngineError> {
        self.utilities.resolve(prop, value)
    }

    /// Atomic class name the resolver assigns to a property/value pair.
    pub fn class_name(&self, prop: &str, value: &str) -> String {
        self.utilities.class_name(prop, value)
    }
}

/// Produces fresh [`GeneratorContext`]s.
///
/// Holds exactly the values every context shares; calling
/// [`context`](Self::context) never mutates it.
#[derive(Debug, Clone)]
pub struct ContextProducer {
    breakpoints: BTreeMap<String, String>,
    conditions: CompiledConditions,
    helpers: TransformHelpers,
    utilities: Arc<dyn UtilityResolver>,
}

impl ContextProducer {
    pub fn new(
        breakpoints: BTreeMap<String, String>,
        conditions: CompiledConditions,
        helpers: TransformHelpers,
        utilities: Arc<dyn UtilityResolver>,
    ) -> Self {
        Self { breakpoints, conditions, helpers, utilities }
    }

    /// A new generator context with an empty style root.
    pub fn context(&self) -> GeneratorContext {
        GeneratorContext {
            root: StyleRoot::new(),
            breakpoints: self.breakpoints.clone(),
            conditions: self.conditions.clone(),
            helpers: self.helpers,
            utilities: Arc::clone(&self.utilities),
        }
    }
}

/// Resolved configuration, layout, merged declarations and engine handles
/// for one generation run.
#[derive(Debug)]
pub struct BuildContext {
    config: StyleConfig,
    root: PathBuf,
    paths: OutputLayout,
    exclude: Vec<String>,
    import_map: ImportMap,
    utility_configs: NamedCollection<UtilityConfig>,
    recipes: NamedCollection<RecipeConfig>,
    patterns: NamedCollection<PatternConfig>,
    dictionary: Arc<dyn TokenDictionary>,
    utilities: Arc<dyn UtilityResolver>,
    stylesheet: Box<dyn Stylesheet>,
    assets: AssetStore,
    output_css: OutputCss,
    helpers: TransformHelpers,
    producer: ContextProducer,
}

impl BuildContext {
    /// Assemble a build context.
    ///
    /// The project root is `config.cwd` (relative values are taken from the
    /// process working directory), or the working directory itself when
    /// unset. It is read here once and never again.
    ///
    /// Engine errors are returned unchanged inside [`ContextError::Engine`].
    pub fn new(config: StyleConfig, engine: &dyn Engine) -> Result<Self, ContextError> {
        let root = resolve_root(config.cwd.as_deref()).map_err(ContextError::Cwd)?;
        let paths = OutputLayout::new(&root, &config.outdir);

        let dictionary = engine.token_dictionary(&config.tokens, &config.semantic_tokens, config.prefix())?;

        let utility_configs = merge_utilities(&config.utilities);
        let utilities = engine.utility_resolver(Arc::clone(&dictionary), &utility_configs)?;

        let helpers = TransformHelpers;
        let conditions = engine.compile_conditions(&config.conditions, &config.breakpoints)?;
        let producer =
            ContextProducer::new(config.breakpoints.clone(), conditions, helpers, Arc::clone(&utilities));

        let stylesheet = engine.stylesheet(producer.context())?;

        let recipes = merge_recipes(&config.recipes, utilities.as_ref())?;
        let patterns = merge_patterns(&config.patterns);

        let assets = AssetStore::new(paths.asset.clone());
        let output_css = OutputCss::new(paths.styles.clone());

        tracing::info!(
            root = %root.display(),
            outdir = %config.outdir,
            utilities = utility_configs.len(),
            recipes = recipes.len(),
            patterns = patterns.len(),
            "build context ready"
        );

        Ok(Self {
            exclude: exclude_list(&config.outdir, &config.exclude),
            import_map: ImportMap::new(&config.outdir),
            config,
            root,
            paths,
            utility_configs,
            recipes,
            patterns,
            dictionary,
            utilities,
            stylesheet,
            assets,
            output_css,
            helpers,
            producer,
        })
    }

    /// Load a config (discovering it when `path` is `None`) and assemble.
    pub fn from_config_file(path: Option<&Path>, engine: &dyn Engine) -> Result<Self, ContextError> {
        let config = load_config(path)?;
        Self::new(config, engine)
    }

    /// A fresh generator context. Call once per generation pass.
    pub fn context(&self) -> GeneratorContext {
        self.producer.context()
    }

    pub fn producer(&self) -> &ContextProducer {
        &self.producer
    }

    /// The configuration this context was built from.
    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// Absolute project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn outdir(&self) -> &str {
        &self.config.outdir
    }

    pub fn breakpoints(&self) -> &BTreeMap<String, String> {
        &self.config.breakpoints
    }

    pub fn paths(&self) -> &OutputLayout {
        &self.paths
    }

    /// Base ignore list, output directory, then user exclusions.
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    pub fn import_map(&self) -> &ImportMap {
        &self.import_map
    }

    /// Merged utility declarations.
    pub fn utility_configs(&self) -> &NamedCollection<UtilityConfig> {
        &self.utility_configs
    }

    /// Merged recipes with styles expanded through the utility resolver.
    pub fn recipes(&self) -> &NamedCollection<RecipeConfig> {
        &self.recipes
    }

    pub fn patterns(&self) -> &NamedCollection<PatternConfig> {
        &self.patterns
    }

    pub fn dictionary(&self) -> &dyn TokenDictionary {
        self.dictionary.as_ref()
    }

    pub fn utilities(&self) -> &dyn UtilityResolver {
        self.utilities.as_ref()
    }

    pub fn stylesheet(&self) -> &dyn Stylesheet {
        self.stylesheet.as_ref()
    }

    pub fn stylesheet_mut(&mut self) -> &mut dyn Stylesheet {
        self.stylesheet.as_mut()
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn output_css(&self) -> &OutputCss {
        &self.output_css
    }

    pub fn helpers(&self) -> &TransformHelpers {
        &self.helpers
    }

    /// Create every output directory of the layout.
    ///
    /// The asset store never creates directories itself; this is the
    /// bootstrap step to run before first use.
    pub fn ensure_dirs(&self) -> Result<(), ContextError> {
        for dir in self.paths.directories() {
            fs::create_dir_all(dir)
                .map_err(|source| ContextError::CreateDir { path: dir.to_path_buf(), source })?;
        }
        Ok(())
    }
}

/// Absolute, lexically normalized project root.
fn resolve_root(cwd: Option<&Path>) -> io::Result<PathBuf> {
    let root = match cwd {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => env::current_dir()?.join(p),
        None => env::current_dir()?,
    };
    Ok(normalize_path(&root))
}

/// Drop `.` components and fold `..` into its parent without touching disk.
fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BasicEngine;

    fn config_at(root: &str) -> StyleConfig {
        StyleConfig { cwd: Some(PathBuf::from(root)), ..Default::default() }
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize_path(Path::new("/a/b/")), PathBuf::from("/a/b"));
        assert_eq!(normalize_path(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn test_resolve_root_absolute() {
        assert_eq!(resolve_root(Some(Path::new("/proj/./app"))).unwrap(), PathBuf::from("/proj/app"));
    }

    #[test]
    fn test_resolve_root_relative_is_absolute() {
        let root = resolve_root(Some(Path::new("sub"))).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("sub"));
    }

    #[test]
    fn test_build_context_paths() {
        let ctx = BuildContext::new(config_at("/proj"), &BasicEngine).unwrap();
        assert_eq!(ctx.root(), Path::new("/proj"));
        assert_eq!(ctx.paths().css, PathBuf::from("/proj/styled-system/css"));
        assert_eq!(ctx.assets().dir(), Path::new("/proj/styled-system/assets"));
        assert_eq!(ctx.output_css().path(), Path::new("/proj/styled-system/styles.css"));
    }

    #[test]
    fn test_build_context_exclude_and_import_map() {
        let mut config = config_at("/proj");
        config.exclude = vec!["legacy/**".to_string()];
        let ctx = BuildContext::new(config, &BasicEngine).unwrap();

        assert_eq!(ctx.exclude(), &["node_modules", ".git", "styled-system", "legacy/**"]);
        assert_eq!(ctx.import_map().css, "styled-system/css");
        assert_eq!(ctx.import_map().recipe, "styled-system/recipes");
        assert_eq!(ctx.import_map().pattern, "styled-system/patterns");
    }

    #[test]
    fn test_context_roots_are_independent() {
        let ctx = BuildContext::new(config_at("/proj"), &BasicEngine).unwrap();

        let mut first = ctx.context();
        first.root.append(crate::style_tree::StyleNode::rule(".x", vec![]));
        let second = ctx.context();

        assert_eq!(first.root.len(), 1);
        assert!(second.root.is_empty());
    }

    #[test]
    fn test_engine_error_surfaces_unchanged() {
        let mut config = config_at("/proj");
        config.conditions.insert("broken".to_string(), "hover".to_string());

        let err = BuildContext::new(config, &BasicEngine).unwrap_err();
        match err {
            ContextError::Engine(EngineError::InvalidCondition { name, .. }) => assert_eq!(name, "broken"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
