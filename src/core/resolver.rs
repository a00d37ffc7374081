//! Resolver that merges multiple input sources.

use crate::error::Result;
use crate::map::InputMap;
use crate::sources::InputSource;

/// Function that reorders or filters the sources before they are merged.
///
/// It receives the sources in default (ascending priority) order and returns
/// the sequence to merge; later entries win.
pub type SourceOrder =
    Box<dyn for<'a> Fn(Vec<&'a dyn InputSource>) -> Vec<&'a dyn InputSource> + Send + Sync>;

/// Resolves and merges inputs from multiple sources.
///
/// Sources are sorted by priority and merged in order (lower priority first,
/// higher priority sources override), unless a custom ordering function is
/// installed.
pub struct SourceResolver {
    sources: Vec<Box<dyn InputSource>>,
    order: Option<SourceOrder>,
    case_sensitive: bool,
}

impl SourceResolver {
    /// Create a resolver with no sources.
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            sources: Vec::new(),
            order: None,
            case_sensitive,
        }
    }

    /// Add an input source.
    pub fn add_source(&mut self, source: Box<dyn InputSource>) {
        self.sources.push(source);
    }

    /// Install a custom ordering function.
    pub fn set_order<F>(&mut self, order: F)
    where
        F: for<'a> Fn(Vec<&'a dyn InputSource>) -> Vec<&'a dyn InputSource> + Send + Sync + 'static,
    {
        self.order = Some(Box::new(order));
    }

    /// Whether resolved maps fold key case.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// The sources in the order they will be merged.
    pub fn ordered(&self) -> Vec<&dyn InputSource> {
        let mut sorted: Vec<&dyn InputSource> = self.sources.iter().map(|s| &**s).collect();
        sorted.sort_by_key(|s| s.priority());

        match &self.order {
            Some(order) => order(sorted),
            None => sorted,
        }
    }

    /// Load and merge inputs from all sources.
    ///
    /// Each source's inputs are overlaid onto the accumulated map, so a key
    /// present in several sources takes the value of the last one.
    ///
    /// # Errors
    ///
    /// Returns the first source error; sources after it are not loaded.
    pub fn resolve(&self) -> Result<InputMap> {
        let mut merged = InputMap::new(self.case_sensitive);

        for source in self.ordered() {
            let inputs = source.load(self.case_sensitive)?;
            tracing::debug!(
                source = %source.name(),
                kind = %source.kind(),
                keys = inputs.len(),
                "resolved input source"
            );
            merged.overlay(inputs);
        }

        Ok(merged)
    }

    /// Get the list of source names in merge order.
    pub fn source_names(&self) -> Vec<String> {
        self.ordered().iter().map(|s| s.name()).collect()
    }
}

impl Default for SourceResolver {
    fn default() -> Self {
        Self::new(false)
    }
}
