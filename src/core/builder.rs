//! Builder for constructing InputStore instances.

use crate::core::{InputSettings, InputStore, SourceOrder, SourceResolver};
use crate::error::Result;
use crate::map::MergeStrategy;
use crate::sources::{
    DotenvSource, EnvSource, FileSource, InitSource, InputSource, SecretsDirSource, StdinSource,
};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Builder for constructing an `InputStore`.
///
/// Provides a fluent interface for choosing sources and how they merge.
///
/// Default source order, lowest priority first: settings files, dotenv file,
/// secrets directory, environment, stdin, init inputs.
///
/// # Examples
///
/// ```rust,no_run
/// use directed_inputs::prelude::*;
///
/// # fn example() -> Result<()> {
/// let store = InputStore::builder()
///     .with_dotenv(".env")
///     .with_secrets_dir("/run/secrets")
///     .with_input("region", "eu-west-1")
///     .from_stdin(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct InputStoreBuilder {
    inputs: Map<String, Value>,
    settings: Option<InputSettings>,
    from_environment: Option<bool>,
    from_stdin: Option<bool>,
    override_stdin: Option<bool>,
    case_sensitive: bool,
    file_paths: Vec<PathBuf>,
    dotenv_path: Option<PathBuf>,
    secrets_dir: Option<PathBuf>,
    env_source: Option<EnvSource>,
    stdin_source: Option<StdinSource>,
    custom_sources: Vec<Box<dyn InputSource>>,
    order: Option<SourceOrder>,
    merge: MergeStrategy,
}

impl InputStoreBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            inputs: Map::new(),
            settings: None,
            from_environment: None,
            from_stdin: None,
            override_stdin: None,
            case_sensitive: false,
            file_paths: Vec::new(),
            dotenv_path: None,
            secrets_dir: None,
            env_source: None,
            stdin_source: None,
            custom_sources: Vec::new(),
            order: None,
            merge: MergeStrategy::default(),
        }
    }

    /// Set the init inputs, replacing any added so far.
    ///
    /// Init inputs have the highest priority by default.
    pub fn with_inputs(mut self, inputs: Map<String, Value>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Add a single init input.
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inputs.insert(key.into(), value.into());
        self
    }

    /// Use these settings instead of reading `DIRECTED_INPUTS_*` from the environment.
    pub fn with_settings(mut self, settings: InputSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Enable or disable the environment source.
    pub fn from_environment(mut self, enabled: bool) -> Self {
        self.from_environment = Some(enabled);
        self
    }

    /// Enable or disable the stdin source.
    pub fn from_stdin(mut self, enabled: bool) -> Self {
        self.from_stdin = Some(enabled);
        self
    }

    /// Never read stdin, even when it is enabled.
    pub fn override_stdin(mut self, override_stdin: bool) -> Self {
        self.override_stdin = Some(override_stdin);
        self
    }

    /// Compare keys case-sensitively. Off by default.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Add a settings file with automatic format detection.
    ///
    /// Supported formats: YAML (.yaml, .yml), TOML (.toml), JSON (.json)
    ///
    /// Files are added in the order they are specified. Later files have higher
    /// priority and will override earlier files.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_paths.push(path.into());
        self
    }

    /// Read a dotenv file.
    pub fn with_dotenv(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_path = Some(path.into());
        self
    }

    /// Read a directory of secret files.
    pub fn with_secrets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.secrets_dir = Some(dir.into());
        self
    }

    /// Use this environment source when the environment is enabled.
    pub fn with_env_source(mut self, source: EnvSource) -> Self {
        self.env_source = Some(source);
        self
    }

    /// Use this stdin source when stdin is enabled.
    pub fn with_stdin_source(mut self, source: StdinSource) -> Self {
        self.stdin_source = Some(source);
        self
    }

    /// Add a custom input source.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use directed_inputs::prelude::*;
    /// use directed_inputs::sources::FileSource;
    ///
    /// let custom_source = FileSource::new("inputs/overrides.yaml").with_priority(450);
    ///
    /// InputStore::builder().with_source(custom_source);
    /// ```
    pub fn with_source<S: InputSource + 'static>(mut self, source: S) -> Self {
        self.custom_sources.push(Box::new(source));
        self
    }

    /// Reorder or filter the sources before they are merged.
    ///
    /// The function receives the enabled sources in default order and
    /// returns the sequence to merge; later entries win.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use directed_inputs::prelude::*;
    /// use directed_inputs::sources::SourceKind;
    ///
    /// // Let the environment override init inputs
    /// let builder = InputStore::builder().with_source_order(|mut sources| {
    ///     sources.sort_by_key(|s| s.kind() == SourceKind::Environment);
    ///     sources
    /// });
    /// ```
    pub fn with_source_order<F>(mut self, order: F) -> Self
    where
        F: for<'a> Fn(Vec<&'a dyn InputSource>) -> Vec<&'a dyn InputSource> + Send + Sync + 'static,
    {
        self.order = Some(Box::new(order));
        self
    }

    /// Strategy used when thawing into non-empty inputs.
    pub fn with_merge_strategy(mut self, merge: MergeStrategy) -> Self {
        self.merge = merge;
        self
    }

    /// Build the store.
    ///
    /// This resolves all enabled sources once.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `DIRECTED_INPUTS_*` settings cannot be read
    /// - Any enabled source fails to load or parse
    pub fn build(self) -> Result<InputStore> {
        let settings = match self.settings {
            Some(settings) => settings,
            None => InputSettings::from_env()?,
        };
        let from_environment = self.from_environment.unwrap_or(settings.from_environment);
        let from_stdin = self.from_stdin.unwrap_or(settings.from_stdin);
        let override_stdin = self.override_stdin.unwrap_or(settings.override_stdin);

        let mut resolver = SourceResolver::new(self.case_sensitive);

        // Add file sources with increasing priority
        for (index, path) in self.file_paths.iter().enumerate() {
            let priority = 100 + (index as i32 * 10); // 100, 110, 120, etc.
            resolver.add_source(Box::new(FileSource::new(path).with_priority(priority)));
        }

        if let Some(path) = self.dotenv_path {
            resolver.add_source(Box::new(DotenvSource::new(path)));
        }

        if let Some(dir) = self.secrets_dir {
            resolver.add_source(Box::new(SecretsDirSource::new(dir)));
        }

        if from_environment {
            resolver.add_source(Box::new(self.env_source.unwrap_or_default()));
        }

        if from_stdin {
            let mut stdin = self.stdin_source.unwrap_or_default();
            if override_stdin {
                stdin = stdin.with_override(true);
            }
            resolver.add_source(Box::new(stdin));
        }

        resolver.add_source(Box::new(InitSource::new(self.inputs)));

        for source in self.custom_sources {
            resolver.add_source(source);
        }

        if let Some(order) = self.order {
            resolver.set_order(order);
        }

        tracing::debug!(
            sources = ?resolver.source_names(),
            from_environment,
            from_stdin,
            override_stdin,
            "building input store"
        );

        let active = resolver.resolve()?;
        Ok(InputStore::with_resolver(active, resolver, self.merge))
    }
}

impl Default for InputStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
