//! Structured settings file source.

use super::input_source::priority;
use super::{InputSource, SourceKind};
use crate::error::{InputError, Result};
use crate::map::InputMap;
use config::File;
use std::path::PathBuf;

/// Settings file source.
///
/// Loads top-level inputs from YAML, TOML, or JSON files with automatic
/// format detection based on file extension.
///
/// # Examples
///
/// ```rust,no_run
/// use directed_inputs::sources::FileSource;
///
/// let source = FileSource::new("inputs/defaults.yaml");
/// ```
pub struct FileSource {
    path: PathBuf,
    priority: i32,
}

impl FileSource {
    /// Create a new file source with automatic format detection.
    ///
    /// The format is detected from the file extension:
    /// - `.yaml`, `.yml` -> YAML
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            priority: priority::FILE,
        }
    }

    /// Set the priority for this source.
    ///
    /// Higher priority sources override lower priority ones.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Validate that the file extension is supported.
    fn validate_extension(&self) -> Result<()> {
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                InputError::source_load(
                    self.name(),
                    format!("unable to determine file format for: {}", self.path.display()),
                )
            })?;

        match extension {
            "yaml" | "yml" | "toml" | "json" => Ok(()),
            _ => Err(InputError::source_load(
                self.name(),
                format!(
                    "unsupported file extension: {}. Supported: .yaml, .yml, .toml, .json",
                    extension
                ),
            )),
        }
    }
}

impl InputSource for FileSource {
    fn load(&self, case_sensitive: bool) -> Result<InputMap> {
        self.validate_extension()?;

        if !self.path.exists() {
            return Err(InputError::source_load(
                self.name(),
                format!("file not found: {}", self.path.display()),
            ));
        }

        let settings = config::Config::builder()
            .add_source(File::from(self.path.clone()).required(true))
            .build()
            .map_err(|e| InputError::source_load(self.name(), e))?;

        let object = settings
            .try_deserialize::<serde_json::Map<String, serde_json::Value>>()
            .map_err(|e| InputError::source_decode(self.name(), self.path.display().to_string(), e))?;

        Ok(InputMap::from_object(object, case_sensitive))
    }

    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::File
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
