//! Secrets directory input source.

use super::input_source::priority;
use super::{InputSource, SourceKind};
use crate::error::{InputError, Result};
use crate::map::InputMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Directory of secret files, one input per file.
///
/// The file name is the input name and the trimmed file contents are the
/// value, the layout used by Docker and Kubernetes secret mounts.
/// Subdirectories are ignored. A missing directory contributes no inputs.
///
/// # Examples
///
/// ```rust,no_run
/// use directed_inputs::sources::SecretsDirSource;
///
/// let source = SecretsDirSource::new("/run/secrets");
/// ```
pub struct SecretsDirSource {
    dir: PathBuf,
    priority: i32,
}

impl SecretsDirSource {
    /// Create a source reading files from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            priority: priority::SECRETS,
        }
    }

    /// Set the priority for this source.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl InputSource for SecretsDirSource {
    fn load(&self, case_sensitive: bool) -> Result<InputMap> {
        let mut map = InputMap::new(case_sensitive);

        if !self.dir.is_dir() {
            tracing::warn!(dir = %self.dir.display(), "secrets directory does not exist");
            return Ok(map);
        }

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let file_name = entry.file_name();
            let Some(name) = file_name.to_str().map(str::to_string) else {
                tracing::warn!(path = %entry.path().display(), "skipping secret with non UTF-8 name");
                continue;
            };

            let bytes = fs::read(entry.path())?;
            let contents = String::from_utf8(bytes).map_err(|e| {
                InputError::source_decode(
                    self.name(),
                    String::from_utf8_lossy(e.as_bytes()).into_owned(),
                    format!("secret {} is not valid UTF-8", name),
                )
            })?;

            map.insert(name, Value::String(contents.trim().to_string()));
        }

        Ok(map)
    }

    fn name(&self) -> String {
        format!("secrets:{}", self.dir.display())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Secrets
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
