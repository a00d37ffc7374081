//! Dotenv file input source.

use super::input_source::priority;
use super::{InputSource, SourceKind};
use crate::error::{InputError, Result};
use crate::map::InputMap;
use serde_json::Value;
use std::path::PathBuf;

/// Dotenv-style `KEY=value` file source.
///
/// The file is parsed without touching the process environment. A missing
/// file contributes no inputs.
///
/// # Examples
///
/// ```rust,no_run
/// use directed_inputs::sources::DotenvSource;
///
/// let source = DotenvSource::new(".env");
/// ```
pub struct DotenvSource {
    path: PathBuf,
    priority: i32,
}

impl DotenvSource {
    /// Create a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            priority: priority::DOTENV,
        }
    }

    /// Set the priority for this source.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl InputSource for DotenvSource {
    fn load(&self, case_sensitive: bool) -> Result<InputMap> {
        let mut map = InputMap::new(case_sensitive);

        let iter = match dotenvy::from_path_iter(&self.path) {
            Ok(iter) => iter,
            Err(e) if e.not_found() => {
                tracing::debug!(path = %self.path.display(), "dotenv file not found, skipping");
                return Ok(map);
            }
            Err(e) => return Err(InputError::source_load(self.name(), e)),
        };

        for item in iter {
            match item {
                Ok((key, value)) => {
                    map.insert(key, Value::String(value));
                }
                Err(dotenvy::Error::LineParse(line, index)) => {
                    return Err(InputError::source_decode(
                        self.name(),
                        line,
                        format!("invalid dotenv line at index {}", index),
                    ));
                }
                Err(e) => return Err(InputError::source_load(self.name(), e)),
            }
        }

        Ok(map)
    }

    fn name(&self) -> String {
        format!("dotenv:{}", self.path.display())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Dotenv
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_dotenv_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, "# comment\nDB_HOST=localhost\nDB_PORT=5432\nQUOTED=\"two words\"\n").unwrap();

        let map = DotenvSource::new(&path).load(false).unwrap();
        assert_eq!(map.get("db_host"), Some(&json!("localhost")));
        assert_eq!(map.get("DB_PORT"), Some(&json!("5432")));
        assert_eq!(map.get("quoted"), Some(&json!("two words")));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let map = DotenvSource::new(temp_dir.path().join("absent.env"))
            .load(false)
            .unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_malformed_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, "GOOD=1\nthis line is not valid\n").unwrap();

        let err = DotenvSource::new(&path).load(false).unwrap_err();
        assert!(matches!(err, InputError::SourceDecode { .. }));
    }

    #[test]
    fn test_kind_and_priority() {
        let source = DotenvSource::new(".env");
        assert_eq!(source.kind(), SourceKind::Dotenv);
        assert_eq!(source.priority(), 200);
        assert_eq!(source.with_priority(10).priority(), 10);
    }
}
