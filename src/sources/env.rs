//! Environment variable input source.

use super::input_source::priority;
use super::{InputSource, SourceKind};
use crate::error::Result;
use crate::map::InputMap;
use serde_json::Value;

/// Environment variable input source.
///
/// Takes a snapshot of the whole process environment each time it is
/// loaded. Every variable becomes a string input under its own name.
///
/// # Examples
///
/// ```rust
/// use directed_inputs::sources::{EnvSource, InputSource};
///
/// let source = EnvSource::from_vars([("REGION", "eu-west-1")]);
/// let inputs = source.load(false).unwrap();
/// assert_eq!(inputs.get("region").unwrap(), "eu-west-1");
/// ```
pub struct EnvSource {
    vars: Option<Vec<(String, String)>>,
    priority: i32,
}

impl EnvSource {
    /// Read from the process environment.
    pub fn new() -> Self {
        Self {
            vars: None,
            priority: priority::ENVIRONMENT,
        }
    }

    /// Read from a fixed set of variables instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: Some(
                vars.into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
            priority: priority::ENVIRONMENT,
        }
    }

    /// Set the priority for this source.
    ///
    /// Higher priority sources override lower priority ones.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn snapshot(&self) -> Vec<(String, String)> {
        match &self.vars {
            Some(vars) => vars.clone(),
            // Non-UTF-8 names or values are rendered lossily rather than dropped
            None => std::env::vars_os()
                .map(|(key, value)| {
                    (
                        key.to_string_lossy().into_owned(),
                        value.to_string_lossy().into_owned(),
                    )
                })
                .collect(),
        }
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for EnvSource {
    fn load(&self, case_sensitive: bool) -> Result<InputMap> {
        let mut map = InputMap::new(case_sensitive);
        map.extend(
            self.snapshot()
                .into_iter()
                .map(|(key, value)| (key, Value::String(value))),
        );
        Ok(map)
    }

    fn name(&self) -> String {
        "env".to_string()
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Environment
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
