//! Initialization mapping source.

use super::input_source::priority;
use super::{InputSource, SourceKind};
use crate::error::Result;
use crate::map::InputMap;
use serde_json::{Map, Value};

/// Inputs passed directly by the caller.
///
/// Highest priority by default.
pub struct InitSource {
    inputs: Map<String, Value>,
    priority: i32,
}

impl InitSource {
    /// Create a source serving `inputs`.
    pub fn new(inputs: Map<String, Value>) -> Self {
        Self {
            inputs,
            priority: priority::INIT,
        }
    }

    /// Set the priority for this source.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl InputSource for InitSource {
    fn load(&self, case_sensitive: bool) -> Result<InputMap> {
        Ok(InputMap::from_object(self.inputs.clone(), case_sensitive))
    }

    fn name(&self) -> String {
        "init".to_string()
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Init
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
