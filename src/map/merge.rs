//! Deep merge used when thawing frozen inputs.

use super::InputMap;
use serde_json::Value;

/// How two sequences are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceMerge {
    /// Incoming items are appended to the existing ones.
    Append,
    /// Set semantics: incoming items not already present are appended.
    Union,
    /// The incoming sequence replaces the existing one.
    Override,
}

/// How two mappings are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingMerge {
    /// Keys are merged recursively.
    Merge,
    /// The incoming mapping replaces the existing one.
    Override,
}

/// How a conflict with no structural strategy is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    /// The incoming value wins.
    Override,
    /// The existing value is kept.
    Keep,
}

/// Per-type strategy table for deep merges.
///
/// The default appends sequences, merges mappings recursively and lets the
/// incoming value win every other conflict.
///
/// # Examples
///
/// ```rust
/// use directed_inputs::map::{MergeStrategy, SequenceMerge};
/// use serde_json::json;
///
/// let strategy = MergeStrategy::default().with_sequences(SequenceMerge::Union);
/// let merged = strategy.merge_values(json!(["a", "b"]), json!(["b", "c"]));
/// assert_eq!(merged, json!(["a", "b", "c"]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeStrategy {
    /// Strategy for two sequences.
    pub sequences: SequenceMerge,
    /// Strategy for two mappings.
    pub mappings: MappingMerge,
    /// Strategy for two values of the same non-structural type.
    pub fallback: ConflictResolution,
    /// Strategy for two values of different types.
    pub type_conflict: ConflictResolution,
}

impl Default for MergeStrategy {
    fn default() -> Self {
        Self {
            sequences: SequenceMerge::Append,
            mappings: MappingMerge::Merge,
            fallback: ConflictResolution::Override,
            type_conflict: ConflictResolution::Override,
        }
    }
}

impl MergeStrategy {
    /// Set the sequence strategy.
    pub fn with_sequences(mut self, sequences: SequenceMerge) -> Self {
        self.sequences = sequences;
        self
    }

    /// Set the mapping strategy.
    pub fn with_mappings(mut self, mappings: MappingMerge) -> Self {
        self.mappings = mappings;
        self
    }

    /// Set the same-type scalar strategy.
    pub fn with_fallback(mut self, fallback: ConflictResolution) -> Self {
        self.fallback = fallback;
        self
    }

    /// Set the mixed-type strategy.
    pub fn with_type_conflict(mut self, type_conflict: ConflictResolution) -> Self {
        self.type_conflict = type_conflict;
        self
    }

    /// Merge `incoming` into `base`.
    pub fn merge_values(&self, base: Value, incoming: Value) -> Value {
        match (base, incoming) {
            (Value::Array(mut existing), Value::Array(items)) => match self.sequences {
                SequenceMerge::Append => {
                    existing.extend(items);
                    Value::Array(existing)
                }
                SequenceMerge::Union => {
                    for item in items {
                        if !existing.contains(&item) {
                            existing.push(item);
                        }
                    }
                    Value::Array(existing)
                }
                SequenceMerge::Override => Value::Array(items),
            },
            (Value::Object(mut existing), Value::Object(entries)) => match self.mappings {
                MappingMerge::Merge => {
                    for (key, value) in entries {
                        let merged = match existing.remove(&key) {
                            Some(current) => self.merge_values(current, value),
                            None => value,
                        };
                        existing.insert(key, merged);
                    }
                    Value::Object(existing)
                }
                MappingMerge::Override => Value::Object(entries),
            },
            (base, incoming) => {
                let resolution = if same_kind(&base, &incoming) {
                    self.fallback
                } else {
                    self.type_conflict
                };
                match resolution {
                    ConflictResolution::Override => incoming,
                    ConflictResolution::Keep => base,
                }
            }
        }
    }

    /// Merge every entry of `incoming` into `base` with the same rules as
    /// [`merge_values`](Self::merge_values).
    pub fn merge_maps(&self, mut base: InputMap, incoming: InputMap) -> InputMap {
        for (key, value) in incoming {
            let merged = match base.remove(&key) {
                Some(current) => self.merge_values(current, value),
                None => value,
            };
            base.insert(key, merged);
        }
        base
    }
}

fn same_kind(a: &Value, b: &Value) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}
