//! Input mappings and the deep-merge strategy table.

mod input_map;
mod merge;

pub use input_map::InputMap;
pub use merge::{ConflictResolution, MappingMerge, MergeStrategy, SequenceMerge};
