//! Core input management types.

mod builder;
mod options;
mod resolver;
mod settings;
mod store;

#[cfg(feature = "validation")]
mod validation;

pub use builder::InputStoreBuilder;
pub use options::{InputKind, InputSpec};
pub use resolver::{SourceOrder, SourceResolver};
pub use settings::{ENV_PREFIX, InputSettings, OVERRIDE_STDIN_VAR};
pub use store::{DecodeOptions, GetOptions, InputState, InputStore};

#[cfg(feature = "validation")]
pub use validation::Validate;
