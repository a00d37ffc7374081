//! # directed-inputs
//!
//! Directed input aggregation for tools that take their configuration from
//! several places at once.
//!
//! ## Overview
//!
//! `directed-inputs` merges named inputs from an ordered list of sources into
//! a single case-insensitive map and gives typed access to it:
//! - Default source order, last wins: dotenv file, secrets directory,
//!   environment, JSON on stdin, init inputs
//! - Caller-supplied reordering or filtering of sources
//! - Layered decoding of values (Base64, then UTF-8 text, then YAML or JSON)
//! - Boolean, integer and float coercion with required and default handling
//! - Freeze, thaw and shift of the active input set
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use directed_inputs::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let mut store = InputStore::builder()
//!     .with_dotenv(".env")
//!     .with_input("region", "eu-west-1")
//!     .from_stdin(true)
//!     .build()?;
//!
//! let region = store.require("REGION")?;
//! let workers = store.get_integer("workers")?.unwrap_or(4);
//! let labels = store.decode_input("labels", DecodeOptions::new(DecodeType::JsonBase64))?;
//!
//! // Hide everything from later readers, then bring it back
//! store.freeze();
//! store.thaw();
//! # let _ = (region, workers, labels);
//! # Ok(())
//! # }
//! ```
//!
//! ## Settings
//!
//! `DIRECTED_INPUTS_FROM_ENVIRONMENT`, `DIRECTED_INPUTS_FROM_STDIN` and
//! `OVERRIDE_STDIN` are read when a store is built. Builder flags take
//! precedence over them.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod codec;
pub mod core;
pub mod error;
pub mod map;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::codec::{Coercion, DecodeType};
    pub use crate::core::{
        DecodeOptions, GetOptions, InputKind, InputSettings, InputSpec, InputStore,
        InputStoreBuilder,
    };
    pub use crate::error::{InputError, Result, ValidationError};
    pub use crate::map::InputMap;

    #[cfg(feature = "validation")]
    pub use crate::core::Validate;
}
