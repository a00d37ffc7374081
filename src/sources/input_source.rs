//! Input source trait.

use crate::error::Result;
use crate::map::InputMap;
use std::fmt;

/// What kind of producer a source is.
///
/// Ordering functions use this to pick sources out of the resolver's list
/// without relying on names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Structured settings file (JSON, YAML, TOML).
    File,
    /// Dotenv-style `KEY=value` file.
    Dotenv,
    /// Directory of secret files.
    Secrets,
    /// Process environment.
    Environment,
    /// JSON document on standard input.
    Stdin,
    /// Mapping passed at construction.
    Init,
    /// Anything supplied by the caller.
    Custom,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::File => "file",
            Self::Dotenv => "dotenv",
            Self::Secrets => "secrets",
            Self::Environment => "env",
            Self::Stdin => "stdin",
            Self::Init => "init",
            Self::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Trait for input sources.
///
/// Implement this trait to feed inputs from somewhere the crate does not
/// cover (a vault client, a database row, ...).
pub trait InputSource: Send + Sync {
    /// Load this source's partial inputs.
    ///
    /// The returned map is overlaid onto the inputs of earlier sources.
    /// `case_sensitive` tells the source how to build its map.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or parsed.
    fn load(&self, case_sensitive: bool) -> Result<InputMap>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;

    /// The kind of this source.
    fn kind(&self) -> SourceKind {
        SourceKind::Custom
    }

    /// Get the priority of this source (higher = takes precedence).
    ///
    /// Default priorities:
    /// - Settings files: 100 (+10 per additional file)
    /// - Dotenv file: 200
    /// - Secrets directory: 300
    /// - Environment variables: 400
    /// - Stdin: 500
    /// - Init mapping: 600
    fn priority(&self) -> i32 {
        100
    }
}

pub(crate) mod priority {
    pub const FILE: i32 = 100;
    pub const DOTENV: i32 = 200;
    pub const SECRETS: i32 = 300;
    pub const ENVIRONMENT: i32 = 400;
    pub const STDIN: i32 = 500;
    pub const INIT: i32 = 600;
}
