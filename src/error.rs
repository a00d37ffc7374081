//! Error types for directed-inputs.

use std::fmt;

/// Result type alias for directed-inputs operations.
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors that can occur while resolving, reading or decoding inputs.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// A source produced content that could not be parsed.
    #[error("Failed to decode {source_name}: {reason}\n{payload}")]
    SourceDecode {
        /// Name of the failing source
        source_name: String,
        /// The raw content the source produced
        payload: String,
        /// Why parsing failed
        reason: String,
    },

    /// A source could not be read at all.
    #[error("Failed to load source '{source_name}': {reason}")]
    SourceLoad {
        /// Name of the failing source
        source_name: String,
        /// Why loading failed
        reason: String,
    },

    /// A required input was absent after merging all sources.
    #[error("Required input {key} not passed from inputs:\n{inputs}")]
    MissingRequired {
        /// The missing key
        key: String,
        /// Snapshot of the inputs known at the time of the lookup
        inputs: String,
    },

    /// Boolean, integer or float coercion failed.
    #[error("Input {key} not {target}: {raw}")]
    TypeConversion {
        /// The key being converted
        key: String,
        /// The raw value that could not be converted
        raw: String,
        /// Human-readable name of the target type ("an integer", ...)
        target: &'static str,
    },

    /// Base64 decoding failed.
    #[error("Failed to decode {raw} from base64")]
    Base64Decode {
        /// The raw value
        raw: String,
        /// Underlying decoder error
        #[source]
        source: base64::DecodeError,
    },

    /// Decoded bytes were not valid UTF-8.
    #[error("Failed to decode bytes to string: {raw}")]
    TextDecode {
        /// Lossy rendering of the offending bytes
        raw: String,
        /// Underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// JSON decoding failed.
    #[error("Failed to decode {raw} from JSON")]
    JsonDecode {
        /// The text that failed to parse
        raw: String,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// YAML decoding failed.
    #[error("Failed to decode {raw} from YAML")]
    YamlDecode {
        /// The text that failed to parse
        raw: String,
        /// Underlying parser error
        #[source]
        source: serde_yaml::Error,
    },

    /// The `DIRECTED_INPUTS_` settings could not be loaded.
    #[error("Failed to load input settings: {0}")]
    Settings(String),

    /// Collected inputs could not be deserialized into the target type.
    #[error("Failed to deserialize inputs: {0}")]
    Deserialization(String),

    /// Input validation failed.
    #[error("Input validation failed: {0}")]
    Validation(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InputError {
    pub(crate) fn source_load(source_name: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::SourceLoad {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn source_decode(
        source_name: impl Into<String>,
        payload: impl Into<String>,
        reason: impl fmt::Display,
    ) -> Self {
        Self::SourceDecode {
            source_name: source_name.into(),
            payload: payload.into(),
            reason: reason.to_string(),
        }
    }
}

/// Validation error for collected inputs.
#[derive(Debug)]
pub enum ValidationError {
    /// Custom validation error with a message.
    Custom(String),

    /// A specific input has an invalid value.
    InvalidField {
        /// The input name
        field: String,
        /// The reason why it's invalid
        reason: String,
    },

    /// Multiple validation errors occurred.
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Create a custom validation error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(msg) => write!(f, "{}", msg),
            Self::InvalidField { field, reason } => {
                write!(f, "Input '{}' is invalid: {}", field, reason)
            }
            Self::Multiple(errors) => {
                writeln!(f, "Multiple validation errors:")?;
                for (i, err) in errors.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for InputError {
    fn from(err: ValidationError) -> Self {
        InputError::Validation(err.to_string())
    }
}
