//! Layered Base64 → text → JSON/YAML decoding.

use crate::error::{InputError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::Value;

/// Which decode layers to apply to a value.
///
/// Base64 always runs first. YAML and JSON are exclusive; when both are set
/// YAML is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeFlags {
    /// Base64-decode the raw string first.
    pub base64: bool,
    /// Parse the text as JSON.
    pub json: bool,
    /// Parse the text as YAML.
    pub yaml: bool,
}

impl DecodeFlags {
    /// No decoding.
    pub const NONE: Self = Self {
        base64: false,
        json: false,
        yaml: false,
    };

    /// Whether any layer is enabled.
    pub fn any(&self) -> bool {
        self.base64 || self.json || self.yaml
    }
}

/// A tag fixing the combination of decode layers for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeType {
    /// Parse as JSON.
    Json,
    /// Parse as YAML.
    Yaml,
    /// Base64-decode to text.
    Base64,
    /// Base64-decode, then parse as JSON.
    JsonBase64,
    /// Base64-decode, then parse as YAML.
    YamlBase64,
    /// Parse as JSON, never Base64.
    JsonWithoutBase64,
    /// Parse as YAML, never Base64.
    YamlWithoutBase64,
}

impl DecodeType {
    /// The decode flags this tag stands for.
    pub fn flags(self) -> DecodeFlags {
        let json = matches!(self, Self::Json | Self::JsonBase64 | Self::JsonWithoutBase64);
        let yaml = matches!(self, Self::Yaml | Self::YamlBase64 | Self::YamlWithoutBase64);
        let base64 = matches!(self, Self::Base64 | Self::JsonBase64 | Self::YamlBase64);
        DecodeFlags { base64, json, yaml }
    }
}

impl From<DecodeType> for DecodeFlags {
    fn from(decode_type: DecodeType) -> Self {
        decode_type.flags()
    }
}

/// Decode `value` according to `flags`.
///
/// Only strings are decoded. Values that are already structured pass
/// through unchanged.
///
/// # Errors
///
/// Returns the error of the first layer that fails: `Base64Decode`,
/// `TextDecode`, `YamlDecode` or `JsonDecode`.
///
/// # Examples
///
/// ```rust
/// use directed_inputs::codec::{DecodeType, decode};
/// use serde_json::json;
///
/// let decoded = decode(json!("name: test"), DecodeType::Yaml.flags()).unwrap();
/// assert_eq!(decoded, json!({"name": "test"}));
/// ```
pub fn decode(value: Value, flags: DecodeFlags) -> Result<Value> {
    let Value::String(raw) = value else {
        return Ok(value);
    };

    let text = if flags.base64 {
        let bytes = decode_base64(&raw)?;
        decode_text(bytes)?
    } else {
        raw
    };

    if flags.yaml {
        decode_yaml(&text)
    } else if flags.json {
        decode_json(&text)
    } else {
        Ok(Value::String(text))
    }
}

/// Base64-decode a string into raw bytes.
///
/// ASCII whitespace anywhere in the input is ignored, so line-wrapped
/// output of the `base64` tool decodes.
pub fn decode_base64(raw: &str) -> Result<Vec<u8>> {
    tracing::trace!(len = raw.len(), "decoding base64 input");
    let compact: Vec<u8> = raw
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    STANDARD
        .decode(compact)
        .map_err(|source| InputError::Base64Decode {
            raw: raw.to_string(),
            source,
        })
}

/// Interpret bytes as UTF-8 text.
pub fn decode_text(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|source| InputError::TextDecode {
        raw: String::from_utf8_lossy(source.as_bytes()).into_owned(),
        source,
    })
}

/// Parse text as a JSON document.
pub fn decode_json(text: &str) -> Result<Value> {
    tracing::trace!(len = text.len(), "decoding JSON input");
    serde_json::from_str(text).map_err(|source| InputError::JsonDecode {
        raw: text.to_string(),
        source,
    })
}

/// Parse text as a YAML document.
pub fn decode_yaml(text: &str) -> Result<Value> {
    tracing::trace!(len = text.len(), "decoding YAML input");
    serde_yaml::from_str(text).map_err(|source| InputError::YamlDecode {
        raw: text.to_string(),
        source,
    })
}

/// Whether a value counts as "nothing": null, a blank string, or an empty
/// sequence or mapping.
pub fn is_nothing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
