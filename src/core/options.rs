//! Statically declared input tables.
//!
//! A table lists every input a call site needs with its type, default and
//! whether it is required. The store resolves the whole table in one go and
//! can hand the result to serde.

use crate::codec::{Coercion, DecodeType};
use crate::core::{DecodeOptions, GetOptions, InputStore};
use crate::error::{InputError, Result};
use crate::map::InputMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[cfg(feature = "validation")]
use crate::core::Validate;

/// How a declared input is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// As found.
    Raw,
    /// Coerced to a boolean.
    Bool,
    /// Coerced to an integer.
    Integer,
    /// Coerced to a float.
    Float,
    /// Decoded with the given layers.
    Decoded(DecodeType),
}

/// One declared input.
///
/// # Examples
///
/// ```rust
/// use directed_inputs::codec::DecodeType;
/// use directed_inputs::core::InputSpec;
///
/// let specs = [
///     InputSpec::new("region").required(),
///     InputSpec::new("replicas").integer().default(1),
///     InputSpec::new("labels").decoded(DecodeType::JsonBase64),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InputSpec {
    name: String,
    kind: InputKind,
    default: Option<Value>,
    required: bool,
}

impl InputSpec {
    /// Declare a raw, optional input.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Raw,
            default: None,
            required: false,
        }
    }

    /// Set how the input is read.
    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    /// Read as a boolean.
    pub fn bool(self) -> Self {
        self.kind(InputKind::Bool)
    }

    /// Read as an integer.
    pub fn integer(self) -> Self {
        self.kind(InputKind::Integer)
    }

    /// Read as a float.
    pub fn float(self) -> Self {
        self.kind(InputKind::Float)
    }

    /// Decode with `decode_type`.
    pub fn decoded(self, decode_type: DecodeType) -> Self {
        self.kind(InputKind::Decoded(decode_type))
    }

    /// Set the default value.
    pub fn default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the input as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The input name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn get_options(&self, coerce: Option<Coercion>) -> GetOptions {
        GetOptions {
            default: self.default.clone(),
            required: self.required,
            coerce,
        }
    }

    fn decode_options(&self, decode_type: DecodeType) -> DecodeOptions {
        DecodeOptions {
            default: self.default.clone(),
            required: self.required,
            decode_type: Some(decode_type),
            ..DecodeOptions::default()
        }
    }
}

impl InputStore {
    /// Resolve every declared input.
    ///
    /// Inputs that resolve to nothing are left out of the result.
    ///
    /// # Errors
    ///
    /// Returns the first lookup, coercion or decode error.
    pub fn collect(&self, specs: &[InputSpec]) -> Result<InputMap> {
        let mut collected = InputMap::new(self.is_case_sensitive());

        for spec in specs {
            let value = match spec.kind {
                InputKind::Raw => self.get(&spec.name, spec.get_options(None))?,
                InputKind::Bool => self.get(&spec.name, spec.get_options(Some(Coercion::Bool)))?,
                InputKind::Integer => {
                    self.get(&spec.name, spec.get_options(Some(Coercion::Integer)))?
                }
                InputKind::Float => self.get(&spec.name, spec.get_options(Some(Coercion::Float)))?,
                InputKind::Decoded(decode_type) => {
                    self.decode_input(&spec.name, spec.decode_options(decode_type))?
                }
            };

            if let Some(value) = value {
                collected.insert(spec.name.clone(), value);
            }
        }

        Ok(collected)
    }

    /// Resolve every declared input and deserialize the table into `T`.
    ///
    /// # Errors
    ///
    /// Returns lookup errors from [`collect`](Self::collect), or
    /// `Deserialization` if the table does not fit `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use directed_inputs::core::{InputSpec, InputStore};
    /// use serde::Deserialize;
    /// use serde_json::{Map, json};
    ///
    /// #[derive(Deserialize)]
    /// struct Deploy {
    ///     region: String,
    ///     replicas: i64,
    /// }
    ///
    /// let mut inputs = Map::new();
    /// inputs.insert("REGION".to_string(), json!("eu-west-1"));
    /// inputs.insert("replicas".to_string(), json!("3"));
    /// let store = InputStore::new(inputs);
    ///
    /// let deploy: Deploy = store
    ///     .extract(&[InputSpec::new("region").required(), InputSpec::new("replicas").integer()])
    ///     .unwrap();
    /// assert_eq!(deploy.region, "eu-west-1");
    /// assert_eq!(deploy.replicas, 3);
    /// ```
    pub fn extract<T: DeserializeOwned>(&self, specs: &[InputSpec]) -> Result<T> {
        let collected = self.collect(specs)?;
        serde_json::from_value(collected.to_value())
            .map_err(|e| InputError::Deserialization(e.to_string()))
    }

    /// Like [`extract`](Self::extract), then run the type's validation.
    ///
    /// # Errors
    ///
    /// Additionally returns `Validation` if the extracted value is rejected.
    #[cfg(feature = "validation")]
    pub fn extract_validated<T>(&self, specs: &[InputSpec]) -> Result<T>
    where
        T: DeserializeOwned + Validate,
    {
        let extracted: T = self.extract(specs)?;
        extracted.validate()?;
        Ok(extracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::{Map, json};

    fn store(pairs: &[(&str, Value)]) -> InputStore {
        let inputs: Map<String, Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        InputStore::new(inputs)
    }

    #[test]
    fn test_collect_applies_kinds() {
        let store = store(&[
            ("debug", json!("yes")),
            ("workers", json!("4")),
            ("ratio", json!("0.5")),
            ("payload", json!(r#"{"a": 1}"#)),
            ("name", json!("svc")),
        ]);

        let collected = store
            .collect(&[
                InputSpec::new("debug").bool(),
                InputSpec::new("workers").integer(),
                InputSpec::new("ratio").float(),
                InputSpec::new("payload").decoded(DecodeType::Json),
                InputSpec::new("name"),
                InputSpec::new("absent"),
                InputSpec::new("timeout").integer().default(30),
            ])
            .unwrap();

        assert_eq!(collected.get("debug"), Some(&json!(true)));
        assert_eq!(collected.get("workers"), Some(&json!(4)));
        assert_eq!(collected.get("ratio"), Some(&json!(0.5)));
        assert_eq!(collected.get("payload"), Some(&json!({"a": 1})));
        assert_eq!(collected.get("name"), Some(&json!("svc")));
        assert_eq!(collected.get("timeout"), Some(&json!(30)));
        assert!(!collected.contains_key("absent"));
    }

    #[test]
    fn test_collect_required_missing() {
        let store = store(&[]);
        let err = store.collect(&[InputSpec::new("token").required()]).unwrap_err();
        assert!(matches!(err, InputError::MissingRequired { ref key, .. } if key == "token"));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Service {
        name: String,
        port: i64,
        #[serde(default)]
        debug: bool,
    }

    #[test]
    fn test_extract() {
        let store = store(&[("NAME", json!("api")), ("port", json!("8080"))]);
        let service: Service = store
            .extract(&[
                InputSpec::new("name").required(),
                InputSpec::new("port").integer(),
                InputSpec::new("debug").bool(),
            ])
            .unwrap();

        assert_eq!(
            service,
            Service {
                name: "api".to_string(),
                port: 8080,
                debug: false
            }
        );
    }

    #[test]
    fn test_extract_type_mismatch() {
        let store = store(&[("name", json!("api"))]);
        let err = store
            .extract::<Service>(&[InputSpec::new("name")])
            .unwrap_err();
        assert!(matches!(err, InputError::Deserialization(_)));
    }

    #[cfg(feature = "validation")]
    #[test]
    fn test_extract_validated() {
        use crate::error::ValidationError;

        impl Validate for Service {
            fn validate(&self) -> std::result::Result<(), ValidationError> {
                if self.port < 1024 {
                    return Err(ValidationError::invalid_field("port", "must be >= 1024"));
                }
                Ok(())
            }
        }

        let specs = [InputSpec::new("name"), InputSpec::new("port").integer()];

        let ok = store(&[("name", json!("api")), ("port", json!(8080))]);
        assert!(ok.extract_validated::<Service>(&specs).is_ok());

        let bad = store(&[("name", json!("api")), ("port", json!(80))]);
        assert!(matches!(
            bad.extract_validated::<Service>(&specs).unwrap_err(),
            InputError::Validation(_)
        ));
    }
}
