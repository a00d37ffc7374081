//! The input store: active and frozen inputs plus typed accessors.

use crate::codec::{Coercion, DecodeFlags, DecodeType, decode, is_nothing};
use crate::core::{InputStoreBuilder, SourceResolver};
use crate::error::{InputError, Result};
use crate::map::{InputMap, MergeStrategy};
use crate::sources::InitSource;
use serde_json::{Map, Value};
use std::fmt;
use std::mem;

/// Which mapping currently holds the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    /// Reads are served from the active inputs.
    Active,
    /// Inputs are parked in the frozen mapping and invisible to reads.
    Frozen,
}

/// Options for [`InputStore::get`].
///
/// # Examples
///
/// ```rust
/// use directed_inputs::codec::Coercion;
/// use directed_inputs::core::GetOptions;
///
/// let options = GetOptions::new().with_default(8080).coerce(Coercion::Integer);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetOptions {
    /// Value returned when the input is absent or empty.
    pub default: Option<Value>,
    /// Fail when the input is absent or empty.
    pub required: bool,
    /// Convert the value to a scalar type.
    pub coerce: Option<Coercion>,
}

impl GetOptions {
    /// No default, not required, no coercion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the input as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Coerce the value.
    pub fn coerce(mut self, coercion: Coercion) -> Self {
        self.coerce = Some(coercion);
        self
    }
}

/// Options for [`InputStore::decode_input`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOptions {
    /// Value returned when the input is absent or empty.
    pub default: Option<Value>,
    /// Fail when the input is absent or empty.
    pub required: bool,
    /// Decode layers to apply.
    pub flags: DecodeFlags,
    /// When set, overrides `flags`.
    pub decode_type: Option<DecodeType>,
    /// Whether a decoded `null` is returned as is; otherwise the default is returned.
    pub allow_none: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            default: None,
            required: false,
            flags: DecodeFlags::NONE,
            decode_type: None,
            allow_none: true,
        }
    }
}

impl DecodeOptions {
    /// Options for a given decode type.
    pub fn new(decode_type: DecodeType) -> Self {
        Self {
            decode_type: Some(decode_type),
            ..Self::default()
        }
    }

    /// Options from individual flags.
    pub fn with_flags(base64: bool, json: bool, yaml: bool) -> Self {
        Self {
            flags: DecodeFlags { base64, json, yaml },
            ..Self::default()
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the input as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Replace a decoded `null` with the default.
    pub fn disallow_none(mut self) -> Self {
        self.allow_none = false;
        self
    }

    /// The flags in effect, with the decode type taking precedence.
    pub fn effective_flags(&self) -> DecodeFlags {
        self.decode_type.map_or(self.flags, DecodeType::flags)
    }
}

/// Store of directed inputs.
///
/// Exactly one of the two mappings drives reads: the active inputs, or
/// nothing while they are frozen. Freezing parks the active inputs; thawing
/// brings them back, deep-merging into anything inserted in between.
///
/// # Examples
///
/// ```rust
/// use directed_inputs::core::{GetOptions, InputStore};
/// use serde_json::json;
///
/// let mut store = InputStore::builder()
///     .with_input("key1", "value1")
///     .from_environment(false)
///     .from_stdin(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(store.get("KEY1", GetOptions::new()).unwrap(), Some(json!("value1")));
///
/// store.freeze();
/// assert_eq!(store.get("key1", GetOptions::new()).unwrap(), None);
///
/// store.thaw();
/// assert_eq!(store.get("key1", GetOptions::new()).unwrap(), Some(json!("value1")));
/// ```
pub struct InputStore {
    active: InputMap,
    frozen: InputMap,
    resolver: SourceResolver,
    merge: MergeStrategy,
}

impl fmt::Debug for InputStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputStore")
            .field("active", &self.active)
            .field("frozen", &self.frozen)
            .field("sources", &self.source_names())
            .field("merge", &self.merge)
            .finish()
    }
}

impl InputStore {
    /// Create a store serving exactly `inputs`, with no other sources.
    ///
    /// For most use cases, prefer `InputStore::builder()` instead.
    pub fn new(inputs: Map<String, Value>) -> Self {
        let active = InputMap::from_object(inputs.clone(), false);
        let mut resolver = SourceResolver::new(false);
        resolver.add_source(Box::new(InitSource::new(inputs)));
        Self::with_resolver(active, resolver, MergeStrategy::default())
    }

    /// Create a new builder for constructing a store.
    pub fn builder() -> InputStoreBuilder {
        InputStoreBuilder::new()
    }

    pub(crate) fn with_resolver(
        active: InputMap,
        resolver: SourceResolver,
        merge: MergeStrategy,
    ) -> Self {
        let case_sensitive = active.is_case_sensitive();
        Self {
            active,
            frozen: InputMap::new(case_sensitive),
            resolver,
            merge,
        }
    }

    fn empty_map(&self) -> InputMap {
        InputMap::new(self.active.is_case_sensitive())
    }

    /// Whether keys are compared case-sensitively.
    pub fn is_case_sensitive(&self) -> bool {
        self.active.is_case_sensitive()
    }

    /// The active inputs.
    pub fn inputs(&self) -> &InputMap {
        &self.active
    }

    /// The frozen inputs.
    pub fn frozen_inputs(&self) -> &InputMap {
        &self.frozen
    }

    /// Whether inputs are currently frozen.
    pub fn state(&self) -> InputState {
        if self.frozen.is_empty() {
            InputState::Active
        } else {
            InputState::Frozen
        }
    }

    /// Names of the sources in merge order.
    pub fn source_names(&self) -> Vec<String> {
        self.resolver.source_names()
    }

    /// Look up an input.
    ///
    /// An absent or empty value falls back to the default. Coercion applies
    /// to whatever value remains.
    ///
    /// # Errors
    ///
    /// - `TypeConversion` if coercion fails
    /// - `MissingRequired` if the input is required and nothing was found
    pub fn get(&self, key: &str, options: GetOptions) -> Result<Option<Value>> {
        let value = match self.active.get(key) {
            Some(found) if !is_nothing(found) => Some(found.clone()),
            _ => options.default,
        };

        let value = match (options.coerce, value) {
            (Some(coercion), Some(raw)) if !is_nothing(&raw) => Some(coercion.apply(key, &raw)?),
            (_, value) => value,
        };

        if options.required && value.as_ref().is_none_or(is_nothing) {
            return Err(InputError::MissingRequired {
                key: key.to_string(),
                inputs: self.active.to_string(),
            });
        }

        Ok(value)
    }

    /// Look up a required input.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequired` if nothing was found.
    pub fn require(&self, key: &str) -> Result<Value> {
        self.get(key, GetOptions::new().required())?
            .ok_or_else(|| InputError::MissingRequired {
                key: key.to_string(),
                inputs: self.active.to_string(),
            })
    }

    /// Look up an input as a string.
    ///
    /// Non-string values are rendered as JSON.
    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key, GetOptions::new())?.map(|value| match value {
            Value::String(s) => s,
            other => other.to_string(),
        }))
    }

    /// Look up an input as a boolean.
    ///
    /// # Errors
    ///
    /// Returns `TypeConversion` if the value is not a recognised boolean.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        Ok(self
            .get(key, GetOptions::new().coerce(Coercion::Bool))?
            .and_then(|value| value.as_bool()))
    }

    /// Look up an input as an integer.
    ///
    /// # Errors
    ///
    /// Returns `TypeConversion` if the value is not an integer.
    pub fn get_integer(&self, key: &str) -> Result<Option<i64>> {
        Ok(self
            .get(key, GetOptions::new().coerce(Coercion::Integer))?
            .and_then(|value| value.as_i64()))
    }

    /// Look up an input as a float.
    ///
    /// # Errors
    ///
    /// Returns `TypeConversion` if the value is not a number.
    pub fn get_float(&self, key: &str) -> Result<Option<f64>> {
        Ok(self
            .get(key, GetOptions::new().coerce(Coercion::Float))?
            .and_then(|value| value.as_f64()))
    }

    /// Look up an input and decode it.
    ///
    /// Values that are absent, empty or equal to the default are returned
    /// without decoding.
    ///
    /// # Errors
    ///
    /// - `MissingRequired` if the input is required and nothing was found
    /// - `Base64Decode`, `TextDecode`, `JsonDecode` or `YamlDecode` if a
    ///   decode layer fails
    ///
    /// # Examples
    ///
    /// ```rust
    /// use directed_inputs::codec::DecodeType;
    /// use directed_inputs::core::{DecodeOptions, InputStore};
    /// use serde_json::{Map, json};
    ///
    /// let mut inputs = Map::new();
    /// inputs.insert("yaml_key".to_string(), json!("name: test"));
    /// let store = InputStore::new(inputs);
    ///
    /// let decoded = store
    ///     .decode_input("yaml_key", DecodeOptions::new(DecodeType::Yaml))
    ///     .unwrap();
    /// assert_eq!(decoded, Some(json!({"name": "test"})));
    /// ```
    pub fn decode_input(&self, key: &str, options: DecodeOptions) -> Result<Option<Value>> {
        let flags = options.effective_flags();
        let get_options = GetOptions {
            default: options.default.clone(),
            required: options.required,
            coerce: None,
        };

        let Some(value) = self.get(key, get_options)? else {
            return Ok(None);
        };

        if is_nothing(&value) || options.default.as_ref() == Some(&value) {
            return Ok(Some(value));
        }

        let decoded = decode(value, flags)?;
        if decoded.is_null() && !options.allow_none {
            return Ok(options.default);
        }

        Ok(Some(decoded))
    }

    /// Insert an input into the active mapping.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.active.insert(key, value.into())
    }

    /// Insert several inputs into the active mapping.
    pub fn extend<I, K>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.active.extend(inputs);
    }

    /// Park the active inputs.
    ///
    /// Idempotent: if inputs are already frozen the frozen mapping is
    /// returned unchanged.
    pub fn freeze(&mut self) -> &InputMap {
        if self.frozen.is_empty() {
            let empty = self.empty_map();
            self.frozen = mem::replace(&mut self.active, empty);
            tracing::debug!(keys = self.frozen.len(), "froze inputs");
        }

        &self.frozen
    }

    /// Bring frozen inputs back.
    ///
    /// If the active mapping is empty the frozen inputs simply move back.
    /// Otherwise they are deep-merged into it with the store's merge
    /// strategy, frozen values winning scalar conflicts. The frozen mapping
    /// is empty afterwards.
    pub fn thaw(&mut self) -> &InputMap {
        let empty = self.empty_map();
        let frozen = mem::replace(&mut self.frozen, empty);

        if self.active.is_empty() {
            self.active = frozen;
        } else {
            let empty = self.empty_map();
            let active = mem::replace(&mut self.active, empty);
            self.active = self.merge.merge_maps(active, frozen);
        }

        tracing::debug!(keys = self.active.len(), "thawed inputs");
        &self.active
    }

    /// Freeze if nothing is frozen, otherwise thaw.
    pub fn shift(&mut self) -> &InputMap {
        match self.state() {
            InputState::Active => self.freeze(),
            InputState::Frozen => self.thaw(),
        }
    }

    /// Re-resolve all sources into the active mapping.
    ///
    /// Frozen inputs are left alone and merge with the refreshed ones on
    /// the next thaw. Stdin is not read again.
    ///
    /// # Errors
    ///
    /// Returns the first source error; the active mapping is unchanged.
    pub fn refresh(&mut self) -> Result<&InputMap> {
        self.active = self.resolver.resolve()?;
        Ok(&self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(pairs: &[(&str, Value)]) -> InputStore {
        let inputs = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        InputStore::new(inputs)
    }

    #[test]
    fn test_get_with_default() {
        let store = store(&[("key1", json!("value1"))]);
        let options = GetOptions::new().with_default("default_value");

        assert_eq!(store.get("key1", options.clone()).unwrap(), Some(json!("value1")));
        assert_eq!(store.get("key2", options).unwrap(), Some(json!("default_value")));
    }

    #[test]
    fn test_get_empty_value_uses_default() {
        let store = store(&[("blank", json!(""))]);
        let value = store.get("blank", GetOptions::new().with_default("fallback")).unwrap();
        assert_eq!(value, Some(json!("fallback")));
    }

    #[test]
    fn test_get_required_missing() {
        let store = store(&[("key1", json!("value1"))]);
        match store.get("missing", GetOptions::new().required()).unwrap_err() {
            InputError::MissingRequired { key, inputs } => {
                assert_eq!(key, "missing");
                assert!(inputs.contains("key1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_typed_accessors() {
        let store = store(&[
            ("bool_key", json!("true")),
            ("int_key", json!("10")),
            ("float_key", json!("2.5")),
            ("bad_int", json!("abc")),
        ]);

        assert_eq!(store.get_bool("bool_key").unwrap(), Some(true));
        assert_eq!(store.get_integer("int_key").unwrap(), Some(10));
        assert_eq!(store.get_float("float_key").unwrap(), Some(2.5));
        assert_eq!(store.get_integer("absent").unwrap(), None);
        assert!(matches!(
            store.get_integer("bad_int").unwrap_err(),
            InputError::TypeConversion { .. }
        ));
    }

    #[test]
    fn test_get_string_renders_json() {
        let store = store(&[("count", json!(3)), ("name", json!("x"))]);
        assert_eq!(store.get_string("count").unwrap(), Some("3".to_string()));
        assert_eq!(store.get_string("name").unwrap(), Some("x".to_string()));
    }

    #[test]
    fn test_require() {
        let store = store(&[("key1", json!("value1"))]);
        assert_eq!(store.require("KEY1").unwrap(), json!("value1"));
        assert!(store.require("key2").is_err());
    }

    #[test]
    fn test_decode_input_json() {
        let store = store(&[("json_key", json!(r#"{"name": "test"}"#))]);
        let decoded = store
            .decode_input("json_key", DecodeOptions::with_flags(false, true, false))
            .unwrap();
        assert_eq!(decoded, Some(json!({"name": "test"})));
    }

    #[test]
    fn test_decode_type_overrides_flags() {
        let store = store(&[("yaml_key", json!("name: test"))]);
        let mut options = DecodeOptions::with_flags(true, true, false);
        options.decode_type = Some(DecodeType::YamlWithoutBase64);

        let decoded = store.decode_input("yaml_key", options).unwrap();
        assert_eq!(decoded, Some(json!({"name": "test"})));
    }

    #[test]
    fn test_decode_skips_default() {
        let store = store(&[]);
        let decoded = store
            .decode_input("absent", DecodeOptions::new(DecodeType::Json).with_default("{not json"))
            .unwrap();
        assert_eq!(decoded, Some(json!("{not json")));
    }

    #[test]
    fn test_decode_absent_is_none() {
        let store = store(&[]);
        let decoded = store.decode_input("absent", DecodeOptions::new(DecodeType::Json)).unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn test_decode_null_disallowed() {
        let store = store(&[("nothing", json!("null"))]);

        let allowed = store.decode_input("nothing", DecodeOptions::new(DecodeType::Json)).unwrap();
        assert_eq!(allowed, Some(Value::Null));

        let replaced = store
            .decode_input(
                "nothing",
                DecodeOptions::new(DecodeType::Json)
                    .with_default("fallback")
                    .disallow_none(),
            )
            .unwrap();
        assert_eq!(replaced, Some(json!("fallback")));
    }

    #[test]
    fn test_decode_failure_propagates() {
        let store = store(&[("json_key", json!("{broken"))]);
        let err = store
            .decode_input("json_key", DecodeOptions::new(DecodeType::Json))
            .unwrap_err();
        assert!(matches!(err, InputError::JsonDecode { .. }));
    }

    #[test]
    fn test_freeze_inputs() {
        let mut store = store(&[("key1", json!("value1"))]);
        let frozen = store.freeze();
        assert_eq!(frozen.get("key1"), Some(&json!("value1")));
        assert!(store.inputs().is_empty());
        assert_eq!(store.state(), InputState::Frozen);
    }

    #[test]
    fn test_freeze_is_idempotent() {
        let mut store = store(&[("key1", json!("value1"))]);
        store.freeze();
        store.insert("key2", "value2");
        let frozen = store.freeze().clone();

        assert_eq!(frozen.len(), 1);
        assert_eq!(store.inputs().get("key2"), Some(&json!("value2")));
    }

    #[test]
    fn test_thaw_inputs() {
        let mut store = store(&[("key1", json!("value1"))]);
        store.freeze();
        store.thaw();
        assert_eq!(store.inputs().get("key1"), Some(&json!("value1")));
        assert!(store.frozen_inputs().is_empty());
        assert_eq!(store.state(), InputState::Active);
    }

    #[test]
    fn test_thaw_merges_into_repopulated_inputs() {
        let mut store = store(&[
            ("tags", json!(["a"])),
            ("db", json!({"host": "old"})),
            ("name", json!("frozen")),
        ]);
        store.freeze();
        store.extend([
            ("tags", json!(["b"])),
            ("db", json!({"port": 5432})),
            ("name", json!("active")),
            ("extra", json!(true)),
        ]);

        let thawed = store.thaw();
        assert_eq!(thawed.get("tags"), Some(&json!(["b", "a"])));
        assert_eq!(thawed.get("db"), Some(&json!({"port": 5432, "host": "old"})));
        assert_eq!(thawed.get("name"), Some(&json!("frozen")));
        assert_eq!(thawed.get("extra"), Some(&json!(true)));
    }

    #[test]
    fn test_shift_inputs() {
        let mut store = store(&[("key1", json!("value1"))]);

        store.shift();
        assert!(store.inputs().is_empty());
        assert_eq!(store.frozen_inputs().get("key1"), Some(&json!("value1")));

        store.shift();
        assert_eq!(store.inputs().get("key1"), Some(&json!("value1")));
        assert!(store.frozen_inputs().is_empty());
    }

    #[test]
    fn test_frozen_inputs_invisible_to_reads() {
        let mut store = store(&[("key1", json!("value1"))]);
        store.freeze();
        assert!(store.get("key1", GetOptions::new().required()).is_err());
    }

    #[test]
    fn test_debug_lists_inputs_and_sources() {
        let mut store = store(&[("key1", json!("value1"))]);
        let rendered = format!("{store:?}");
        assert!(rendered.contains("key1"));
        assert!(rendered.contains("\"init\""));

        store.freeze();
        let rendered = format!("{store:?}");
        assert!(rendered.contains("frozen"));
        assert!(rendered.contains("value1"));

        let failed: Result<InputStore> = Err(InputError::Settings("bad flag".to_string()));
        assert!(matches!(failed.unwrap_err(), InputError::Settings(_)));
    }

    #[test]
    fn test_refresh_restores_init_inputs() {
        let mut store = store(&[("key1", json!("value1"))]);
        store.insert("scratch", json!("temporary"));

        store.refresh().unwrap();
        assert_eq!(store.inputs().get("key1"), Some(&json!("value1")));
        assert!(!store.inputs().contains_key("scratch"));
        assert_eq!(store.source_names(), vec!["init"]);
    }
}
