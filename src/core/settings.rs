//! Source enable flags read from the environment.

use crate::codec::strtobool;
use crate::error::{InputError, Result};
use config::Environment;
use serde::Deserialize;

/// Prefix of the variables that toggle sources.
pub const ENV_PREFIX: &str = "DIRECTED_INPUTS";

/// Variable that forbids reading stdin even when it is enabled.
pub const OVERRIDE_STDIN_VAR: &str = "OVERRIDE_STDIN";

/// Which sources a store reads.
///
/// `DIRECTED_INPUTS_FROM_ENVIRONMENT` and `DIRECTED_INPUTS_FROM_STDIN` set the
/// two enable flags; `OVERRIDE_STDIN` disables stdin regardless of them.
///
/// # Examples
///
/// ```rust
/// use directed_inputs::core::InputSettings;
///
/// let settings = InputSettings::from_vars([
///     ("DIRECTED_INPUTS_FROM_STDIN".to_string(), "true".to_string()),
/// ])
/// .unwrap();
///
/// assert!(settings.from_environment);
/// assert!(settings.from_stdin);
/// assert!(!settings.override_stdin);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSettings {
    /// Load inputs from environment variables.
    pub from_environment: bool,
    /// Load inputs from a JSON document on stdin.
    pub from_stdin: bool,
    /// Never read stdin.
    pub override_stdin: bool,
}

/// Flags as found, before truthy/falsy parsing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFlags {
    from_environment: Option<String>,
    from_stdin: Option<String>,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            from_environment: true,
            from_stdin: false,
            override_stdin: false,
        }
    }
}

impl InputSettings {
    /// Load settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a flag is set to something that is not a boolean.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars_os().map(|(key, value)| {
            (
                key.to_string_lossy().into_owned(),
                value.to_string_lossy().into_owned(),
            )
        }))
    }

    /// Load settings from an explicit set of variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a flag is set to something that is not a boolean.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: config::Map<String, String> = vars.into_iter().collect();
        let override_raw = vars.get(OVERRIDE_STDIN_VAR).cloned();

        let flags = config::Config::builder()
            .add_source(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
            .build()
            .map_err(|e| InputError::Settings(e.to_string()))?
            .try_deserialize::<RawFlags>()
            .map_err(|e| InputError::Settings(e.to_string()))?;

        let defaults = Self::default();
        let settings = Self {
            from_environment: parse_flag(
                &format!("{ENV_PREFIX}_FROM_ENVIRONMENT"),
                flags.from_environment,
                defaults.from_environment,
            )?,
            from_stdin: parse_flag(
                &format!("{ENV_PREFIX}_FROM_STDIN"),
                flags.from_stdin,
                defaults.from_stdin,
            )?,
            override_stdin: parse_flag(OVERRIDE_STDIN_VAR, override_raw, defaults.override_stdin)?,
        };

        Ok(settings)
    }
}

fn parse_flag(key: &str, raw: Option<String>, default: bool) -> Result<bool> {
    match raw {
        None => Ok(default),
        Some(raw) => strtobool(&raw).ok_or_else(|| InputError::TypeConversion {
            key: key.to_string(),
            raw,
            target: "a boolean",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let settings = InputSettings::from_vars(vars(&[("UNRELATED", "1")])).unwrap();
        assert_eq!(settings, InputSettings::default());
    }

    #[test]
    fn test_load_flags() {
        let settings = InputSettings::from_vars(vars(&[
            ("DIRECTED_INPUTS_FROM_ENVIRONMENT", "False"),
            ("DIRECTED_INPUTS_FROM_STDIN", "True"),
        ]))
        .unwrap();
        assert!(!settings.from_environment);
        assert!(settings.from_stdin);
    }

    #[test]
    fn test_load_flags_short_forms() {
        let settings = InputSettings::from_vars(vars(&[
            ("DIRECTED_INPUTS_FROM_ENVIRONMENT", "n"),
            ("DIRECTED_INPUTS_FROM_STDIN", "t"),
        ]))
        .unwrap();
        assert!(!settings.from_environment);
        assert!(settings.from_stdin);

        let settings = InputSettings::from_vars(vars(&[
            ("DIRECTED_INPUTS_FROM_ENVIRONMENT", "f"),
            ("DIRECTED_INPUTS_FROM_STDIN", "y"),
        ]))
        .unwrap();
        assert!(!settings.from_environment);
        assert!(settings.from_stdin);
    }

    #[test]
    fn test_invalid_flag() {
        let err =
            InputSettings::from_vars(vars(&[("DIRECTED_INPUTS_FROM_STDIN", "sometimes")])).unwrap_err();
        assert!(matches!(
            err,
            InputError::TypeConversion { ref key, ref raw, .. }
                if key == "DIRECTED_INPUTS_FROM_STDIN" && raw == "sometimes"
        ));
    }

    #[test]
    fn test_override_stdin() {
        let settings = InputSettings::from_vars(vars(&[("OVERRIDE_STDIN", "yes")])).unwrap();
        assert!(settings.override_stdin);

        let settings = InputSettings::from_vars(vars(&[("OVERRIDE_STDIN", "False")])).unwrap();
        assert!(!settings.override_stdin);
    }

    #[test]
    fn test_invalid_override_stdin() {
        let err = InputSettings::from_vars(vars(&[("OVERRIDE_STDIN", "sometimes")])).unwrap_err();
        assert!(matches!(err, InputError::TypeConversion { ref key, .. } if key == "OVERRIDE_STDIN"));
    }
}
