use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};

/// Configuration for dotted-path access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DotPathConfig {
    /// Character joining path segments
    pub separator: char,

    /// How reads walk multi-segment paths
    pub traversal: Traversal,

    /// Turn numeric-looking literal strings into numbers when resolving
    /// defaults and written values
    pub coerce_numeric_strings: bool,
}

impl Default for DotPathConfig {
    fn default() -> Self {
        Self {
            separator: '.',
            traversal: Traversal::Deep,
            coerce_numeric_strings: false,
        }
    }
}

impl DotPathConfig {
    /// Deep traversal with numeric-string coercion, the documented contract
    /// of the crate-level functions.
    pub const fn compatible() -> Self {
        Self {
            separator: '.',
            traversal: Traversal::Deep,
            coerce_numeric_strings: true,
        }
    }

    /// Bug-compatible reads: every segment is looked up on the top-level
    /// container.
    pub const fn legacy() -> Self {
        Self {
            separator: '.',
            traversal: Traversal::Shallow,
            coerce_numeric_strings: true,
        }
    }

    /// Parse a config from JSON, falling back to TOML, then validate it.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let config: Self = match serde_json::from_slice(bytes) {
            Ok(config) => config,
            Err(json_err) => {
                let utf8 = std::str::from_utf8(bytes)
                    .map_err(|err| PathError::invalid_config(format!("{json_err}; {err}")))?;
                toml::from_str(utf8).map_err(|toml_err| {
                    PathError::invalid_config(format!(
                        "config is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}"
                    ))
                })?
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_whitespace() || self.separator.is_control() {
            return Err(PathError::invalid_config(format!(
                "separator must be a visible character, got {:?}",
                self.separator
            )));
        }
        Ok(())
    }
}

/// Strategy for walking a multi-segment path on read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    /// Each segment descends into the value found by the previous one
    #[default]
    Deep,

    /// Each segment is looked up on the top-level container; the walk stops
    /// at the first missing key and yields the last lookup.
    /// Reproduces historical behavior, writes always go deep.
    Shallow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_opt_in_coercion() {
        let config = DotPathConfig::default();
        assert_eq!(config.separator, '.');
        assert_eq!(config.traversal, Traversal::Deep);
        assert!(!config.coerce_numeric_strings);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn presets() {
        assert!(DotPathConfig::compatible().coerce_numeric_strings);
        assert_eq!(DotPathConfig::compatible().traversal, Traversal::Deep);
        assert_eq!(DotPathConfig::legacy().traversal, Traversal::Shallow);
    }

    #[test]
    fn parses_json() {
        let config =
            DotPathConfig::from_slice(br#"{"separator": "/", "traversal": "shallow"}"#).unwrap();
        assert_eq!(config.separator, '/');
        assert_eq!(config.traversal, Traversal::Shallow);
        assert!(!config.coerce_numeric_strings);
    }

    #[test]
    fn falls_back_to_toml() {
        let config = DotPathConfig::from_slice(b"separator = ':'\ncoerce_numeric_strings = true\n")
            .unwrap();
        assert_eq!(config.separator, ':');
        assert_eq!(config.traversal, Traversal::Deep);
        assert!(config.coerce_numeric_strings);
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = DotPathConfig::from_slice(br#"{"sep": "/"}"#).unwrap_err();
        assert!(matches!(err, PathError::InvalidConfig(_)), "got {err:?}");
    }

    #[test]
    fn rejects_whitespace_separator() {
        let err = DotPathConfig::from_slice(br#"{"separator": " "}"#).unwrap_err();
        assert!(err.to_string().contains("separator"), "got {err}");
    }
}
