//! Runtime configuration
//!
//! Everything has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use crate::error::UnitsError;

/// Default number of idle buffers kept by a buffer pool
pub const DEFAULT_POOL_CAPACITY: usize = 16;

/// Default initial capacity of a pooled buffer, in bytes
pub const DEFAULT_BUFFER_CAPACITY: usize = 64;

/// Separators used when rendering and reading numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberLocale {
    pub decimal_separator: char,
    pub group_separator: char,
    pub negative_sign: char,
}

impl NumberLocale {
    /// Culture-independent separators: `1,234.5`, `-1`
    pub const fn invariant() -> Self {
        NumberLocale {
            decimal_separator: '.',
            group_separator: ',',
            negative_sign: '-',
        }
    }

    pub const fn new(decimal_separator: char, group_separator: char) -> Self {
        NumberLocale {
            decimal_separator,
            group_separator,
            negative_sign: '-',
        }
    }

    pub fn is_invariant(&self) -> bool {
        *self == Self::invariant()
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::invariant()
    }
}

/// Configuration for a units context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitsConfig {
    /// Maximum number of idle buffers retained for reuse
    pub pool_capacity: usize,
    /// Initial capacity of freshly allocated buffers
    pub buffer_capacity: usize,
    pub locale: NumberLocale,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            locale: NumberLocale::default(),
        }
    }
}

impl UnitsConfig {
    /// Load a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, UnitsError> {
        serde_json::from_str(json).map_err(|e| UnitsError::Config(e.to_string()))
    }

    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = UnitsConfig::from_json("{}").unwrap();
        assert_eq!(config, UnitsConfig::default());
    }

    #[test]
    fn test_partial_locale() {
        let config = UnitsConfig::from_json(
            r#"{ "pool_capacity": 4, "locale": { "decimal_separator": "," , "group_separator": " " } }"#,
        )
        .unwrap();
        assert_eq!(config.pool_capacity, 4);
        assert_eq!(config.buffer_capacity, DEFAULT_BUFFER_CAPACITY);
        assert_eq!(config.locale.decimal_separator, ',');
        assert_eq!(config.locale.negative_sign, '-');
        assert!(!config.locale.is_invariant());
    }

    #[test]
    fn test_invalid_json() {
        let err = UnitsConfig::from_json("{ \"pool_capacity\": -1 }").unwrap_err();
        assert_eq!(err.code(), crate::codes::CONFIG);
    }

    #[test]
    fn test_builder() {
        let config = UnitsConfig::default()
            .with_pool_capacity(2)
            .with_locale(NumberLocale::new(',', '.'));
        assert_eq!(config.pool_capacity, 2);
        assert_eq!(config.locale.group_separator, '.');
    }
}
