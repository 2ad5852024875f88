//! Resolver configuration.
//!
//! ```json
//! {
//!   "reference_upper_bound": 1000000,
//!   "syntax": { "prefix": "${", "suffix": "}", "separator": ":" }
//! }
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::model::REFERENCE_UPPER_BOUND;
use crate::{Error, Result};

// ============================================================================
// Placeholder syntax
// ============================================================================

/// Delimiters recognised by the expression parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderSyntax {
    /// Opens a reference, `${` by default.
    pub prefix: String,
    /// Closes a reference, `}` by default.
    pub suffix: String,
    /// Splits key from default, `:` by default. Empty disables defaults.
    pub separator: String,
}

impl Default for PlaceholderSyntax {
    fn default() -> Self {
        Self {
            prefix: "${".into(),
            suffix: "}".into(),
            separator: ":".into(),
        }
    }
}

impl PlaceholderSyntax {
    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(Error::InvalidConfig("placeholder prefix must not be empty".into()));
        }
        if self.suffix.is_empty() {
            return Err(Error::InvalidConfig("placeholder suffix must not be empty".into()));
        }
        if self.prefix == self.suffix {
            return Err(Error::InvalidConfig(format!(
                "placeholder prefix and suffix must differ (both '{}')",
                self.prefix
            )));
        }
        Ok(())
    }

    /// Render `key` as an unresolved reference, without default.
    pub fn placeholder(&self, key: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + key.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(key);
        out.push_str(&self.suffix);
        out
    }
}

// ============================================================================
// Resolver configuration
// ============================================================================

/// Tunables for one `Resolver` instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Cumulative substitution ceiling per key. Entries that reach it keep
    /// their raw value.
    pub reference_upper_bound: u64,
    pub syntax: PlaceholderSyntax,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            reference_upper_bound: REFERENCE_UPPER_BOUND,
            syntax: PlaceholderSyntax::default(),
        }
    }
}

impl ResolverConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ResolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.reference_upper_bound == 0 {
            return Err(Error::InvalidConfig("reference_upper_bound must be positive".into()));
        }
        self.syntax.validate()
    }

    pub fn with_upper_bound(mut self, bound: u64) -> Self {
        self.reference_upper_bound = bound;
        self
    }

    pub fn with_syntax(mut self, syntax: PlaceholderSyntax) -> Self {
        self.syntax = syntax;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.reference_upper_bound, 1_000_000);
        assert_eq!(config.syntax.prefix, "${");
        assert_eq!(config.syntax.suffix, "}");
        assert_eq!(config.syntax.separator, ":");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ResolverConfig::from_json(r#"{"syntax": {"separator": "?"}}"#).unwrap();
        assert_eq!(config.reference_upper_bound, REFERENCE_UPPER_BOUND);
        assert_eq!(config.syntax.prefix, "${");
        assert_eq!(config.syntax.separator, "?");
    }

    #[test]
    fn test_from_json_rejects_zero_bound() {
        let err = ResolverConfig::from_json(r#"{"reference_upper_bound": 0}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = ResolverConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_syntax_validation() {
        let empty_prefix = PlaceholderSyntax { prefix: String::new(), ..Default::default() };
        assert!(empty_prefix.validate().is_err());

        let same = PlaceholderSyntax {
            prefix: "%".into(),
            suffix: "%".into(),
            separator: ":".into(),
        };
        assert!(same.validate().is_err());

        let no_defaults = PlaceholderSyntax { separator: String::new(), ..Default::default() };
        assert!(no_defaults.validate().is_ok());
    }

    #[test]
    fn test_placeholder_rendering() {
        let syntax = PlaceholderSyntax {
            prefix: "#{".into(),
            suffix: "}".into(),
            separator: ":".into(),
        };
        assert_eq!(syntax.placeholder("a.b"), "#{a.b}");
    }
}
