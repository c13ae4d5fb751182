//! Binding configuration.

use serde::{Deserialize, Serialize};

/// Prefix used when [`BindConfig::prefix`] is empty.
pub const DEFAULT_PREFIX: &str = "FLAGENV";

/// Rule deciding whether a source supplied a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// A source supplies a field only when its value differs from the type's
    /// zero value. An explicit `0`, `false` or empty string is treated as
    /// absent.
    #[default]
    NonZero,
    /// A source supplies a field whenever it carries the key, even if the
    /// value is zero or empty.
    Explicit,
}

/// Options for one bind call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    /// Prefix for every derived key. Empty means [`DEFAULT_PREFIX`].
    pub prefix: String,

    /// When both sources supply a field, take the flag instead of the
    /// environment variable.
    pub prefer_flag: bool,

    /// How a source's value is judged present. Defaults to
    /// [`Presence::NonZero`].
    pub presence: Presence,
}

impl BindConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    pub fn with_prefer_flag(mut self, prefer_flag: bool) -> Self {
        self.prefer_flag = prefer_flag;
        self
    }

    pub fn with_presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    /// The prefix actually used for key derivation.
    pub fn effective_prefix(&self) -> &str {
        if self.prefix.is_empty() {
            DEFAULT_PREFIX
        } else {
            &self.prefix
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BindConfig::default();
        assert!(!config.prefer_flag);
        assert_eq!(config.presence, Presence::NonZero);
        assert_eq!(config.effective_prefix(), "FLAGENV");
    }

    #[test]
    fn test_explicit_prefix_kept() {
        let config = BindConfig::new("app").with_prefer_flag(true);
        assert_eq!(config.effective_prefix(), "app");
        assert!(config.prefer_flag);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: BindConfig =
            serde_json::from_str(r#"{"prefer_flag": true, "presence": "explicit"}"#)
                .expect("config");
        assert_eq!(config.effective_prefix(), DEFAULT_PREFIX);
        assert!(config.prefer_flag);
        assert_eq!(config.presence, Presence::Explicit);
    }
}
