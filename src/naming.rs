//! Lookup key derivation.
//!
//! The prefix and the field name are joined with an underscore word boundary,
//! then case-converted: kebab-case for flags, UPPER_SNAKE_CASE for environment
//! variables. Camel, Pascal and snake case field names all split into the same
//! words, so `StringField` and `string_field` derive identical keys.

use heck::{ToKebabCase, ToShoutySnakeCase};

/// External lookup keys for one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingKeys {
    /// Flag name without leading dashes, e.g. `app-max-retries`.
    pub flag: String,
    /// Environment variable name, e.g. `APP_MAX_RETRIES`.
    pub env: String,
}

fn join(prefix: &str, field: &str) -> String {
    format!("{}_{}", prefix, field)
}

/// Flag key for a field: `kebab(prefix + "_" + field)`.
pub fn flag_key(prefix: &str, field: &str) -> String {
    join(prefix, field).to_kebab_case()
}

/// Environment key for a field: `UPPER_SNAKE(prefix + "_" + field)`.
pub fn env_key(prefix: &str, field: &str) -> String {
    join(prefix, field).to_shouty_snake_case()
}

/// Derive both lookup keys for a field.
pub fn derive_keys(prefix: &str, field: &str) -> BindingKeys {
    BindingKeys {
        flag: flag_key(prefix, field),
        env: env_key(prefix, field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case_field() {
        let keys = derive_keys("test", "StringField");
        assert_eq!(keys.flag, "test-string-field");
        assert_eq!(keys.env, "TEST_STRING_FIELD");
    }

    #[test]
    fn test_snake_case_field() {
        let keys = derive_keys("TEST", "type_success_field");
        assert_eq!(keys.flag, "test-type-success-field");
        assert_eq!(keys.env, "TEST_TYPE_SUCCESS_FIELD");
    }

    #[test]
    fn test_upper_prefix_with_pascal_field() {
        assert_eq!(flag_key("TEST", "TypeErrorField"), "test-type-error-field");
        assert_eq!(env_key("TEST", "TypeErrorField"), "TEST_TYPE_ERROR_FIELD");
    }

    #[test]
    fn test_digits_stay_with_word() {
        assert_eq!(flag_key("FLAGENV", "Int64Field"), "flagenv-int64-field");
        assert_eq!(env_key("FLAGENV", "int64_slice"), "FLAGENV_INT64_SLICE");
    }

    #[test]
    fn test_camel_case_prefix() {
        let keys = derive_keys("myApp", "maxRetries");
        assert_eq!(keys.flag, "my-app-max-retries");
        assert_eq!(keys.env, "MY_APP_MAX_RETRIES");
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let first = derive_keys("svc", "ListenAddr");
        let second = derive_keys("svc", "ListenAddr");
        assert_eq!(first, second);
    }
}
