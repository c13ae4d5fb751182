//! Source readers.
//!
//! Each reader fills a fresh instance of the target record from one source.
//! Fields the source does not carry hold their type's zero value, and every
//! field is marked supplied or not according to the [`Presence`] rule.

pub mod env;
pub mod flags;

pub use env::{EnvSource, ProcessEnv};

use crate::config::Presence;
use crate::schema::FieldSlot;
use serde::Serialize;
use std::fmt;

/// Where a field's final value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Flag,
    Environment,
    /// Declared default, or the record's own `Default` value.
    Default,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Flag => write!(f, "flag"),
            Origin::Environment => write!(f, "environment"),
            Origin::Default => write!(f, "default"),
        }
    }
}

/// A record instance populated from a single source.
#[derive(Debug)]
pub(crate) struct Candidate<T> {
    pub value: T,
    /// Per field, in schema order: whether this source supplied it.
    pub supplied: Vec<bool>,
}

impl<T> Candidate<T> {
    pub(crate) fn supplied(&self, index: usize) -> bool {
        self.supplied.get(index).copied().unwrap_or(false)
    }
}

/// Decide whether a freshly assigned field counts as supplied.
pub(crate) fn is_supplied(presence: Presence, present: bool, slot: FieldSlot<'_>) -> bool {
    match presence {
        Presence::NonZero => !slot.is_zero(),
        Presence::Explicit => present,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_presence_ignores_zero_values() {
        let mut zero = 0i64;
        let mut set = 5i64;
        assert!(!is_supplied(Presence::NonZero, true, FieldSlot::from(&mut zero)));
        assert!(is_supplied(Presence::NonZero, true, FieldSlot::from(&mut set)));
    }

    #[test]
    fn test_explicit_presence_follows_key() {
        let mut zero = false;
        assert!(is_supplied(Presence::Explicit, true, FieldSlot::from(&mut zero)));
        assert!(!is_supplied(Presence::Explicit, false, FieldSlot::from(&mut zero)));
    }

    #[test]
    fn test_candidate_out_of_range_is_unsupplied() {
        let candidate = Candidate {
            value: (),
            supplied: vec![true],
        };
        assert!(candidate.supplied(0));
        assert!(!candidate.supplied(1));
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(Origin::Environment.to_string(), "environment");
        assert_eq!(
            serde_json::to_string(&Origin::Flag).expect("json"),
            "\"flag\""
        );
    }
}
