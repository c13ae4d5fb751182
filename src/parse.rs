//! String-to-value parsing shared by every source.
//!
//! - Empty input is the zero value.
//! - Sequences split on `,` and each token is trimmed before parsing.
//! - Numbers and booleans are trimmed; strings are taken verbatim.
//! - Booleans accept `1 t T TRUE true True` and `0 f F FALSE false False`.

use crate::error::BindError;
use crate::schema::{FieldSlot, ScalarKind};
use crate::sources::Origin;
use std::fmt::Display;
use std::str::FromStr;

/// A raw value that does not parse as the expected kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InvalidValue {
    pub value: String,
    pub kind: ScalarKind,
    pub reason: String,
}

impl InvalidValue {
    pub fn into_bind_error(self, field: &str, origin: Origin) -> BindError {
        BindError::Parse {
            field: field.to_string(),
            value: self.value,
            origin,
            kind: self.kind,
            reason: self.reason,
        }
    }
}

fn parse_number<V>(raw: &str, kind: ScalarKind) -> Result<V, InvalidValue>
where
    V: FromStr,
    V::Err: Display,
{
    raw.trim().parse().map_err(|e: V::Err| InvalidValue {
        value: raw.to_string(),
        kind,
        reason: e.to_string(),
    })
}

pub(crate) fn parse_bool(raw: &str) -> Result<bool, InvalidValue> {
    match raw.trim() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(InvalidValue {
            value: raw.to_string(),
            kind: ScalarKind::Bool,
            reason: "expected true or false".to_string(),
        }),
    }
}

/// Split a sequence on commas, trimming each token.
pub(crate) fn split_sequence(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim)
}

fn parse_sequence<V>(
    raw: &str,
    parse: impl Fn(&str) -> Result<V, InvalidValue>,
) -> Result<Vec<V>, InvalidValue> {
    split_sequence(raw).map(parse).collect()
}

impl FieldSlot<'_> {
    /// Parse `raw` into the field, replacing its value.
    ///
    /// Empty input stores the zero value. On error the field is unchanged.
    pub(crate) fn assign(self, raw: &str) -> Result<(), InvalidValue> {
        if raw.is_empty() {
            self.clear();
            return Ok(());
        }

        match self {
            FieldSlot::String(v) => *v = raw.to_string(),
            FieldSlot::Int32(v) => *v = parse_number(raw, ScalarKind::Int32)?,
            FieldSlot::Int64(v) => *v = parse_number(raw, ScalarKind::Int64)?,
            FieldSlot::Float32(v) => *v = parse_number(raw, ScalarKind::Float32)?,
            FieldSlot::Float64(v) => *v = parse_number(raw, ScalarKind::Float64)?,
            FieldSlot::Bool(v) => *v = parse_bool(raw)?,
            FieldSlot::Strings(v) => *v = split_sequence(raw).map(str::to_string).collect(),
            FieldSlot::Int32s(v) => {
                *v = parse_sequence(raw, |t| parse_number(t, ScalarKind::Int32))?
            }
            FieldSlot::Int64s(v) => {
                *v = parse_sequence(raw, |t| parse_number(t, ScalarKind::Int64))?
            }
            FieldSlot::Float32s(v) => {
                *v = parse_sequence(raw, |t| parse_number(t, ScalarKind::Float32))?
            }
            FieldSlot::Float64s(v) => {
                *v = parse_sequence(raw, |t| parse_number(t, ScalarKind::Float64))?
            }
            FieldSlot::Bools(v) => *v = parse_sequence(raw, parse_bool)?,
            FieldSlot::Unsupported(_) => {}
        }
        Ok(())
    }
}
