//! Field-by-field merge of the flag and environment candidates.
//!
//! For each field independently:
//! - both sources supplied it: the flag wins if `prefer_flag`, else the
//!   environment;
//! - one source supplied it: that source wins;
//! - neither: the field keeps its default.
//!
//! Defaults come from the record's `Default` impl with declared defaults
//! parsed on top.

use crate::bind::Binding;
use crate::config::BindConfig;
use crate::error::{BindError, BindResult};
use crate::sources::{Candidate, Origin};
use serde::Serialize;
use tracing::debug;

/// Where one field's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldOrigin {
    pub field: &'static str,
    pub origin: Origin,
}

/// A bound record together with the origin of each field.
#[derive(Debug, Clone, Serialize)]
pub struct Resolved<T> {
    pub value: T,
    /// One entry per field, in schema order.
    pub origins: Vec<FieldOrigin>,
}

impl<T> Resolved<T> {
    /// Origin of the named field, if the schema declares it.
    pub fn origin(&self, field: &str) -> Option<Origin> {
        self.origins
            .iter()
            .find(|o| o.field == field)
            .map(|o| o.origin)
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Pick the winning source for one field.
pub fn choose(flag_supplied: bool, env_supplied: bool, prefer_flag: bool) -> Origin {
    match (flag_supplied, env_supplied) {
        (true, true) if prefer_flag => Origin::Flag,
        (true, true) => Origin::Environment,
        (true, false) => Origin::Flag,
        (false, true) => Origin::Environment,
        (false, false) => Origin::Default,
    }
}

/// Build the defaults instance: `T::default()` plus declared defaults.
pub(crate) fn defaults<T: Default>(bindings: &[Binding<'_, T>]) -> BindResult<T> {
    let mut value = T::default();
    for binding in bindings {
        if let Some(default) = binding.field.default_value() {
            binding
                .field
                .slot(&mut value)
                .assign(default)
                .map_err(|e| e.into_bind_error(binding.field.name(), Origin::Default))?;
        }
    }
    Ok(value)
}

/// Merge the two candidates over the defaults instance.
pub(crate) fn merge<T: Default>(
    bindings: &[Binding<'_, T>],
    config: &BindConfig,
    mut flags: Candidate<T>,
    mut env: Candidate<T>,
) -> BindResult<Resolved<T>> {
    let mut value = defaults(bindings)?;
    let mut origins = Vec::with_capacity(bindings.len());

    for (index, binding) in bindings.iter().enumerate() {
        let name = binding.field.name();
        let origin = choose(flags.supplied(index), env.supplied(index), config.prefer_flag);

        let winner = match origin {
            Origin::Flag => Some(&mut flags.value),
            Origin::Environment => Some(&mut env.value),
            Origin::Default => None,
        };
        if let Some(winner) = winner {
            let moved = binding
                .field
                .slot(winner)
                .transfer(binding.field.slot(&mut value));
            if !moved {
                return Err(BindError::SlotMismatch {
                    field: name.to_string(),
                });
            }
        }

        debug!(field = name, origin = %origin, "resolved field");
        origins.push(FieldOrigin {
            field: name,
            origin,
        });
    }

    Ok(Resolved { value, origins })
}
