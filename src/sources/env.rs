//! Environment variable reader.

use super::{Candidate, Origin, is_supplied};
use crate::bind::Binding;
use crate::config::Presence;
use crate::error::BindResult;
use std::collections::HashMap;
use std::hash::BuildHasher;
use tracing::trace;

/// A lookup table of environment variables.
pub trait EnvSource {
    /// Value of `key`, or `None` when the variable is not set.
    fn var(&self, key: &str) -> Option<String>;
}

/// The current process environment. Non-UTF-8 values are converted lossily.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Populate a record from environment variables.
///
/// A variable that is not set reads as the empty string, i.e. the zero value.
pub(crate) fn read_env<T, E>(
    bindings: &[Binding<'_, T>],
    presence: Presence,
    env: &E,
) -> BindResult<Candidate<T>>
where
    T: Default,
    E: EnvSource + ?Sized,
{
    let mut value = T::default();
    let mut supplied = Vec::with_capacity(bindings.len());

    for binding in bindings {
        let raw = env.var(&binding.keys.env);
        trace!(
            field = binding.field.name(),
            key = %binding.keys.env,
            present = raw.is_some(),
            "read environment variable"
        );

        binding
            .field
            .slot(&mut value)
            .assign(raw.as_deref().unwrap_or(""))
            .map_err(|e| e.into_bind_error(binding.field.name(), Origin::Environment))?;
        supplied.push(is_supplied(
            presence,
            raw.is_some(),
            binding.field.slot(&mut value),
        ));
    }

    Ok(Candidate { value, supplied })
}
