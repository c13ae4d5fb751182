//! Bind entry points.
//!
//! A bind call runs in one pass:
//! 1. enumerate the record's fields and derive their keys;
//! 2. read the environment candidate, then the flag candidate;
//! 3. merge both over the defaults instance.
//!
//! Nothing is cached between calls.

use crate::config::BindConfig;
use crate::error::{BindError, BindResult};
use crate::merge::{self, Resolved};
use crate::naming::{BindingKeys, derive_keys};
use crate::schema::{Bind, Field, FieldDescriptor, Schema};
use crate::sources::{self, EnvSource, ProcessEnv};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::ffi::OsString;
use tracing::debug;

/// Flag keys clap registers on its own.
const RESERVED_FLAGS: &[&str] = &["help"];

/// A schema field with its descriptor and derived keys.
pub(crate) struct Binding<'s, T> {
    pub field: &'s Field<T>,
    pub descriptor: FieldDescriptor,
    pub keys: BindingKeys,
}

fn claim<'k>(
    seen: &mut HashMap<&'k str, &'static str>,
    key: &'k str,
    field: &'static str,
) -> BindResult<()> {
    match seen.entry(key) {
        Entry::Occupied(first) => Err(BindError::DuplicateKey {
            key: key.to_string(),
            first: first.get().to_string(),
            second: field.to_string(),
        }),
        Entry::Vacant(slot) => {
            slot.insert(field);
            Ok(())
        }
    }
}

/// Validate a schema and derive every field's lookup keys.
pub(crate) fn plan<'s, T: Default>(
    schema: &'s Schema<T>,
    config: &BindConfig,
) -> BindResult<Vec<Binding<'s, T>>> {
    let prefix = config.effective_prefix();
    let descriptors = schema.descriptors()?;

    let bindings: Vec<_> = schema
        .fields()
        .iter()
        .zip(descriptors)
        .map(|(field, descriptor)| Binding {
            field,
            keys: derive_keys(prefix, field.name()),
            descriptor,
        })
        .collect();

    let mut flag_keys = HashMap::new();
    let mut env_keys = HashMap::new();
    for binding in &bindings {
        let name = binding.field.name();
        let keys = &binding.keys;
        let reserved = RESERVED_FLAGS.contains(&keys.flag.as_str());
        if reserved || keys.flag.is_empty() || keys.env.is_empty() {
            return Err(BindError::ReservedKey {
                key: keys.flag.clone(),
                field: name.to_string(),
            });
        }
        claim(&mut flag_keys, &binding.keys.flag, name)?;
        claim(&mut env_keys, &binding.keys.env, name)?;
    }

    Ok(bindings)
}

/// Bind `T` from the process's command-line arguments and environment.
pub fn bind<T: Bind>(config: &BindConfig) -> BindResult<T> {
    bind_from(config, std::env::args_os(), &ProcessEnv)
}

/// Bind `T` from explicit arguments and an environment source.
///
/// `args` includes the program name as its first element.
pub fn bind_from<T, I, A, E>(config: &BindConfig, args: I, env: &E) -> BindResult<T>
where
    T: Bind,
    I: IntoIterator<Item = A>,
    A: Into<OsString>,
    E: EnvSource + ?Sized,
{
    resolve_from(config, args, env).map(Resolved::into_inner)
}

/// Like [`bind`], also reporting where each field's value came from.
pub fn resolve<T: Bind>(config: &BindConfig) -> BindResult<Resolved<T>> {
    resolve_from(config, std::env::args_os(), &ProcessEnv)
}

/// Like [`bind_from`], also reporting where each field's value came from.
pub fn resolve_from<T, I, A, E>(config: &BindConfig, args: I, env: &E) -> BindResult<Resolved<T>>
where
    T: Bind,
    I: IntoIterator<Item = A>,
    A: Into<OsString>,
    E: EnvSource + ?Sized,
{
    let schema = T::schema();
    let bindings = plan(&schema, config)?;
    debug!(
        prefix = config.effective_prefix(),
        fields = bindings.len(),
        prefer_flag = config.prefer_flag,
        "binding configuration"
    );

    let env_candidate = sources::env::read_env(&bindings, config.presence, env)?;
    let flag_candidate = sources::flags::read_flags(&bindings, config, args)?;
    merge::merge(&bindings, config, flag_candidate, env_candidate)
}

/// Render help text listing each flag, its environment variable and default.
pub fn usage<T: Bind>(config: &BindConfig) -> BindResult<String> {
    let schema = T::schema();
    let bindings = plan(&schema, config)?;
    Ok(sources::flags::command(&bindings, config).render_help().to_string())
}
