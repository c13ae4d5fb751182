//! Command-line flag reader.
//!
//! Every bind call builds its own `clap::Command`, so nothing is registered
//! process-wide and binding may run any number of times. Flags are accepted
//! in both `-key value` and `--key value` forms, with `=value` as well.
//! Parsing stops at the first positional argument; it and everything after
//! it are ignored.

use super::{Candidate, Origin, is_supplied};
use crate::bind::Binding;
use crate::config::BindConfig;
use crate::error::BindResult;
use crate::schema::{FieldKind, ScalarKind};
use clap::{Arg, ArgAction, Command};
use heck::ToKebabCase;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use tracing::trace;

/// Id of the trailing positional argument that ends flag parsing. Flag keys
/// are kebab case, so none can contain `_`.
const TRAILING: &str = "__trailing";

fn flag_arg<T>(binding: &Binding<'_, T>) -> Arg {
    let descriptor = &binding.descriptor;
    let help = match descriptor.default {
        Some(default) => format!(
            "{} [env: {}] [default: {}]",
            descriptor.kind, binding.keys.env, default
        ),
        None => format!("{} [env: {}]", descriptor.kind, binding.keys.env),
    };

    let arg = Arg::new(binding.keys.flag.clone())
        .long(binding.keys.flag.clone())
        .value_parser(clap::value_parser!(String))
        .help(help);

    match descriptor.kind {
        // Bare `-flag` means true; an explicit value needs `=`.
        FieldKind::Scalar(ScalarKind::Bool) => arg
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true")
            .value_name("BOOL"),
        // Sequences arrive as one comma-joined value.
        FieldKind::Sequence(_) => arg
            .action(ArgAction::Set)
            .allow_hyphen_values(true)
            .value_name("LIST"),
        FieldKind::Scalar(_) => arg
            .action(ArgAction::Set)
            .allow_hyphen_values(true)
            .value_name("VALUE"),
    }
}

/// Build the flag parser for a set of bindings.
pub(crate) fn command<T>(bindings: &[Binding<'_, T>], config: &BindConfig) -> Command {
    let command = Command::new(config.effective_prefix().to_kebab_case())
        .disable_version_flag(true)
        .args_override_self(true);

    bindings
        .iter()
        .fold(command, |command, binding| command.arg(flag_arg(binding)))
        .arg(
            Arg::new(TRAILING)
                .num_args(1..)
                .trailing_var_arg(true)
                .value_parser(clap::value_parser!(OsString))
                .hide(true),
        )
}

/// Rewrite `-key` and `-key=value` to their long form when `key` is a
/// registered flag. `keys` maps each flag key to whether it takes a separate
/// value; the argument after such a key (given without `=`) is passed through
/// untouched. Arguments after `--` are left untouched.
fn normalize_args<I, A>(args: I, keys: &HashMap<&str, bool>) -> Vec<OsString>
where
    I: IntoIterator<Item = A>,
    A: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut terminated = false;
    let mut value_next = false;

    for arg in args {
        let arg: OsString = arg.into();
        if std::mem::take(&mut value_next) || terminated {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            terminated = true;
            normalized.push(arg);
            continue;
        }

        match registered_flag(&arg, keys) {
            Some(flag) => {
                value_next = flag.takes_value && !flag.inline;
                normalized.push(flag.long);
            }
            None => normalized.push(arg),
        }
    }
    normalized
}

struct FlagToken {
    /// The argument in `--key[=value]` form.
    long: OsString,
    takes_value: bool,
    /// Value attached with `=`.
    inline: bool,
}

fn registered_flag(arg: &OsStr, keys: &HashMap<&str, bool>) -> Option<FlagToken> {
    let text = arg.to_str()?;
    let (long, rest) = match text.strip_prefix("--") {
        Some(rest) => (text.to_string(), rest),
        None => {
            let rest = text.strip_prefix('-')?;
            (format!("-{}", text), rest)
        }
    };
    let (name, inline) = match rest.split_once('=') {
        Some((name, _)) => (name, true),
        None => (rest, false),
    };
    let takes_value = *keys.get(name)?;
    Some(FlagToken {
        long: OsString::from(long),
        takes_value,
        inline,
    })
}

/// Populate a record from command-line arguments.
///
/// `args` includes the program name as its first element.
pub(crate) fn read_flags<T, I, A>(
    bindings: &[Binding<'_, T>],
    config: &BindConfig,
    args: I,
) -> BindResult<Candidate<T>>
where
    T: Default,
    I: IntoIterator<Item = A>,
    A: Into<OsString>,
{
    let keys: HashMap<&str, bool> = bindings
        .iter()
        .map(|b| {
            let takes_value = b.descriptor.kind != FieldKind::Scalar(ScalarKind::Bool);
            (b.keys.flag.as_str(), takes_value)
        })
        .collect();
    let matches = command(bindings, config).try_get_matches_from(normalize_args(args, &keys))?;

    let mut value = T::default();
    let mut supplied = Vec::with_capacity(bindings.len());

    for binding in bindings {
        let raw = matches
            .get_one::<String>(binding.keys.flag.as_str())
            .map(String::as_str);
        trace!(
            field = binding.field.name(),
            key = %binding.keys.flag,
            present = raw.is_some(),
            "read flag"
        );

        binding
            .field
            .slot(&mut value)
            .assign(raw.unwrap_or(""))
            .map_err(|e| e.into_bind_error(binding.field.name(), Origin::Flag))?;
        supplied.push(is_supplied(
            config.presence,
            raw.is_some(),
            binding.field.slot(&mut value),
        ));
    }

    Ok(Candidate { value, supplied })
}
