//! Bind typed configuration records from command-line flags and environment
//! variables.
//!
//! A record declares its fields through a [`Schema`] (usually with the
//! [`bindable!`] macro). Binding derives a flag and an environment variable
//! name for every field, reads both sources, and merges them per field:
//! a field supplied by both sources takes the flag only when
//! [`BindConfig::prefer_flag`] is set, a field supplied by one source takes
//! that source, and a field supplied by neither keeps its default.
//!
//! ```
//! use flagenv::{bindable, BindConfig};
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Default)]
//! struct Example {
//!     string_field: String,
//!     int64_field: i64,
//! }
//!
//! bindable!(Example { string_field, int64_field = "10" });
//!
//! let env = HashMap::from([("TEST_STRING_FIELD".to_string(), "from-env".to_string())]);
//! let args = ["example", "-test-string-field", "from-flag"];
//! let config = BindConfig::new("test").with_prefer_flag(true);
//!
//! let example: Example = flagenv::bind_from(&config, args, &env).unwrap();
//! assert_eq!(example.string_field, "from-flag");
//! assert_eq!(example.int64_field, 10);
//! ```

pub mod bind;
pub mod config;
pub mod error;
pub mod merge;
pub mod naming;
mod parse;
pub mod schema;
pub mod sources;

pub use bind::{bind, bind_from, resolve, resolve_from, usage};
pub use config::{BindConfig, DEFAULT_PREFIX, Presence};
pub use error::{BindError, BindResult};
pub use merge::{FieldOrigin, Resolved};
pub use naming::{BindingKeys, derive_keys, env_key, flag_key};
pub use schema::{Accessor, Bind, Field, FieldDescriptor, FieldKind, FieldSlot, ScalarKind, Schema};
pub use sources::{EnvSource, Origin, ProcessEnv};
