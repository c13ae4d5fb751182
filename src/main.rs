//! Example binary: binds a small record from flags and environment and
//! prints the result as JSON.
//!
//! ```text
//! TEST_INT64_FIELD=7 flagenv-example -test-string-field hello
//! ```

use anyhow::Result;
use flagenv::{BindConfig, BindError, bindable};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding the log filter, e.g. `debug`.
const LOG_ENV: &str = "FLAGENV_LOG";

#[derive(Debug, Default, Serialize)]
struct ExampleConfig {
    string_field: String,
    int64_field: i64,
}

bindable!(ExampleConfig {
    string_field,
    int64_field,
});

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = BindConfig::new("test").with_prefer_flag(true);
    let resolved = match flagenv::resolve::<ExampleConfig>(&config) {
        Ok(resolved) => resolved,
        // Help requests and bad flags print clap's own message.
        Err(BindError::Flags(err)) => err.exit(),
        Err(err) => return Err(err.into()),
    };

    for field in &resolved.origins {
        info!(field = field.field, origin = %field.origin, "bound field");
    }
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
