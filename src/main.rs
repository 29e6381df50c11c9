//! Prints the resolved time attributes of every run described by a
//! settings file, one JSON object per line.
//!
//! Usage: `timeinfo [SETTINGS_FILE]`, with `TIMEINFO_*` environment
//! variables overriding the file and `RUST_LOG` controlling log output.

use std::path::PathBuf;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use timeinfo::resolve::resolve;
use timeinfo::settings::Settings;

fn run(path: Option<PathBuf>) -> timeinfo::Result<()> {
    let settings = Settings::load(path.as_deref())?;
    let inputs = settings.time_inputs()?;
    info!(records = inputs.len(), "resolving");
    for input in &inputs {
        let info = resolve(input)?;
        println!("{}", serde_json::to_string(&info.fields())?);
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args().nth(1).map(PathBuf::from);
    if let Err(e) = run(path) {
        error!(%e, "failed");
        std::process::exit(1);
    }
}
