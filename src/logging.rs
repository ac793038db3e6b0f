use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::model::config::LogConfig;

/// Filter directive used when nothing else picks one
pub const DEFAULT_LEVEL: &str = "warn";

/// Pick the filter directive: `-v` count beats the config file, which beats
/// the default. `RUST_LOG` is checked separately in `init` and wins over all.
pub fn level_directive(verbose: u8, config: &LogConfig) -> String {
    match verbose {
        0 => config
            .level
            .clone()
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to `config.file` when set, otherwise to stderr. Returns an error
/// only when the log file cannot be opened.
pub fn init(verbose: u8, config: &LogConfig) -> Result<(), std::io::Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(verbose, config)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match config.file.as_deref() {
        Some(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(open_log_file(path)?))
            .try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    // A second init (tests, embedding) keeps the first subscriber
    if let Err(e) = result {
        tracing::debug!("tracing already initialised: {e}");
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<std::fs::File, std::io::Error> {
    OpenOptions::new().create(true).append(true).open(path)
}
