use crate::error::{BotError, Result};
use env_logger::{Builder, Env, Target, WriteStyle};
use std::fs::OpenOptions;
use std::path::Path;

/// Installs the process logger. `RUST_LOG` takes precedence over `level`.
pub fn init(level: &str, log_file: Option<&Path>) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(level));
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                BotError::Config(format!("Unable to open log file {}: {}", path.display(), e))
            })?;
        builder
            .target(Target::Pipe(Box::new(file)))
            .write_style(WriteStyle::Never);
    }
    builder
        .try_init()
        .map_err(|e| BotError::Config(format!("Logger already initialized: {}", e)))
}
