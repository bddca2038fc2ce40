use std::fs::File;
use std::path::PathBuf;
use std::sync::Once;

use crate::error::{AppError, Result};

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax. When `file` is set
/// the log goes there, since the clock face owns the terminal.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub file: Option<PathBuf>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let target = match &config.file {
        Some(path) => {
            let file = File::create(path).map_err(|source| AppError::LogFile {
                path: path.clone(),
                source,
            })?;
            env_logger::Target::Pipe(Box::new(file))
        }
        None => env_logger::Target::Stderr,
    };

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        builder.target(target);
        builder.init();

        log::debug!("logging initialized");
    });
    Ok(())
}
