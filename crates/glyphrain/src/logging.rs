//! File logging.
//!
//! The terminal belongs to the UI while the app runs, so logs only go to a
//! daily rolling file under the platform cache directory.

use std::path::PathBuf;

use color_eyre::Result;
use directories::ProjectDirs;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default level when `GLYPHRAIN_LOG` holds no filter
    pub level: Level,
    /// Directory for log files; `None` disables logging
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_dir: Some(Self::default_log_dir()),
        }
    }
}

impl LoggingConfig {
    /// OS-appropriate log directory, e.g. `~/.cache/glyphrain` on Linux
    pub fn default_log_dir() -> PathBuf {
        ProjectDirs::from("", "", "glyphrain")
            .map(|dirs| dirs.cache_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("glyphrain-logs"))
    }

    /// Create logging configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("GLYPHRAIN_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if std::env::var("GLYPHRAIN_NO_FILE_LOGS").is_ok() {
            config.log_dir = None;
        }

        config
    }
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the whole run; dropping it flushes the
/// log file. An unusable log directory disables logging with a warning on
/// stderr instead of failing startup.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let Some(log_dir) = &config.log_dir else {
        return Ok(None);
    };
    if let Err(err) = std::fs::create_dir_all(log_dir) {
        eprintln!(
            "glyphrain: logging disabled, cannot create {}: {err}",
            log_dir.display()
        );
        return Ok(None);
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, "glyphrain.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::builder()
        .with_default_directive(config.level.into())
        .with_env_var("GLYPHRAIN_LOG")
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init()?;

    Ok(Some(guard))
}
