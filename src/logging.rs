//! Log file setup
//!
//! The terminal belongs to the UI, so log output goes to a file. `RUST_LOG`
//! overrides the default level.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use thiserror::Error;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// File name used inside the platform data directory
pub const LOG_FILE_NAME: &str = "weatherdash.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("No home directory to place the log file in; pass --log-file")]
    NoDataDir,

    #[error("Failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid RUST_LOG filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::FromEnvError),

    #[error("Logger already installed: {0}")]
    Install(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Default log location, e.g. `~/.local/share/weatherdash/weatherdash.log`
pub fn default_log_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "weatherdash")?;
    Some(project_dirs.data_dir().join(LOG_FILE_NAME))
}

/// Opens `path` for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let open_err = |source: std::io::Error| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(open_err)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_err)
}

/// Installs the global tracing subscriber writing to a log file
///
/// Returns the path actually used.
pub fn init(log_file: Option<&Path>, debug: bool) -> Result<PathBuf, LoggingError> {
    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None => default_log_path().ok_or(LoggingError::NoDataDir)?,
    };
    let file = open_log_file(&path)?;

    let level = if debug {
        LevelFilter::DEBUG.into()
    } else {
        LevelFilter::INFO.into()
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level)
                .from_env()?,
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_file(debug)
        .with_line_number(debug)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(path)
}
