//! Error types for airlaunch-core.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Everything that can stop `air` from running to a successful exit.
///
/// Both the spawn and exit failures are terminal: the caller reports them
/// once and exits non-zero.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The child process could not be created (missing binary, permissions, ...).
    #[error("Failed to start air: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `~/` in the program path could not be expanded.
    #[error("Failed to start air: cannot determine home directory to expand {}", .program.display())]
    HomeNotFound { program: PathBuf },

    /// The child ran but exited non-zero or was killed by a signal.
    #[error("Air command finished with error: {status}")]
    Exited { status: ExitStatus },

    /// Waiting on a running child failed at the OS level.
    #[error("Air command finished with error: {source}")]
    Wait {
        #[source]
        source: std::io::Error,
    },
}

/// Errors from reading `server.config.json`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse server config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
