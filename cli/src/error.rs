//! Error types for the sigfetch CLI.

use crate::keyring::KeyringError;
use camino::Utf8PathBuf;
use sigfetch::DownloadError;
use sigfetch::error::ParseError;
use thiserror::Error;

/// Errors surfaced by the `sigfetch` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The download pipeline rejected the artefact.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// The keyring file could not be loaded.
    #[error("could not load keyring {path}: {source}")]
    Keyring {
        /// Keyring file that failed to load.
        path: Utf8PathBuf,
        /// Underlying keyring error.
        #[source]
        source: KeyringError,
    },

    /// No keyring was given and no default location could be determined.
    #[error("could not determine a keyring location; pass --keyring or set SIGFETCH_KEYRING")]
    KeyringLocation,

    /// A value supplied on the command line was malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The verified artefact could not be written.
    #[error("failed to save artefact to {path}: {source}")]
    SaveFailed {
        /// Destination directory.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing command output failed.
    #[error("failed to write output: {source}")]
    WriteFailed {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON summary could not be serialized.
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for CLI results.
pub type Result<T> = std::result::Result<T, CliError>;
