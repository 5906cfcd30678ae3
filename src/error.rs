//! Error types for the download-and-verify pipeline.
//!
//! [`DownloadError`] is the only failure a caller of
//! [`Downloader::download`](crate::downloader::Downloader::download) ever
//! sees. [`ParseError`] covers malformed input values such as digests and
//! public keys, which are rejected before a download starts.

use crate::digest::Digest;
use crate::downloader::DownloadStage;
use thiserror::Error;
use url::Url;

/// Errors that terminate a download.
///
/// Every variant is terminal for the call that produced it; the downloader
/// never retries. Callers decide whether to try an alternate source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    /// The artefact or its signature could not be fetched.
    #[error("failed to retrieve {url}: {reason}")]
    RetrievalFailed {
        /// The URL whose fetch did not succeed.
        url: Url,
        /// The transport's description of the failure.
        reason: String,
    },

    /// The signature did not verify against any trusted fingerprint.
    #[error("signature verification failed: {message}")]
    VerificationFailed {
        /// The verifier's status message, verbatim.
        message: String,
    },

    /// The artefact bytes do not match the digest pinned on the locator.
    #[error("checksum mismatch: expected {expected}, actual {actual}")]
    ChecksumMismatch {
        /// The digest carried by the locator.
        expected: Digest,
        /// The digest computed over the retrieved bytes.
        actual: Digest,
    },
}

impl DownloadError {
    /// Return the pipeline stage at which the download failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigfetch::downloader::DownloadStage;
    /// use sigfetch::error::DownloadError;
    ///
    /// let err = DownloadError::VerificationFailed {
    ///     message: "bad signature".to_owned(),
    /// };
    /// assert_eq!(err.stage(), DownloadStage::Verifying);
    /// ```
    #[must_use]
    pub const fn stage(&self) -> DownloadStage {
        match self {
            Self::RetrievalFailed { .. } => DownloadStage::Fetching,
            Self::VerificationFailed { .. } => DownloadStage::Verifying,
            Self::ChecksumMismatch { .. } => DownloadStage::ChecksumChecking,
        }
    }
}

/// Errors arising from invalid input values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A digest string is malformed or names an unknown algorithm.
    #[error("invalid digest \"{value}\": {reason}")]
    InvalidDigest {
        /// The rejected digest string.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A public key is not a valid base64-encoded Ed25519 key.
    #[error("invalid public key: {reason}")]
    InvalidPublicKey {
        /// Description of the validation failure.
        reason: String,
    },
}

/// Result type alias using [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
