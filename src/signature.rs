//! Detached-signature verification contract.

use crate::fingerprint::{Fingerprint, TrustedFingerprints};

/// The result of checking a detached signature.
///
/// The status message is only meaningful on failure, where it carries the
/// human-readable reason surfaced in
/// [`DownloadError::VerificationFailed`](crate::error::DownloadError::VerificationFailed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    succeeded: bool,
    signer_fingerprint: Fingerprint,
    status_message: String,
}

impl VerificationOutcome {
    /// Build an outcome from its raw parts.
    #[must_use]
    pub fn new(
        succeeded: bool,
        signer_fingerprint: Fingerprint,
        status_message: impl Into<String>,
    ) -> Self {
        Self {
            succeeded,
            signer_fingerprint,
            status_message: status_message.into(),
        }
    }

    /// A successful verification by the key identified by `signer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigfetch::fingerprint::Fingerprint;
    /// use sigfetch::signature::VerificationOutcome;
    ///
    /// let outcome = VerificationOutcome::verified(Fingerprint::from("fooFingerprint"));
    /// assert!(outcome.succeeded());
    /// ```
    #[must_use]
    pub fn verified(signer: Fingerprint) -> Self {
        Self::new(true, signer, "")
    }

    /// A failed verification with a diagnostic message.
    #[must_use]
    pub fn failed(status_message: impl Into<String>) -> Self {
        Self::new(false, Fingerprint::default(), status_message)
    }

    /// Return whether the signature verified.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Return the fingerprint of the signing key.
    #[must_use]
    pub const fn signer_fingerprint(&self) -> &Fingerprint {
        &self.signer_fingerprint
    }

    /// Return the status message.
    #[must_use]
    pub fn status_message(&self) -> &str {
        &self.status_message
    }
}

/// Trait for checking a detached signature against trusted signers.
///
/// Implementations decide which keys the trusted fingerprints select and how
/// the signature bytes are encoded.
#[cfg_attr(test, mockall::automock)]
pub trait SignatureVerifier: Send + Sync {
    /// Verify `signature` over `content`, accepting only signers whose
    /// fingerprint is in `trusted`.
    fn verify(
        &self,
        content: &[u8],
        signature: &[u8],
        trusted: &TrustedFingerprints,
    ) -> VerificationOutcome;
}
