//! Download-and-verify orchestrator.
//!
//! Fetches an artefact and its detached signature, checks the signature
//! against the currently trusted fingerprints, optionally confirms a pinned
//! digest, and only then hands out a [`VerifiedArtefact`]. The first failure
//! ends the call; there are no retries at this layer.

use crate::checksum::ChecksumService;
use crate::error::DownloadError;
use crate::file::ArtefactFile;
use crate::locator::ArtefactLocator;
use crate::registry::FingerprintRegistry;
use crate::signature::SignatureVerifier;
use crate::transport::Transport;
use crate::verified::VerifiedArtefact;
use log::{debug, info, warn};
use std::fmt;
use url::Url;

/// The non-terminal stages of a single download.
///
/// A call moves through the stages in order and never revisits one; it ends
/// either with a [`VerifiedArtefact`] or with a [`DownloadError`] whose
/// [`stage`](DownloadError::stage) names where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownloadStage {
    /// Retrieving the artefact and signature bytes.
    Fetching,
    /// Checking the detached signature.
    Verifying,
    /// Comparing the artefact bytes against the pinned digest.
    ChecksumChecking,
}

impl fmt::Display for DownloadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetching => "fetching",
            Self::Verifying => "verifying",
            Self::ChecksumChecking => "checksum checking",
        })
    }
}

/// Composes the four collaborators into the download pipeline.
///
/// The downloader holds shared references only and keeps no state between
/// calls, so one instance may serve concurrent downloads.
pub struct Downloader<'a> {
    transport: &'a dyn Transport,
    verifier: &'a dyn SignatureVerifier,
    checksum: &'a dyn ChecksumService,
    registry: &'a dyn FingerprintRegistry,
}

impl<'a> Downloader<'a> {
    /// Create a downloader over the given collaborators.
    #[must_use]
    pub fn new(
        transport: &'a dyn Transport,
        verifier: &'a dyn SignatureVerifier,
        checksum: &'a dyn ChecksumService,
        registry: &'a dyn FingerprintRegistry,
    ) -> Self {
        Self {
            transport,
            verifier,
            checksum,
            registry,
        }
    }

    /// Download the release described by `locator` and verify it.
    ///
    /// The artefact is fetched before the signature. The trusted fingerprint
    /// set is read from the registry on every call. Signature verification
    /// always runs before the checksum check, and the checksum check only
    /// runs when the locator pins a digest.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::RetrievalFailed`] if either fetch does not succeed.
    /// - [`DownloadError::VerificationFailed`] if the verifier rejects the
    ///   signature.
    /// - [`DownloadError::ChecksumMismatch`] if a pinned digest does not
    ///   match the artefact bytes.
    pub fn download(&self, locator: &ArtefactLocator) -> Result<VerifiedArtefact, DownloadError> {
        let label = format!("{}@{}", locator.name(), locator.version());

        debug!("{label}: {}", DownloadStage::Fetching);
        let content = self.fetch(locator.artefact_url())?;
        let signature = self.fetch(locator.signature_url())?;

        debug!("{label}: {}", DownloadStage::Verifying);
        let trusted = self.registry.known_fingerprints();
        let outcome = self.verifier.verify(&content, &signature, &trusted);
        if !outcome.succeeded() {
            warn!(
                "{label}: signature rejected: {}",
                outcome.status_message()
            );
            return Err(DownloadError::VerificationFailed {
                message: outcome.status_message().to_owned(),
            });
        }

        if let Some(expected) = locator.expected_digest() {
            debug!("{label}: {}", DownloadStage::ChecksumChecking);
            if !self.checksum.matches(&content, expected) {
                let actual = self.checksum.digest(&content, expected.algorithm());
                warn!("{label}: checksum mismatch, expected {expected}, got {actual}");
                return Err(DownloadError::ChecksumMismatch {
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        let signer = outcome.signer_fingerprint().clone();
        info!("{label}: verified, signed by {signer}");
        Ok(VerifiedArtefact::new(
            locator.name().to_owned(),
            locator.version().clone(),
            ArtefactFile::new(locator.file_name(), content),
            signer,
        ))
    }

    fn fetch(&self, url: &Url) -> Result<Vec<u8>, DownloadError> {
        let result = self.transport.fetch(url);
        if !result.succeeded() {
            warn!("retrieval of {} failed: {}", redacted(url), result.reason());
            return Err(DownloadError::RetrievalFailed {
                url: url.clone(),
                reason: result.reason().to_owned(),
            });
        }
        Ok(result.into_body())
    }
}

/// Strip the query and fragment, which may carry access tokens, for logging.
fn redacted(url: &Url) -> Url {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.set_fragment(None);
    shown
}

#[cfg(test)]
#[path = "downloader_tests.rs"]
mod tests;
