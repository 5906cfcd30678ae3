//! The trusted output of a successful download.

use crate::file::ArtefactFile;
use crate::fingerprint::Fingerprint;
use semver::Version;

/// An artefact whose signature, and pinned digest if any, have been verified.
///
/// Only the [`Downloader`](crate::downloader::Downloader) can construct this
/// type, so holding one is proof that every verification gate passed.
/// Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedArtefact {
    name: String,
    version: Version,
    content: ArtefactFile,
    signer_fingerprint: Fingerprint,
}

impl VerifiedArtefact {
    pub(crate) const fn new(
        name: String,
        version: Version,
        content: ArtefactFile,
        signer_fingerprint: Fingerprint,
    ) -> Self {
        Self {
            name,
            version,
            content,
            signer_fingerprint,
        }
    }

    /// Return the release name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the release version.
    #[must_use]
    pub const fn version(&self) -> &Version {
        &self.version
    }

    /// Return the retrieved file.
    #[must_use]
    pub const fn content(&self) -> &ArtefactFile {
        &self.content
    }

    /// Return the fingerprint of the key that signed the artefact.
    #[must_use]
    pub const fn signer_fingerprint(&self) -> &Fingerprint {
        &self.signer_fingerprint
    }

    /// Consume the record and return the retrieved file.
    #[must_use]
    pub fn into_content(self) -> ArtefactFile {
        self.content
    }
}
