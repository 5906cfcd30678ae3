//! Release locators consumed by the downloader.

use crate::digest::Digest;
use semver::Version;
use url::Url;

/// Describes where a release and its detached signature live.
///
/// Locators are produced by release resolution and are immutable once built.
///
/// # Examples
///
/// ```
/// use semver::Version;
/// use sigfetch::locator::ArtefactLocator;
/// use url::Url;
///
/// let locator = ArtefactLocator::new(
///     "foo",
///     Version::new(1, 0, 0),
///     Url::parse("https://example.com/foo.phar").unwrap(),
///     Url::parse("https://example.com/foo.phar.asc").unwrap(),
/// );
/// assert_eq!(locator.file_name(), "foo.phar");
/// assert!(locator.expected_digest().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactLocator {
    name: String,
    version: Version,
    artefact_url: Url,
    signature_url: Url,
    expected_digest: Option<Digest>,
}

impl ArtefactLocator {
    /// Create a locator without a pinned digest.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: Version,
        artefact_url: Url,
        signature_url: Url,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            artefact_url,
            signature_url,
            expected_digest: None,
        }
    }

    /// Pin the digest the artefact bytes must match.
    #[must_use]
    pub fn with_expected_digest(mut self, digest: Digest) -> Self {
        self.expected_digest = Some(digest);
        self
    }

    /// Return the logical release name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the release version.
    #[must_use]
    pub const fn version(&self) -> &Version {
        &self.version
    }

    /// Return the artefact URL.
    #[must_use]
    pub const fn artefact_url(&self) -> &Url {
        &self.artefact_url
    }

    /// Return the detached signature URL.
    #[must_use]
    pub const fn signature_url(&self) -> &Url {
        &self.signature_url
    }

    /// Return the pinned digest, if any.
    #[must_use]
    pub const fn expected_digest(&self) -> Option<&Digest> {
        self.expected_digest.as_ref()
    }

    /// Derive the file name the retrieved artefact is stored under.
    ///
    /// Uses the last non-empty path segment of the artefact URL, or
    /// `{name}-{version}` when the URL has no usable segment.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.artefact_url
            .path_segments()
            .and_then(|mut segments| segments.rfind(|segment| !segment.is_empty()))
            .map_or_else(
                || format!("{}-{}", self.name, self.version),
                str::to_owned,
            )
    }
}
