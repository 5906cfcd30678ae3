//! Signer fingerprints and the trusted fingerprint set.
//!
//! Fingerprints are opaque to the pipeline: whatever identifier the
//! signature verifier uses for a key is carried through unchanged.

use std::collections::BTreeSet;
use std::fmt;

/// A stable identifier of the key that produced a signature.
///
/// # Examples
///
/// ```
/// use sigfetch::fingerprint::Fingerprint;
///
/// let fingerprint = Fingerprint::from("fooFingerprint");
/// assert_eq!(fingerprint.as_str(), "fooFingerprint");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Return the fingerprint as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for Fingerprint {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Fingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The allow-list of signer fingerprints considered authoritative.
///
/// A fresh set is obtained from the
/// [`FingerprintRegistry`](crate::registry::FingerprintRegistry) for every
/// download, so a revocation takes effect on the next call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustedFingerprints(BTreeSet<Fingerprint>);

impl TrustedFingerprints {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Add a fingerprint, returning `true` if it was not already present.
    pub fn insert(&mut self, fingerprint: Fingerprint) -> bool {
        self.0.insert(fingerprint)
    }

    /// Remove a fingerprint, returning `true` if it was present.
    pub fn remove(&mut self, fingerprint: &Fingerprint) -> bool {
        self.0.remove(fingerprint)
    }

    /// Return whether `fingerprint` is trusted.
    #[must_use]
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.0.contains(fingerprint)
    }

    /// Return whether no fingerprint is trusted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the number of trusted fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the trusted fingerprints.
    pub fn iter(&self) -> impl Iterator<Item = &Fingerprint> {
        self.0.iter()
    }
}

impl FromIterator<Fingerprint> for TrustedFingerprints {
    fn from_iter<I: IntoIterator<Item = Fingerprint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for TrustedFingerprints {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(Fingerprint::from).collect()
    }
}
