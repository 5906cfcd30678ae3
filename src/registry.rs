//! Sources of the trusted fingerprint set.

use crate::fingerprint::{Fingerprint, TrustedFingerprints};
use log::debug;
use std::sync::{PoisonError, RwLock};

/// Trait for supplying the fingerprints currently considered authoritative.
///
/// The downloader queries the registry once per download and never caches
/// the answer, so implementations that change over time make revocations
/// effective immediately.
#[cfg_attr(test, mockall::automock)]
pub trait FingerprintRegistry: Send + Sync {
    /// Return the current trusted fingerprint set.
    fn known_fingerprints(&self) -> TrustedFingerprints;
}

/// A registry held in memory and mutable at runtime.
///
/// # Examples
///
/// ```
/// use sigfetch::fingerprint::Fingerprint;
/// use sigfetch::registry::{FingerprintRegistry, InMemoryRegistry};
///
/// let registry = InMemoryRegistry::default();
/// registry.trust(Fingerprint::from("abc"));
/// assert_eq!(registry.known_fingerprints().len(), 1);
/// registry.revoke(&Fingerprint::from("abc"));
/// assert!(registry.known_fingerprints().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    trusted: RwLock<TrustedFingerprints>,
}

impl InMemoryRegistry {
    /// Create a registry trusting exactly `fingerprints`.
    #[must_use]
    pub const fn new(fingerprints: TrustedFingerprints) -> Self {
        Self {
            trusted: RwLock::new(fingerprints),
        }
    }

    /// Start trusting `fingerprint`.
    pub fn trust(&self, fingerprint: Fingerprint) {
        debug!("trusting signer {fingerprint}");
        self.trusted
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(fingerprint);
    }

    /// Stop trusting `fingerprint`. Takes effect on the next download.
    pub fn revoke(&self, fingerprint: &Fingerprint) {
        debug!("revoking signer {fingerprint}");
        self.trusted
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(fingerprint);
    }
}

impl FingerprintRegistry for InMemoryRegistry {
    fn known_fingerprints(&self) -> TrustedFingerprints {
        self.trusted
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
