//! Stub collaborators for behaviour tests.
//!
//! Available with the `test-support` feature. Every stub records how it was
//! used so scenarios can assert that a gate was, or was not, reached.

use crate::checksum::{ChecksumService, ShaChecksumService};
use crate::digest::{Digest, DigestAlgorithm};
use crate::fingerprint::{Fingerprint, TrustedFingerprints};
use crate::registry::{FingerprintRegistry, InMemoryRegistry};
use crate::signature::{SignatureVerifier, VerificationOutcome};
use crate::transport::{FetchResult, Transport};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use url::Url;

/// Return the lowercase hex SHA-256 of `content`.
#[must_use]
pub fn sha256_hex(content: &[u8]) -> String {
    ShaChecksumService
        .digest(content, DigestAlgorithm::Sha256)
        .hex()
        .to_owned()
}

/// A transport answering from a fixed table of URLs.
///
/// Unknown URLs produce a failed fetch.
#[derive(Debug, Default)]
pub struct StubTransport {
    responses: HashMap<Url, FetchResult>,
    requests: Mutex<Vec<Url>>,
}

impl StubTransport {
    /// Create a transport with no responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer fetches of `url` with `result`.
    #[must_use]
    pub fn with_response(mut self, url: Url, result: FetchResult) -> Self {
        self.responses.insert(url, result);
        self
    }

    /// Return the URLs fetched so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<Url> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transport for StubTransport {
    fn fetch(&self, url: &Url) -> FetchResult {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.clone());
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| FetchResult::failure(format!("no stub response for {url}")))
    }
}

/// A verifier that returns the same outcome for every call.
#[derive(Debug)]
pub struct FixedVerifier {
    outcome: VerificationOutcome,
    calls: Mutex<Vec<TrustedFingerprints>>,
}

impl FixedVerifier {
    /// Create a verifier that always answers `outcome`.
    #[must_use]
    pub const fn new(outcome: VerificationOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Return the trusted sets passed to each call, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<TrustedFingerprints> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SignatureVerifier for FixedVerifier {
    fn verify(
        &self,
        _content: &[u8],
        _signature: &[u8],
        trusted: &TrustedFingerprints,
    ) -> VerificationOutcome {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(trusted.clone());
        self.outcome.clone()
    }
}

/// A verifier that succeeds only while `signer` is trusted.
///
/// Stands in for a real verifier whose key signed every artefact.
#[derive(Debug)]
pub struct TrustingVerifier {
    signer: Fingerprint,
}

impl TrustingVerifier {
    /// Create a verifier whose signatures all come from `signer`.
    #[must_use]
    pub const fn new(signer: Fingerprint) -> Self {
        Self { signer }
    }
}

impl SignatureVerifier for TrustingVerifier {
    fn verify(
        &self,
        _content: &[u8],
        _signature: &[u8],
        trusted: &TrustedFingerprints,
    ) -> VerificationOutcome {
        if trusted.contains(&self.signer) {
            VerificationOutcome::verified(self.signer.clone())
        } else {
            VerificationOutcome::failed(format!("signer {} is not trusted", self.signer))
        }
    }
}

/// A SHA checksum service that counts how often it is consulted.
#[derive(Debug, Default)]
pub struct CountingChecksum {
    inner: ShaChecksumService,
    matches_calls: AtomicUsize,
}

impl CountingChecksum {
    /// Return how many times `matches` has been called.
    #[must_use]
    pub fn matches_calls(&self) -> usize {
        self.matches_calls.load(Ordering::SeqCst)
    }
}

impl ChecksumService for CountingChecksum {
    fn matches(&self, content: &[u8], expected: &Digest) -> bool {
        self.matches_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.matches(content, expected)
    }

    fn digest(&self, content: &[u8], algorithm: DigestAlgorithm) -> Digest {
        self.inner.digest(content, algorithm)
    }
}

/// An in-memory registry that counts how often it is queried.
#[derive(Debug, Default)]
pub struct CountingRegistry {
    inner: InMemoryRegistry,
    queries: AtomicUsize,
}

impl CountingRegistry {
    /// Return the wrapped registry, for trusting and revoking signers.
    #[must_use]
    pub const fn registry(&self) -> &InMemoryRegistry {
        &self.inner
    }

    /// Return how many times the trusted set has been read.
    #[must_use]
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl FingerprintRegistry for CountingRegistry {
    fn known_fingerprints(&self) -> TrustedFingerprints {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.known_fingerprints()
    }
}
