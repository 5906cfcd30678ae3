//! Ed25519 detached-signature verification.
//!
//! Keys are identified by the lowercase hex SHA-256 of their 32 public key
//! bytes. A detached signature is accepted either as the 64 raw signature
//! bytes or as base64 text (surrounding whitespace ignored).

use crate::error::{ParseError, Result};
use crate::fingerprint::{Fingerprint, TrustedFingerprints};
use crate::signature::{SignatureVerifier, VerificationOutcome};
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use ed25519_dalek::{SIGNATURE_LENGTH, Signature, VerifyingKey};
use log::debug;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Compute the fingerprint of an Ed25519 public key.
#[must_use]
pub fn fingerprint_of(key: &VerifyingKey) -> Fingerprint {
    Fingerprint::from(hex::encode(Sha256::digest(key.as_bytes())))
}

/// Parse a base64 public key, optionally prefixed with `ed25519:`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidPublicKey`] if the value is not base64, does
/// not decode to 32 bytes, or is not a valid curve point.
pub fn parse_public_key(value: &str) -> Result<VerifyingKey> {
    let trimmed = value.trim();
    let encoded = match trimmed.split_once(':') {
        Some((alg, rest)) if alg.eq_ignore_ascii_case("ed25519") => rest,
        Some((alg, _)) => {
            return Err(ParseError::InvalidPublicKey {
                reason: format!("unsupported key algorithm \"{alg}\""),
            });
        }
        None => trimmed,
    };
    let raw = STANDARD
        .decode(encoded)
        .or_else(|_| STANDARD_NO_PAD.decode(encoded))
        .map_err(|e| ParseError::InvalidPublicKey {
            reason: format!("not valid base64: {e}"),
        })?;
    let bytes: [u8; 32] = raw
        .as_slice()
        .try_into()
        .map_err(|_| ParseError::InvalidPublicKey {
            reason: format!("expected 32 bytes, got {}", raw.len()),
        })?;
    VerifyingKey::from_bytes(&bytes).map_err(|e| ParseError::InvalidPublicKey {
        reason: e.to_string(),
    })
}

/// The public keys a verifier may check signatures against.
#[derive(Debug, Clone, Default)]
pub struct Keyring {
    keys: BTreeMap<Fingerprint, VerifyingKey>,
}

impl Keyring {
    /// Create an empty keyring.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Add `key`, returning its fingerprint.
    pub fn insert(&mut self, key: VerifyingKey) -> Fingerprint {
        let fingerprint = fingerprint_of(&key);
        self.keys.insert(fingerprint.clone(), key);
        fingerprint
    }

    /// Parse and add a base64 public key, returning its fingerprint.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be parsed; see [`parse_public_key`].
    pub fn insert_base64(&mut self, value: &str) -> Result<Fingerprint> {
        let key = parse_public_key(value)?;
        Ok(self.insert(key))
    }

    /// Return the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Return whether the keyring holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over the fingerprints of all keys.
    pub fn fingerprints(&self) -> impl Iterator<Item = &Fingerprint> {
        self.keys.keys()
    }

    fn trusted_keys<'a>(
        &'a self,
        trusted: &'a TrustedFingerprints,
    ) -> impl Iterator<Item = (&'a Fingerprint, &'a VerifyingKey)> {
        self.keys
            .iter()
            .filter(move |(fingerprint, _)| trusted.contains(fingerprint))
    }
}

/// Signature verifier that checks Ed25519 signatures against a [`Keyring`].
///
/// Only keys whose fingerprint is in the trusted set are tried.
///
/// # Examples
///
/// ```
/// use ed25519_dalek::{Signer, SigningKey};
/// use sigfetch::ed25519::{Ed25519Verifier, Keyring};
/// use sigfetch::fingerprint::TrustedFingerprints;
/// use sigfetch::signature::SignatureVerifier;
///
/// let signing_key = SigningKey::from_bytes(&[7u8; 32]);
/// let mut keyring = Keyring::new();
/// let fingerprint = keyring.insert(signing_key.verifying_key());
/// let trusted: TrustedFingerprints = [fingerprint.clone()].into_iter().collect();
///
/// let signature = signing_key.sign(b"phar-content").to_bytes();
/// let outcome = Ed25519Verifier::new(keyring).verify(b"phar-content", &signature, &trusted);
/// assert!(outcome.succeeded());
/// assert_eq!(outcome.signer_fingerprint(), &fingerprint);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ed25519Verifier {
    keyring: Keyring,
}

impl Ed25519Verifier {
    /// Create a verifier over `keyring`.
    #[must_use]
    pub const fn new(keyring: Keyring) -> Self {
        Self { keyring }
    }
}

impl SignatureVerifier for Ed25519Verifier {
    fn verify(
        &self,
        content: &[u8],
        signature: &[u8],
        trusted: &TrustedFingerprints,
    ) -> VerificationOutcome {
        let parsed = match decode_signature(signature) {
            Ok(parsed) => parsed,
            Err(reason) => return VerificationOutcome::failed(reason),
        };

        let mut tried = 0_usize;
        for (fingerprint, key) in self.keyring.trusted_keys(trusted) {
            tried += 1;
            if key.verify_strict(content, &parsed).is_ok() {
                return VerificationOutcome::verified(fingerprint.clone());
            }
            debug!("signature does not verify with key {fingerprint}");
        }

        if tried == 0 {
            VerificationOutcome::failed("no trusted signing key is available")
        } else {
            VerificationOutcome::failed(format!(
                "signature does not match any of {tried} trusted key(s)"
            ))
        }
    }
}

fn decode_signature(raw: &[u8]) -> std::result::Result<Signature, String> {
    if raw.len() == SIGNATURE_LENGTH {
        return Signature::from_slice(raw).map_err(|e| format!("malformed signature: {e}"));
    }
    let text = std::str::from_utf8(raw)
        .map_err(|_| "signature is neither raw bytes nor base64 text".to_owned())?;
    let decoded = STANDARD
        .decode(text.trim())
        .map_err(|e| format!("signature is not valid base64: {e}"))?;
    Signature::from_slice(&decoded).map_err(|e| format!("malformed signature: {e}"))
}
