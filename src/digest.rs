//! Content digest values pinned on a locator.
//!
//! A [`Digest`] pairs an algorithm with a validated, lowercase hex string.
//! Computing digests is the job of a
//! [`ChecksumService`](crate::checksum::ChecksumService); this module only
//! models and validates the values.

use crate::error::{ParseError, Result};
use std::fmt;
use std::str::FromStr;

/// Hash algorithms a pinned digest may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// SHA-1 (40 hex characters).
    Sha1,
    /// SHA-256 (64 hex characters).
    Sha256,
    /// SHA-384 (96 hex characters).
    Sha384,
    /// SHA-512 (128 hex characters).
    Sha512,
}

impl DigestAlgorithm {
    const ALL: [Self; 4] = [Self::Sha1, Self::Sha256, Self::Sha384, Self::Sha512];

    /// Return the lowercase algorithm label used in `algo:hex` notation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Return the length of a hex-encoded digest produced by this algorithm.
    #[must_use]
    pub const fn hex_len(self) -> usize {
        match self {
            Self::Sha1 => 40,
            Self::Sha256 => 64,
            Self::Sha384 => 96,
            Self::Sha512 => 128,
        }
    }

    fn from_hex_len(len: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|algorithm| algorithm.hex_len() == len)
    }

    fn from_name(name: &str) -> Option<Self> {
        let normalised = name.replace('-', "").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == normalised)
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated hex-encoded content digest.
///
/// # Examples
///
/// ```
/// use sigfetch::digest::{Digest, DigestAlgorithm};
///
/// let hex = "ab".repeat(32);
/// let digest: Digest = format!("sha256:{hex}").parse().unwrap();
/// assert_eq!(digest.algorithm(), DigestAlgorithm::Sha256);
/// assert_eq!(digest.hex(), hex);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    algorithm: DigestAlgorithm,
    hex: String,
}

impl Digest {
    /// Build a digest from an algorithm and its hex encoding.
    ///
    /// Uppercase hex is accepted and normalised to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidDigest`] if the hex string has the wrong
    /// length for `algorithm` or contains non-hex characters.
    pub fn new(algorithm: DigestAlgorithm, hex: impl Into<String>) -> Result<Self> {
        let raw = hex.into();
        validate_hex(algorithm, &raw)?;
        Ok(Self {
            algorithm,
            hex: raw.to_ascii_lowercase(),
        })
    }

    /// Wrap lowercase hex produced by a hasher for `algorithm`.
    pub(crate) const fn from_computed(algorithm: DigestAlgorithm, hex: String) -> Self {
        Self { algorithm, hex }
    }

    /// Return the digest algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Return the lowercase hex encoding.
    #[must_use]
    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl FromStr for Digest {
    type Err = ParseError;

    /// Parse `algo:hex` or bare hex, inferring the algorithm from its length.
    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let Some((label, hex)) = trimmed.split_once(':') else {
            let algorithm =
                DigestAlgorithm::from_hex_len(trimmed.len()).ok_or_else(|| {
                    ParseError::InvalidDigest {
                        value: value.to_owned(),
                        reason: format!(
                            "cannot infer algorithm from {} hex characters",
                            trimmed.len()
                        ),
                    }
                })?;
            return Self::new(algorithm, trimmed);
        };
        let algorithm =
            DigestAlgorithm::from_name(label).ok_or_else(|| ParseError::InvalidDigest {
                value: value.to_owned(),
                reason: format!("unknown algorithm \"{label}\""),
            })?;
        Self::new(algorithm, hex)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hex)
    }
}

fn validate_hex(algorithm: DigestAlgorithm, value: &str) -> Result<()> {
    if value.len() != algorithm.hex_len() {
        return Err(ParseError::InvalidDigest {
            value: value.to_owned(),
            reason: format!(
                "{algorithm} expects {} hex characters, got {}",
                algorithm.hex_len(),
                value.len()
            ),
        });
    }
    if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidDigest {
            value: value.to_owned(),
            reason: format!("non-hex character '{bad}'"),
        });
    }
    Ok(())
}
