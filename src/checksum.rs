//! Content digest computation and comparison.

use crate::digest::{Digest, DigestAlgorithm};

/// Trait for checking retrieved bytes against a pinned digest.
#[cfg_attr(test, mockall::automock)]
pub trait ChecksumService: Send + Sync {
    /// Return whether `content` hashes to `expected`.
    fn matches(&self, content: &[u8], expected: &Digest) -> bool;

    /// Compute the digest of `content` with `algorithm`.
    fn digest(&self, content: &[u8], algorithm: DigestAlgorithm) -> Digest;
}

/// Checksum service backed by the RustCrypto `sha1` and `sha2` hashers.
///
/// # Examples
///
/// ```
/// use sigfetch::checksum::{ChecksumService, ShaChecksumService};
/// use sigfetch::digest::DigestAlgorithm;
///
/// let digest = ShaChecksumService.digest(b"", DigestAlgorithm::Sha256);
/// assert!(digest.hex().starts_with("e3b0c442"));
/// assert!(ShaChecksumService.matches(b"", &digest));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ShaChecksumService;

impl ChecksumService for ShaChecksumService {
    fn matches(&self, content: &[u8], expected: &Digest) -> bool {
        self.digest(content, expected.algorithm()).hex() == expected.hex()
    }

    fn digest(&self, content: &[u8], algorithm: DigestAlgorithm) -> Digest {
        let hex = match algorithm {
            DigestAlgorithm::Sha1 => hex_digest::<sha1::Sha1>(content),
            DigestAlgorithm::Sha256 => hex_digest::<sha2::Sha256>(content),
            DigestAlgorithm::Sha384 => hex_digest::<sha2::Sha384>(content),
            DigestAlgorithm::Sha512 => hex_digest::<sha2::Sha512>(content),
        };
        Digest::from_computed(algorithm, hex)
    }
}

fn hex_digest<D: sha2::Digest>(content: &[u8]) -> String {
    hex::encode(D::digest(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::sha1(DigestAlgorithm::Sha1, "a9993e364706816aba3e25717850c26c9cd0d89d")]
    #[case::sha256(
        DigestAlgorithm::Sha256,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    )]
    fn digest_matches_known_vectors(#[case] algorithm: DigestAlgorithm, #[case] expected: &str) {
        let digest = ShaChecksumService.digest(b"abc", algorithm);
        assert_eq!(digest.hex(), expected);
    }

    #[rstest]
    #[case::sha384(DigestAlgorithm::Sha384)]
    #[case::sha512(DigestAlgorithm::Sha512)]
    fn digest_has_algorithm_length(#[case] algorithm: DigestAlgorithm) {
        let digest = ShaChecksumService.digest(b"phar-content", algorithm);
        assert_eq!(digest.hex().len(), algorithm.hex_len());
    }

    #[test]
    fn matches_rejects_other_content() {
        let expected = ShaChecksumService.digest(b"phar-content", DigestAlgorithm::Sha1);
        assert!(ShaChecksumService.matches(b"phar-content", &expected));
        assert!(!ShaChecksumService.matches(b"not-matching", &expected));
    }
}
