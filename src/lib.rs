//! Download release artefacts and accept them only once verified.
//!
//! `sigfetch` fetches an artefact and its detached signature, checks the
//! signature against the signer fingerprints currently trusted, optionally
//! confirms a pinned content digest, and only then yields a
//! [`VerifiedArtefact`](verified::VerifiedArtefact). Transport, signature
//! checking, digest computation and the trusted fingerprint set are supplied
//! by collaborators behind narrow traits, so each can be substituted.
//!
//! # Modules
//!
//! - [`downloader`] - The download-and-verify pipeline
//! - [`locator`] - Release locators consumed by the pipeline
//! - [`verified`] - The verified artefact record
//! - [`file`] - Retrieved content wrapped as a named file
//! - [`transport`] - URL retrieval trait and `ureq` implementation
//! - [`signature`] - Signature verification trait and outcome
//! - [`ed25519`] - Ed25519 verifier and keyring
//! - [`checksum`] - Digest comparison trait and SHA implementation
//! - [`registry`] - Trusted fingerprint sources
//! - [`digest`] - Content digest values
//! - [`fingerprint`] - Signer fingerprints and the trusted set
//! - [`error`] - Error types

pub mod checksum;
pub mod digest;
pub mod downloader;
pub mod ed25519;
pub mod error;
pub mod file;
pub mod fingerprint;
pub mod locator;
pub mod registry;
pub mod signature;
pub mod transport;
pub mod verified;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use downloader::Downloader;
pub use error::DownloadError;
pub use locator::ArtefactLocator;
pub use verified::VerifiedArtefact;
