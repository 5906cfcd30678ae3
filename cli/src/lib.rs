//! Command-line front end for `sigfetch`.
//!
//! The binary downloads an artefact with its detached signature, verifies it
//! against the keys in a TOML keyring, and writes it to disk only once every
//! check has passed.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`dirs`] - Platform directory lookup
//! - [`error`] - Error types
//! - [`fetch`] - The `fetch` and `fingerprint` commands
//! - [`keyring`] - Keyring files and the registry that reads them
//! - [`output`] - Summary formatting

pub mod cli;
pub mod dirs;
pub mod error;
pub mod fetch;
pub mod keyring;
pub mod output;
