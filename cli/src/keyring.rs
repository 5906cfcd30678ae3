//! Keyring files listing the Ed25519 keys sigfetch trusts.
//!
//! A keyring is a TOML document with one `[[keys]]` table per public key:
//!
//! ```toml
//! [[keys]]
//! name = "release-signing"
//! public_key = "ed25519:<base64>"
//!
//! [[keys]]
//! name = "old-release-signing"
//! public_key = "<base64>"
//! revoked = true
//! ```
//!
//! Revoked keys stay in the keyring so their fingerprints remain known, but
//! they are never part of the trusted set.

use crate::dirs::ConfigDirs;
use crate::error::{CliError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use sigfetch::ed25519::Keyring;
use sigfetch::error::ParseError;
use sigfetch::fingerprint::TrustedFingerprints;
use sigfetch::registry::FingerprintRegistry;
use thiserror::Error;

/// File name of the keyring inside the configuration directory.
pub const KEYRING_FILE_NAME: &str = "keyring.toml";

/// Errors raised while loading a keyring file.
#[derive(Debug, Error)]
pub enum KeyringError {
    /// The file could not be read.
    #[error("failed to read keyring: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not a valid keyring document.
    #[error("invalid keyring TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A key entry holds an unusable public key.
    #[error("key {entry} is invalid: {source}")]
    Key {
        /// Entry name, or its 1-based position when unnamed.
        entry: String,
        /// Underlying parse error.
        #[source]
        source: ParseError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeyringFile {
    #[serde(default)]
    keys: Vec<KeyEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeyEntry {
    name: Option<String>,
    public_key: String,
    #[serde(default)]
    revoked: bool,
}

/// A parsed keyring file.
#[derive(Debug, Clone)]
pub struct LoadedKeyring {
    /// Every key listed in the file, revoked or not.
    pub keyring: Keyring,
    /// Fingerprints of the keys that are not revoked.
    pub trusted: TrustedFingerprints,
}

/// Parse keyring TOML.
///
/// # Errors
///
/// Returns [`KeyringError::Toml`] for malformed documents and
/// [`KeyringError::Key`] for entries whose public key cannot be parsed.
pub fn parse_keyring(contents: &str) -> std::result::Result<LoadedKeyring, KeyringError> {
    let file: KeyringFile = toml::from_str(contents)?;
    let mut keyring = Keyring::new();
    let mut trusted = TrustedFingerprints::new();

    for (index, entry) in file.keys.iter().enumerate() {
        let fingerprint =
            keyring
                .insert_base64(&entry.public_key)
                .map_err(|source| KeyringError::Key {
                    entry: entry
                        .name
                        .clone()
                        .unwrap_or_else(|| format!("#{}", index + 1)),
                    source,
                })?;
        if !entry.revoked {
            trusted.insert(fingerprint);
        }
    }

    Ok(LoadedKeyring { keyring, trusted })
}

/// Read and parse the keyring file at `path`.
///
/// # Errors
///
/// Returns [`KeyringError::Read`] if the file cannot be read, otherwise see
/// [`parse_keyring`].
pub fn load_keyring(path: &Utf8Path) -> std::result::Result<LoadedKeyring, KeyringError> {
    let contents = std::fs::read_to_string(path)?;
    parse_keyring(&contents)
}

/// Return the keyring path to use, preferring an explicit one.
///
/// # Errors
///
/// Returns [`CliError::KeyringLocation`] when no path was given and the
/// configuration directory is unknown or not valid UTF-8.
pub fn resolve_keyring_path(
    explicit: Option<&Utf8Path>,
    dirs: &dyn ConfigDirs,
) -> Result<Utf8PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_owned());
    }
    let config_dir = dirs
        .sigfetch_config_dir()
        .ok_or(CliError::KeyringLocation)?;
    let config_dir = Utf8PathBuf::from_path_buf(config_dir).map_err(|path| {
        log::debug!("configuration directory is not UTF-8: {}", path.display());
        CliError::KeyringLocation
    })?;
    Ok(config_dir.join(KEYRING_FILE_NAME))
}

/// Trusted fingerprints read from a keyring file on every query.
///
/// Editing the file (for example marking a key `revoked = true`) takes effect
/// on the next download without restarting. A file that cannot be loaded
/// yields an empty set, so every signature is rejected until it is fixed.
#[derive(Debug, Clone)]
pub struct KeyringFileRegistry {
    path: Utf8PathBuf,
}

impl KeyringFileRegistry {
    /// Create a registry backed by the keyring file at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Return the keyring file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl FingerprintRegistry for KeyringFileRegistry {
    fn known_fingerprints(&self) -> TrustedFingerprints {
        match load_keyring(&self.path) {
            Ok(loaded) => loaded.trusted,
            Err(err) => {
                log::warn!(
                    "keyring {} unavailable, trusting no signers: {err}",
                    self.path
                );
                TrustedFingerprints::new()
            }
        }
    }
}
