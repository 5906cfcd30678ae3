//! The `fetch` and `fingerprint` commands.
//!
//! `fetch` wires the production collaborators together: an HTTP transport,
//! an Ed25519 verifier loaded from the keyring, SHA digests, and a registry
//! that re-reads the keyring on every query. The artefact is written to disk
//! only after [`Downloader::download`] has accepted it.

use crate::cli::{FetchArgs, FingerprintArgs};
use crate::dirs::{ConfigDirs, SystemConfigDirs};
use crate::error::{CliError, Result};
use crate::keyring::{KeyringFileRegistry, load_keyring, resolve_keyring_path};
use crate::output::{Summary, write_stderr_line};
use sigfetch::Downloader;
use sigfetch::checksum::ShaChecksumService;
use sigfetch::ed25519::{Ed25519Verifier, fingerprint_of, parse_public_key};
use sigfetch::transport::{DEFAULT_MAX_BODY_BYTES, HttpTransport, Transport};
use std::io::Write;
use std::time::Duration;

/// Run `fetch` against the network and the platform keyring location.
///
/// # Errors
///
/// See [`run_fetch_with`].
pub fn run_fetch(
    args: &FetchArgs,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<Summary> {
    let transport = HttpTransport::new(Duration::from_secs(args.timeout), DEFAULT_MAX_BODY_BYTES);
    run_fetch_with(args, &transport, &SystemConfigDirs, stdout, stderr)
}

/// Run `fetch` with injected transport and directory lookup.
///
/// Progress goes to `stderr` unless `--quiet` is set; the summary goes to
/// `stdout` as text or JSON.
///
/// # Errors
///
/// Returns an error if the keyring cannot be located or loaded, the download
/// is rejected, or the artefact cannot be saved.
pub fn run_fetch_with(
    args: &FetchArgs,
    transport: &dyn Transport,
    dirs: &dyn ConfigDirs,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<Summary> {
    let keyring_path = resolve_keyring_path(args.keyring.as_deref(), dirs)?;
    let loaded = load_keyring(&keyring_path).map_err(|source| CliError::Keyring {
        path: keyring_path.clone(),
        source,
    })?;
    log::debug!(
        "loaded {} key(s) from {keyring_path}, {} trusted",
        loaded.keyring.len(),
        loaded.trusted.len()
    );

    let verifier = Ed25519Verifier::new(loaded.keyring);
    let registry = KeyringFileRegistry::new(keyring_path);
    let locator = args.locator();

    if !args.quiet {
        write_stderr_line(
            stderr,
            format!(
                "Fetching {} {} from {}...",
                locator.name(),
                locator.version(),
                locator.artefact_url()
            ),
        );
    }

    let downloader = Downloader::new(transport, &verifier, &ShaChecksumService, &registry);
    let artefact = downloader.download(&locator)?;

    let saved = std::fs::create_dir_all(&args.output)
        .and_then(|()| artefact.content().save_to(&args.output))
        .map_err(|source| CliError::SaveFailed {
            path: args.output.clone(),
            source,
        })?;

    let summary = Summary::new(&artefact, &saved);
    let text = if args.json {
        summary.json_text()?
    } else {
        summary.human_text()
    };
    writeln!(stdout, "{text}").map_err(|source| CliError::WriteFailed { source })?;
    Ok(summary)
}

/// Print the fingerprint of the public key in `args`.
///
/// # Errors
///
/// Returns an error if the key cannot be parsed or the output cannot be
/// written.
pub fn run_fingerprint(args: &FingerprintArgs, stdout: &mut dyn Write) -> Result<()> {
    let key = parse_public_key(&args.public_key)?;
    writeln!(stdout, "{}", fingerprint_of(&key)).map_err(|source| CliError::WriteFailed { source })
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
