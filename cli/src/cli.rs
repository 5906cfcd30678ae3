//! CLI argument definitions for sigfetch.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use semver::Version;
use sigfetch::ArtefactLocator;
use sigfetch::digest::Digest;
use url::Url;

/// Download release artefacts and keep them only if their signature verifies.
#[derive(Parser, Debug)]
#[command(name = "sigfetch")]
#[command(version, about)]
#[command(long_about = concat!(
    "Download release artefacts and keep them only if their signature verifies.\n\n",
    "sigfetch fetches an artefact and its detached Ed25519 signature, checks the ",
    "signature against the non-revoked keys in your keyring and, when a digest is ",
    "pinned with --digest, confirms the artefact bytes match it. Nothing is written ",
    "unless every check passes.",
))]
#[command(after_help = concat!(
    "KEYRING FORMAT (TOML):\n",
    "  [[keys]]\n",
    "  name = \"release-signing\"\n",
    "  public_key = \"<base64 Ed25519 public key>\"\n",
    "  revoked = false\n\n",
    "EXAMPLES:\n",
    "  Fetch and verify a release into the current directory:\n",
    "    $ sigfetch fetch --name tool --release 1.2.0 \\\n",
    "        --url https://example.com/tool.phar\n\n",
    "  Pin the expected digest as well:\n",
    "    $ sigfetch fetch --name tool --release 1.2.0 \\\n",
    "        --url https://example.com/tool.phar --digest sha256:<hex>\n\n",
    "  Print the fingerprint of a public key:\n",
    "    $ sigfetch fingerprint <base64 key>",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Download and verify an artefact.
    Fetch(FetchArgs),

    /// Print the fingerprint of an Ed25519 public key.
    Fingerprint(FingerprintArgs),
}

/// Arguments for the fetch command.
#[derive(Parser, Debug, Clone)]
pub struct FetchArgs {
    /// Logical name of the release.
    #[arg(long)]
    pub name: String,

    /// Version of the release.
    #[arg(long, value_name = "VERSION")]
    pub release: Version,

    /// URL of the artefact.
    #[arg(long, value_name = "URL")]
    pub url: Url,

    /// URL of the detached signature [default: artefact URL + ".sig"].
    #[arg(long, value_name = "URL")]
    pub signature_url: Option<Url>,

    /// Expected digest of the artefact, as `algo:hex` or bare hex.
    #[arg(long, value_name = "DIGEST")]
    pub digest: Option<Digest>,

    /// Keyring file listing signing keys [default: platform config directory].
    #[arg(long, env = "SIGFETCH_KEYRING", value_name = "FILE")]
    pub keyring: Option<Utf8PathBuf>,

    /// Directory the verified artefact is written to.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: Utf8PathBuf,

    /// Network timeout per request, in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

impl FetchArgs {
    /// Return the signature URL, defaulting to the artefact URL plus `.sig`.
    #[must_use]
    pub fn signature_url(&self) -> Url {
        self.signature_url.clone().unwrap_or_else(|| {
            let mut derived = self.url.clone();
            derived.set_path(&format!("{}.sig", self.url.path()));
            derived
        })
    }

    /// Build the locator described by these arguments.
    #[must_use]
    pub fn locator(&self) -> ArtefactLocator {
        let locator = ArtefactLocator::new(
            self.name.clone(),
            self.release.clone(),
            self.url.clone(),
            self.signature_url(),
        );
        match &self.digest {
            Some(digest) => locator.with_expected_digest(digest.clone()),
            None => locator,
        }
    }
}

/// Arguments for the fingerprint command.
#[derive(Parser, Debug, Clone)]
pub struct FingerprintArgs {
    /// Base64 Ed25519 public key, optionally prefixed with `ed25519:`.
    #[arg(value_name = "PUBLIC_KEY")]
    pub public_key: String,
}
