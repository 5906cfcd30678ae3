//! Output formatting for the sigfetch CLI.

use camino::Utf8Path;
use serde::Serialize;
use sigfetch::VerifiedArtefact;
use std::io::Write;

/// Summary of a verified and saved artefact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Release name.
    pub name: String,
    /// Release version.
    pub version: String,
    /// File name the artefact was saved under.
    pub file: String,
    /// Full path of the saved artefact.
    pub path: String,
    /// Fingerprint of the key that signed it.
    pub signer: String,
}

impl Summary {
    /// Summarize `artefact` as saved at `path`.
    #[must_use]
    pub fn new(artefact: &VerifiedArtefact, path: &Utf8Path) -> Self {
        Self {
            name: artefact.name().to_owned(),
            version: artefact.version().to_string(),
            file: artefact.content().filename().to_owned(),
            path: path.to_string(),
            signer: artefact.signer_fingerprint().to_string(),
        }
    }

    /// Format the summary for people.
    #[must_use]
    pub fn human_text(&self) -> String {
        format!(
            concat!(
                "Verified {} {}\n",
                "  saved to: {}\n",
                "  signed by: {}"
            ),
            self.name, self.version, self.path, self.signer
        )
    }

    /// Format the summary as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json_text(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Write `message` followed by a newline, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort progress output; ignore write failures.
    }
}
