//! Retrieved artefact content wrapped as a named file.

use camino::{Utf8Path, Utf8PathBuf};
use std::io::{self, Write};

/// In-memory artefact bytes together with the file name they belong under.
///
/// # Examples
///
/// ```
/// use sigfetch::file::ArtefactFile;
///
/// let file = ArtefactFile::new("foo.phar", b"phar-content".to_vec());
/// assert_eq!(file.filename(), "foo.phar");
/// assert_eq!(file.content(), b"phar-content");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactFile {
    filename: String,
    content: Vec<u8>,
}

impl ArtefactFile {
    /// Wrap `content` under `filename`.
    #[must_use]
    pub fn new(filename: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content,
        }
    }

    /// Return the file name.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Return the file content.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Consume the file and return its content.
    #[must_use]
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }

    /// Write the file into `dir`, replacing any existing file of that name.
    ///
    /// The content is written to a temporary file in `dir` first and then
    /// renamed into place, so readers never observe a partial artefact.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` does not exist or is not writable, or if the
    /// file name is not a plain file name.
    pub fn save_to(&self, dir: &Utf8Path) -> io::Result<Utf8PathBuf> {
        if !is_plain_file_name(&self.filename) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing to write artefact named \"{}\"", self.filename),
            ));
        }
        let destination = dir.join(&self.filename);
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(&self.content)?;
        temp.as_file().sync_all()?;
        temp.persist(destination.as_std_path()).map_err(|err| err.error)?;
        Ok(destination)
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
