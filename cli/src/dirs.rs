//! Platform directory lookup.
//!
//! Wraps `directories-next` behind a trait so callers can substitute fixed
//! locations in tests.

use std::path::PathBuf;

/// Resolves the platform-specific directories sigfetch uses.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigDirs {
    /// Return the sigfetch configuration directory, if one can be determined.
    fn sigfetch_config_dir(&self) -> Option<PathBuf>;
}

/// [`ConfigDirs`] backed by the operating system's conventions.
///
/// On Linux this is `$XDG_CONFIG_HOME/sigfetch`, falling back to
/// `~/.config/sigfetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemConfigDirs;

impl ConfigDirs for SystemConfigDirs {
    fn sigfetch_config_dir(&self) -> Option<PathBuf> {
        directories_next::ProjectDirs::from("", "", "sigfetch")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}
