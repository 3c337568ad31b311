#![doc = include_str!("../README.md")]

extern crate alloc;

use std::path::{Path, PathBuf};

use filekit_config::Settings;

mod copy;
mod cwd;
mod delete;
mod error;
mod read;
mod recurse;
mod stat;
mod write;

pub use crate::copy::{CopyOptions, NoProcess, Process};
pub use crate::delete::DeleteOptions;
pub use crate::error::{BoxError, FsError};
pub use crate::read::ReadOptions;
pub use crate::recurse::RecurseEntry;
pub use crate::write::{Contents, WriteOptions};

/// Entry point for every guarded file operation.
///
/// Relative paths resolve against [`FileKit::cwd`], never the process working
/// directory, so several kits can coexist in one process.
#[derive(Debug, Clone)]
pub struct FileKit {
    settings: Settings,
    cwd: PathBuf,
}

impl FileKit {
    /// A kit rooted at the process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new(settings: Settings) -> Result<Self, FsError> {
        let cwd = std::env::current_dir().map_err(FsError::CurrentDir)?;
        Ok(Self::with_cwd(settings, cwd))
    }

    pub fn with_cwd(settings: Settings, cwd: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            cwd: cwd.into(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Move the working directory, resolving `dir` against the current one.
    pub fn set_base(&mut self, dir: impl AsRef<Path>) {
        self.cwd = self.resolve(dir.as_ref());
    }

    pub(crate) fn resolve(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }

    pub(crate) fn encoding_label<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit.unwrap_or(&self.settings.encoding)
    }
}

pub(crate) fn encoding_for(label: &str) -> Result<&'static encoding_rs::Encoding, FsError> {
    encoding_rs::Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| FsError::UnsupportedEncoding(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_base_resolves_relative_to_cwd() {
        let mut kit = FileKit::with_cwd(Settings::default(), "/work");
        kit.set_base("sub");
        assert_eq!(kit.cwd(), Path::new("/work/sub"));
        kit.set_base("/elsewhere");
        assert_eq!(kit.cwd(), Path::new("/elsewhere"));
    }

    #[test]
    fn encoding_labels() {
        assert_eq!(encoding_for("utf8").ok(), Some(encoding_rs::UTF_8));
        assert_eq!(encoding_for(" UTF-8 ").ok(), Some(encoding_rs::UTF_8));
        assert_eq!(encoding_for("latin1").ok(), Some(encoding_rs::WINDOWS_1252));
        assert!(matches!(
            encoding_for("klingon"),
            Err(FsError::UnsupportedEncoding(label)) if label == "klingon"
        ));
    }

    #[test]
    fn explicit_encoding_overrides_settings() {
        let kit = FileKit::with_cwd(Settings::default(), "/work");
        assert_eq!(kit.encoding_label(None), "utf-8");
        assert_eq!(kit.encoding_label(Some("latin1")), "latin1");
    }
}
