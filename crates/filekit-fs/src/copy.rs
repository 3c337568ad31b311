use alloc::sync::Arc;
use core::fmt;
use std::path::Path;

use filekit_expand::{GlobOptions, Patterns, is_match, paths};
use tracing::debug;

use crate::{BoxError, Contents, FileKit, FsError, ReadOptions, WriteOptions};

/// Transforms a file's text on its way through [`FileKit::copy`].
///
/// Returning `Ok(None)` aborts the write for that file.
pub trait Process: Send + Sync {
    fn process(&self, contents: String, src: &Path, dest: &Path) -> Result<Option<String>, BoxError>;
}

impl<F> Process for F
where
    F: Fn(String, &Path, &Path) -> Result<Option<String>, BoxError> + Send + Sync,
{
    fn process(&self, contents: String, src: &Path, dest: &Path) -> Result<Option<String>, BoxError> {
        self(contents, src, dest)
    }
}

/// Which files bypass the process hook and are copied byte for byte.
#[derive(Debug, Clone, Default)]
pub enum NoProcess {
    #[default]
    Never,
    Always,
    /// Sources matching these patterns.
    Matching(Patterns),
}

impl NoProcess {
    fn skips(&self, src: &Path) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::Matching(patterns) => {
                let src = paths::unixify(&src.to_string_lossy());
                is_match(&GlobOptions::default(), patterns.clone(), &[src])
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct CopyOptions {
    /// Encoding used to decode and re-encode processed files.
    pub encoding: Option<String>,
    pub no_process: NoProcess,
    process: Option<Arc<dyn Process>>,
}

impl CopyOptions {
    #[must_use]
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    #[must_use]
    pub fn process<P: Process + 'static>(mut self, process: P) -> Self {
        self.process = Some(Arc::new(process));
        self
    }

    #[must_use]
    pub fn no_process(mut self, no_process: NoProcess) -> Self {
        self.no_process = no_process;
        self
    }

    fn hook_for(&self, src: &Path) -> Option<&dyn Process> {
        let process = self.process.as_deref()?;
        (!self.no_process.skips(src)).then_some(process)
    }
}

impl fmt::Debug for CopyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyOptions")
            .field("encoding", &self.encoding)
            .field("no_process", &self.no_process)
            .field("process", &self.process.as_ref().map(|_| ".."))
            .finish()
    }
}

impl FileKit {
    /// Copy a file, or a directory recursively.
    ///
    /// Files for which a process hook applies are decoded, passed through the
    /// hook and re-encoded; every other file is copied as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read, a destination cannot be
    /// written, or the process hook fails.
    pub fn copy(
        &self,
        src: impl AsRef<Path>,
        dest: impl AsRef<Path>,
        options: &CopyOptions,
    ) -> Result<(), FsError> {
        let (src, dest) = (src.as_ref(), dest.as_ref());
        if !self.is_dir(src) {
            return self.copy_file(src, dest, options);
        }

        self.mkdir(dest)?;
        let listing = std::fs::read_dir(self.resolve(src)).map_err(|source| FsError::ReadDir {
            path: src.to_path_buf(),
            source,
        })?;
        let mut names = Vec::new();
        for entry in listing {
            let entry = entry.map_err(|source| FsError::ReadDir {
                path: src.to_path_buf(),
                source,
            })?;
            names.push(entry.file_name());
        }
        names.sort();
        for name in names {
            self.copy(src.join(&name), dest.join(&name), options)?;
        }
        Ok(())
    }

    fn copy_file(&self, src: &Path, dest: &Path, options: &CopyOptions) -> Result<(), FsError> {
        let Some(hook) = options.hook_for(src) else {
            let bytes = self.read_bytes(src)?;
            return self.write(dest, &bytes, &WriteOptions::default());
        };

        let read_options = ReadOptions {
            encoding: options.encoding.clone(),
        };
        let contents = self.read(src, &read_options)?;
        debug!(src = %src.display(), "processing source");
        let processed = hook
            .process(contents, src, dest)
            .map_err(|source| FsError::Process {
                path: src.to_path_buf(),
                source,
            })?;
        let Some(processed) = processed else {
            debug!(src = %src.display(), "write aborted");
            return Ok(());
        };

        let write_options = WriteOptions {
            encoding: options.encoding.clone(),
        };
        self.write(dest, Contents::Text(&processed), &write_options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filekit_config::Settings;
    use std::fs;

    fn setup() -> anyhow::Result<(tempfile::TempDir, FileKit)> {
        let tmp = tempfile::tempdir()?;
        fs::create_dir_all(tmp.path().join("src/sub"))?;
        fs::write(tmp.path().join("src/a.txt"), "alpha")?;
        fs::write(tmp.path().join("src/sub/b.js"), "beta")?;
        fs::write(tmp.path().join("src/raw.bin"), [0xFF_u8, 0xFE, 0x00])?;
        let kit = FileKit::with_cwd(Settings::default(), tmp.path());
        Ok((tmp, kit))
    }

    fn upper(contents: String, _: &Path, _: &Path) -> Result<Option<String>, BoxError> {
        Ok(Some(contents.to_uppercase()))
    }

    #[test]
    fn copies_single_file() -> anyhow::Result<()> {
        let (tmp, kit) = setup()?;
        kit.copy("src/a.txt", "out/a.txt", &CopyOptions::default())?;
        assert_eq!(fs::read_to_string(tmp.path().join("out/a.txt"))?, "alpha");
        Ok(())
    }

    #[test]
    fn copies_directory_recursively() -> anyhow::Result<()> {
        let (tmp, kit) = setup()?;
        kit.copy("src", "out", &CopyOptions::default())?;
        assert_eq!(fs::read_to_string(tmp.path().join("out/a.txt"))?, "alpha");
        assert_eq!(fs::read_to_string(tmp.path().join("out/sub/b.js"))?, "beta");
        assert_eq!(fs::read(tmp.path().join("out/raw.bin"))?, [0xFF, 0xFE, 0x00]);
        Ok(())
    }

    #[test]
    fn process_hook_transforms_text() -> anyhow::Result<()> {
        let (tmp, kit) = setup()?;
        kit.copy("src/a.txt", "out/a.txt", &CopyOptions::default().process(upper))?;
        assert_eq!(fs::read_to_string(tmp.path().join("out/a.txt"))?, "ALPHA");
        Ok(())
    }

    #[test]
    fn process_hook_sees_paths() -> anyhow::Result<()> {
        let (tmp, kit) = setup()?;
        let options = CopyOptions::default().process(
            |contents: String, src: &Path, dest: &Path| -> Result<Option<String>, BoxError> {
                Ok(Some(format!("{contents} {} {}", src.display(), dest.display())))
            },
        );
        kit.copy("src/a.txt", "out/a.txt", &options)?;
        assert_eq!(
            fs::read_to_string(tmp.path().join("out/a.txt"))?,
            "alpha src/a.txt out/a.txt"
        );
        Ok(())
    }

    #[test]
    fn process_returning_none_aborts_write() -> anyhow::Result<()> {
        let (tmp, kit) = setup()?;
        let options = CopyOptions::default()
            .process(|_: String, _: &Path, _: &Path| -> Result<Option<String>, BoxError> { Ok(None) });
        kit.copy("src/a.txt", "out/a.txt", &options)?;
        assert!(!tmp.path().join("out/a.txt").exists());
        Ok(())
    }

    #[test]
    fn process_error_is_reported() -> anyhow::Result<()> {
        let (_tmp, kit) = setup()?;
        let options = CopyOptions::default().process(
            |_: String, _: &Path, _: &Path| -> Result<Option<String>, BoxError> {
                Err("boom".into())
            },
        );
        let err = kit.copy("src/a.txt", "out/a.txt", &options).err();
        assert!(matches!(err, Some(FsError::Process { .. })));
        Ok(())
    }

    #[test]
    fn no_process_always_copies_raw() -> anyhow::Result<()> {
        let (tmp, kit) = setup()?;
        let options = CopyOptions::default()
            .process(upper)
            .no_process(NoProcess::Always);
        kit.copy("src/a.txt", "out/a.txt", &options)?;
        assert_eq!(fs::read_to_string(tmp.path().join("out/a.txt"))?, "alpha");
        Ok(())
    }

    #[test]
    fn no_process_matching_patterns() -> anyhow::Result<()> {
        let (tmp, kit) = setup()?;
        let options = CopyOptions::default()
            .process(upper)
            .no_process(NoProcess::Matching(Patterns::from("**/*.js")));
        kit.copy("src", "out", &options)?;
        assert_eq!(fs::read_to_string(tmp.path().join("out/a.txt"))?, "ALPHA");
        assert_eq!(fs::read_to_string(tmp.path().join("out/sub/b.js"))?, "beta");
        Ok(())
    }

    #[test]
    fn no_write_copies_nothing() -> anyhow::Result<()> {
        let (tmp, _) = setup()?;
        let kit = FileKit::with_cwd(
            Settings {
                no_write: true,
                ..Settings::default()
            },
            tmp.path(),
        );
        kit.copy("src", "out", &CopyOptions::default())?;
        assert!(!tmp.path().join("out").exists());
        Ok(())
    }
}
