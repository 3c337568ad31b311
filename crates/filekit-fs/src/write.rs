use std::path::Path;

use tracing::debug;

use crate::{FileKit, FsError, encoding_for};

/// What to write: text is encoded first, bytes go to disk as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contents<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for Contents<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Contents<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Contents<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Contents<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Encoding label for text contents. `None` uses the kit's default.
    pub encoding: Option<String>,
}

impl WriteOptions {
    #[must_use]
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }
}

impl FileKit {
    /// Create `dir` and any missing parents. Does nothing under no-write.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub fn mkdir(&self, dir: impl AsRef<Path>) -> Result<(), FsError> {
        let dir = dir.as_ref();
        if self.settings().no_write || dir.as_os_str().is_empty() {
            return Ok(());
        }
        std::fs::create_dir_all(self.resolve(dir)).map_err(|source| FsError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
    }

    /// Write `contents` to `path`, creating parent directories as needed.
    ///
    /// Under no-write the call is logged and reported as a success without
    /// touching the disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoding label is unknown or the file cannot be
    /// written.
    pub fn write<'a>(
        &self,
        path: impl AsRef<Path>,
        contents: impl Into<Contents<'a>>,
        options: &WriteOptions,
    ) -> Result<(), FsError> {
        let path = path.as_ref();
        let no_write = self.settings().no_write;
        if no_write {
            debug!(path = %path.display(), "not actually writing");
        } else {
            debug!(path = %path.display(), "writing");
        }
        if let Some(parent) = path.parent() {
            self.mkdir(parent)?;
        }

        let encoded;
        let bytes = match contents.into() {
            Contents::Text(text) => {
                let encoding = encoding_for(self.encoding_label(options.encoding.as_deref()))?;
                encoded = encoding.encode(text).0;
                &*encoded
            }
            Contents::Bytes(bytes) => bytes,
        };

        if no_write {
            return Ok(());
        }
        std::fs::write(self.resolve(path), bytes).map_err(|source| FsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
