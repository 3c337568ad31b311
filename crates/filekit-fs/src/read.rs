use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{FileKit, FsError, encoding_for};

#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Encoding label. `None` uses the kit's default encoding.
    pub encoding: Option<String>,
}

impl ReadOptions {
    #[must_use]
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }
}

impl FileKit {
    /// Read a file without decoding it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read_bytes(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, FsError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading");
        std::fs::read(self.resolve(path)).map_err(|source| FsError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and decode a text file.
    ///
    /// A leading byte-order mark is dropped unless the settings preserve it.
    /// Malformed sequences decode to U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the encoding label is
    /// unknown.
    pub fn read(&self, path: impl AsRef<Path>, options: &ReadOptions) -> Result<String, FsError> {
        let encoding = encoding_for(self.encoding_label(options.encoding.as_deref()))?;
        let bytes = self.read_bytes(path)?;
        Ok(self.decode(encoding, &bytes))
    }

    /// Read a file and parse it as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn read_json<T: DeserializeOwned>(
        &self,
        path: impl AsRef<Path>,
        options: &ReadOptions,
    ) -> Result<T, FsError> {
        let path = path.as_ref();
        let text = self.read(path, options)?;
        debug!(path = %path.display(), "parsing JSON");
        serde_json::from_str(&text).map_err(|source| FsError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a file and parse it as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn read_yaml<T: DeserializeOwned>(
        &self,
        path: impl AsRef<Path>,
        options: &ReadOptions,
    ) -> Result<T, FsError> {
        let path = path.as_ref();
        let text = self.read(path, options)?;
        debug!(path = %path.display(), "parsing YAML");
        serde_yaml::from_str(&text).map_err(|source| FsError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn decode(&self, encoding: &'static encoding_rs::Encoding, bytes: &[u8]) -> String {
        let (text, _) = encoding.decode_without_bom_handling(bytes);
        if !self.settings().preserve_bom
            && let Some(rest) = text.strip_prefix('\u{feff}')
        {
            return rest.to_string();
        }
        text.into_owned()
    }
}
