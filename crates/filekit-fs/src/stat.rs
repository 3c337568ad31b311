use std::path::Path;

use crate::FileKit;

impl FileKit {
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.resolve(path.as_ref()).exists()
    }

    /// `true` for a symbolic link, whether or not its target exists.
    pub fn is_link(&self, path: impl AsRef<Path>) -> bool {
        std::fs::symlink_metadata(self.resolve(path.as_ref())).is_ok_and(|m| m.is_symlink())
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        self.resolve(path.as_ref()).is_dir()
    }

    pub fn is_file(&self, path: impl AsRef<Path>) -> bool {
        self.resolve(path.as_ref()).is_file()
    }
}
