use std::path::Path;

use tracing::{debug, warn};

use crate::{FileKit, FsError};

#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteOptions {
    /// Override the kit's `force` setting for this call.
    pub force: Option<bool>,
}

impl DeleteOptions {
    #[must_use]
    pub fn force(mut self, force: bool) -> Self {
        self.force = Some(force);
        self
    }
}

impl FileKit {
    /// Delete a file, or a directory with everything below it.
    ///
    /// Returns `Ok(false)` when `path` does not exist. Unless forced, the
    /// working directory itself and anything outside it are refused. Under
    /// no-write nothing is removed but the checks still run.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete is refused or removal fails.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn delete(&self, path: impl AsRef<Path>, options: &DeleteOptions) -> Result<bool, FsError> {
        let path = path.as_ref();
        let no_write = self.settings().no_write;
        let force = options.force.unwrap_or(self.settings().force);

        if !self.is_link(path) && !self.exists(path) {
            warn!("cannot delete nonexistent file");
            return Ok(false);
        }

        if !force {
            if self.is_path_cwd(path) {
                warn!("refusing to delete the current working directory");
                return Err(FsError::DeleteCwd {
                    path: path.to_path_buf(),
                });
            }
            if !self.is_path_in_cwd(path) {
                warn!("refusing to delete outside the current working directory");
                return Err(FsError::DeleteOutsideCwd {
                    path: path.to_path_buf(),
                });
            }
        }

        if no_write {
            debug!("not actually deleting");
            return Ok(true);
        }
        debug!("deleting");
        let target = self.resolve(path);
        let is_real_dir = std::fs::symlink_metadata(&target).is_ok_and(|m| m.is_dir());
        let removed = if is_real_dir {
            std::fs::remove_dir_all(&target)
        } else {
            std::fs::remove_file(&target)
        };
        removed.map_err(|source| FsError::Delete {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(true)
    }
}
