use std::path::Path;

use filekit_expand::paths;

use crate::{FileKit, FsError};

/// One file visited by [`FileKit::recurse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurseEntry {
    /// `rootdir`, `subdir` and `filename` joined.
    pub abspath: String,
    pub rootdir: String,
    /// Directory between `rootdir` and the file, `None` at the top level.
    pub subdir: Option<String>,
    pub filename: String,
}

impl FileKit {
    /// Call `callback` for every file below `rootdir`, in name order.
    ///
    /// Directory symlinks are followed; directories themselves are not
    /// reported.
    ///
    /// # Errors
    ///
    /// Returns an error if `rootdir` or one of its subdirectories cannot be
    /// listed.
    pub fn recurse<F>(&self, rootdir: &str, mut callback: F) -> Result<(), FsError>
    where
        F: FnMut(&RecurseEntry),
    {
        let root = self.resolve(Path::new(rootdir));
        let walker = ignore::WalkBuilder::new(&root)
            .standard_filters(false)
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(|source| FsError::Walk {
                path: root.clone(),
                source,
            })?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&root) else {
                continue;
            };
            let relative = paths::unixify(&relative.to_string_lossy());
            let (subdir, filename) = match relative.rsplit_once('/') {
                Some((dir, name)) => (Some(dir.to_string()), name.to_string()),
                None => (None, relative.clone()),
            };
            callback(&RecurseEntry {
                abspath: paths::join(&[rootdir, relative.as_str()]),
                rootdir: rootdir.to_string(),
                subdir,
                filename,
            });
        }
        Ok(())
    }
}
