//! Path predicates used by the delete guard.
//!
//! The lexical checks never touch the disk. [`FileKit::is_path_cwd`] and
//! [`FileKit::is_path_in_cwd`] resolve symlinks first and report `false` for
//! paths that do not exist.

use std::path::{Component, Path, PathBuf};

use crate::FileKit;

/// Collapse `.` and `..` components without consulting the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn contains(ancestor: &Path, descendant: &Path) -> bool {
    descendant != ancestor && descendant.starts_with(ancestor)
}

impl FileKit {
    /// `path` made absolute against the kit's cwd, `.` and `..` collapsed.
    fn absolute(&self, path: &Path) -> PathBuf {
        lexical_normalize(&self.resolve(path))
    }

    /// `true` if `path` is already absolute and normalized. Trailing
    /// separators are ignored.
    pub fn is_path_absolute(&self, path: &str) -> bool {
        let trimmed = path.trim_end_matches(['/', '\\']);
        let trimmed = if trimmed.is_empty() { path } else { trimmed };
        let trimmed = Path::new(trimmed);
        trimmed.is_absolute() && lexical_normalize(trimmed).as_os_str() == trimmed.as_os_str()
    }

    /// `true` if every path resolves to the same location as `first`.
    pub fn are_paths_equivalent<P: AsRef<Path>>(&self, first: impl AsRef<Path>, rest: &[P]) -> bool {
        let first = self.absolute(first.as_ref());
        rest.iter().all(|p| self.absolute(p.as_ref()) == first)
    }

    /// `true` if every descendant lies strictly inside `ancestor`.
    pub fn does_path_contain<P: AsRef<Path>>(
        &self,
        ancestor: impl AsRef<Path>,
        descendants: &[P],
    ) -> bool {
        let ancestor = self.absolute(ancestor.as_ref());
        descendants
            .iter()
            .all(|d| contains(&ancestor, &self.absolute(d.as_ref())))
    }

    /// `true` if `path` is the working directory itself.
    pub fn is_path_cwd(&self, path: impl AsRef<Path>) -> bool {
        match (self.real_cwd(), self.resolve(path.as_ref()).canonicalize()) {
            (Some(cwd), Ok(real)) => cwd == real,
            _ => false,
        }
    }

    /// `true` if `path` lies strictly inside the working directory.
    pub fn is_path_in_cwd(&self, path: impl AsRef<Path>) -> bool {
        match (self.real_cwd(), self.resolve(path.as_ref()).canonicalize()) {
            (Some(cwd), Ok(real)) => contains(&cwd, &real),
            _ => false,
        }
    }

    fn real_cwd(&self) -> Option<PathBuf> {
        self.cwd().canonicalize().ok()
    }
}
