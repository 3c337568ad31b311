use alloc::sync::Arc;
use core::fmt;
use core::str::FromStr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ParseOptionError;
use crate::paths;
use crate::provider::GlobOptions;

/// Post-resolution filter applied by [`crate::expand`].
///
/// Named variants stat the path on disk; any stat error counts as a miss.
#[derive(Clone)]
pub enum Filter {
    IsFile,
    IsDirectory,
    IsSymlink,
    Custom(Arc<dyn Fn(&Path) -> bool + Send + Sync>),
}

impl Filter {
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Evaluate the filter against `path`.
    pub fn test(&self, path: &Path) -> bool {
        match self {
            Self::IsFile => std::fs::metadata(path).is_ok_and(|m| m.is_file()),
            Self::IsDirectory => std::fs::metadata(path).is_ok_and(|m| m.is_dir()),
            Self::IsSymlink => std::fs::symlink_metadata(path).is_ok_and(|m| m.is_symlink()),
            Self::Custom(predicate) => predicate(path),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsFile => write!(f, "IsFile"),
            Self::IsDirectory => write!(f, "IsDirectory"),
            Self::IsSymlink => write!(f, "IsSymlink"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl FromStr for Filter {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "isFile" | "file" => Ok(Self::IsFile),
            "isDirectory" | "dir" | "directory" => Ok(Self::IsDirectory),
            "isSymbolicLink" | "symlink" => Ok(Self::IsSymlink),
            _ => Err(ParseOptionError::Filter(s.to_string())),
        }
    }
}

/// Options for [`crate::expand`].
#[derive(Debug, Clone, Default)]
pub struct ExpandOptions {
    pub glob: GlobOptions,
    pub filter: Option<Filter>,
}

impl ExpandOptions {
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.glob.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn mark(mut self) -> Self {
        self.glob.mark = true;
        self
    }

    #[must_use]
    pub fn match_base(mut self) -> Self {
        self.glob.match_base = true;
        self
    }

    #[must_use]
    pub fn nonull(mut self) -> Self {
        self.glob.nonull = true;
        self
    }

    #[must_use]
    pub fn dot(mut self) -> Self {
        self.glob.dot = true;
        self
    }

    /// `path` as seen from the process working directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        match &self.glob.cwd {
            Some(cwd) => cwd.join(path),
            None => PathBuf::from(path),
        }
    }
}

/// Where an extension starts inside a file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtDot {
    /// Everything from the first `.` of the file name.
    #[default]
    First,
    /// Only the part after the last `.`.
    Last,
}

impl FromStr for ExtDot {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            _ => Err(ParseOptionError::ExtDot(s.to_string())),
        }
    }
}

impl fmt::Display for ExtDot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Last => write!(f, "last"),
        }
    }
}

/// Computes the final destination of a mapping entry.
///
/// `dest_path` has already been flattened and had its extension rewritten.
pub trait Rename: Send + Sync {
    fn rename(&self, dest_base: &str, dest_path: &str, options: &MappingOptions) -> String;
}

impl<F> Rename for F
where
    F: Fn(&str, &str, &MappingOptions) -> String + Send + Sync,
{
    fn rename(&self, dest_base: &str, dest_path: &str, options: &MappingOptions) -> String {
        self(dest_base, dest_path, options)
    }
}

/// Default rename: `dest_base` and `dest_path` joined as path segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct JoinRename;

impl Rename for JoinRename {
    fn rename(&self, dest_base: &str, dest_path: &str, _options: &MappingOptions) -> String {
        paths::join(&[dest_base, dest_path])
    }
}

/// Options for [`crate::expand_mapping`].
#[derive(Clone, Default)]
pub struct MappingOptions {
    pub expand: ExpandOptions,
    /// Replacement extension. `Some("")` strips the extension.
    pub ext: Option<String>,
    pub ext_dot: ExtDot,
    /// Map every source by its file name alone.
    pub flatten: bool,
    rename: Option<Arc<dyn Rename>>,
}

impl MappingOptions {
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.expand = self.expand.cwd(cwd);
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.expand = self.expand.filter(filter);
        self
    }

    #[must_use]
    pub fn ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    #[must_use]
    pub fn ext_dot(mut self, ext_dot: ExtDot) -> Self {
        self.ext_dot = ext_dot;
        self
    }

    #[must_use]
    pub fn flatten(mut self) -> Self {
        self.flatten = true;
        self
    }

    #[must_use]
    pub fn rename<R: Rename + 'static>(mut self, rename: R) -> Self {
        self.rename = Some(Arc::new(rename));
        self
    }

    /// The `cwd` sources are resolved against, if any.
    pub fn base_dir(&self) -> Option<&Path> {
        self.expand.glob.cwd.as_deref()
    }

    pub(crate) fn apply_rename(&self, dest_base: &str, dest_path: &str) -> String {
        match &self.rename {
            Some(rename) => rename.rename(dest_base, dest_path, self),
            None => JoinRename.rename(dest_base, dest_path, self),
        }
    }
}

impl fmt::Debug for MappingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingOptions")
            .field("expand", &self.expand)
            .field("ext", &self.ext)
            .field("ext_dot", &self.ext_dot)
            .field("flatten", &self.flatten)
            .field("rename", &self.rename.as_ref().map(|_| ".."))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ext_dot_parses_known_policies() {
        assert_eq!("first".parse::<ExtDot>(), Ok(ExtDot::First));
        assert_eq!("last".parse::<ExtDot>(), Ok(ExtDot::Last));
        assert_eq!(
            "middle".parse::<ExtDot>(),
            Err(ParseOptionError::ExtDot("middle".to_string()))
        );
    }

    #[test]
    fn ext_dot_deserializes_lowercase() -> anyhow::Result<()> {
        let dot: ExtDot = serde_json::from_str("\"last\"")?;
        assert_eq!(dot, ExtDot::Last);
        assert!(serde_json::from_str::<ExtDot>("\"Last\"").is_err());
        Ok(())
    }

    #[test]
    fn filter_parses_stat_names() {
        assert!(matches!("isFile".parse::<Filter>(), Ok(Filter::IsFile)));
        assert!(matches!("isDirectory".parse::<Filter>(), Ok(Filter::IsDirectory)));
        assert!(matches!("isSymbolicLink".parse::<Filter>(), Ok(Filter::IsSymlink)));
        assert!("isFIFO".parse::<Filter>().is_err());
    }

    #[test]
    fn stat_filters_treat_missing_paths_as_misses() {
        let missing = Path::new("definitely/not/here.txt");
        assert!(!Filter::IsFile.test(missing));
        assert!(!Filter::IsDirectory.test(missing));
        assert!(!Filter::IsSymlink.test(missing));
    }

    #[test]
    fn stat_filters_distinguish_files_and_dirs() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let file = tmp.path().join("a.txt");
        std::fs::write(&file, "a")?;
        assert!(Filter::IsFile.test(&file));
        assert!(!Filter::IsDirectory.test(&file));
        assert!(Filter::IsDirectory.test(tmp.path()));
        Ok(())
    }

    #[test]
    fn custom_filter_is_called() {
        let filter = Filter::custom(|p| p.to_string_lossy().contains("deepest"));
        assert!(filter.test(Path::new("deep/deeper/deepest")));
        assert!(!filter.test(Path::new("deep")));
    }

    #[test]
    fn resolve_joins_cwd() {
        let options = ExpandOptions::default().cwd("expand");
        assert_eq!(options.resolve("js/foo.js"), Path::new("expand/js/foo.js"));
        assert_eq!(ExpandOptions::default().resolve("js"), Path::new("js"));
    }

    #[test]
    fn default_rename_joins() {
        let options = MappingOptions::default();
        assert_eq!(options.apply_rename("dest/", "a/b.txt"), "dest/a/b.txt");
        assert_eq!(options.apply_rename("", "a/b.txt"), "a/b.txt");
    }

    #[test]
    fn custom_rename_sees_options() {
        let options = MappingOptions::default()
            .cwd("expand")
            .rename(|base: &str, path: &str, o: &MappingOptions| {
                let cwd = o.base_dir().map(|c| c.to_string_lossy().into_owned()).unwrap_or_default();
                paths::join(&[base, cwd.as_str(), "o-m-g", path])
            });
        assert_eq!(options.apply_rename("dest", "deep.txt"), "dest/expand/o-m-g/deep.txt");
    }
}
