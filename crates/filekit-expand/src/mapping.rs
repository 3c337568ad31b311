use indexmap::IndexMap;
use serde::Serialize;

use crate::engine::expand_with;
use crate::options::{ExtDot, MappingOptions};
use crate::paths;
use crate::pattern::Patterns;
use crate::provider::{FsGlob, GlobProvider};

/// One destination and every source that maps onto it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMapping {
    pub dest: String,
    pub src: Vec<String>,
}

/// Replace the extension of the file name in `path` with `ext`.
///
/// Directory components are never touched. A name without a dot gets `ext`
/// appended.
pub fn rewrite_ext(path: &str, ext: &str, ext_dot: ExtDot) -> String {
    let name_start = path.rfind(['/', '\\']).map_or(0, |idx| idx + 1);
    let name = &path[name_start..];
    let dot = match ext_dot {
        ExtDot::First => name.find('.'),
        ExtDot::Last => name.rfind('.'),
    };
    let keep = dot.map_or(path.len(), |idx| name_start + idx);
    format!("{}{ext}", &path[..keep])
}

/// Expand `patterns` and map each source to a destination under `dest_base`.
pub fn expand_mapping(
    patterns: impl Into<Patterns>,
    dest_base: &str,
    options: &MappingOptions,
) -> Vec<FileMapping> {
    expand_mapping_with(&FsGlob, patterns, dest_base, options)
}

/// [`expand_mapping`] with an explicit glob provider.
///
/// Entries come out in the order their destination was first produced;
/// sources sharing a destination accumulate in discovery order.
#[tracing::instrument(skip_all, fields(dest_base = %dest_base))]
pub fn expand_mapping_with<G: GlobProvider + ?Sized>(
    provider: &G,
    patterns: impl Into<Patterns>,
    dest_base: &str,
    options: &MappingOptions,
) -> Vec<FileMapping> {
    let cwd = options
        .base_dir()
        .map(|dir| dir.to_string_lossy().into_owned());

    let mut by_dest: IndexMap<String, Vec<String>> = IndexMap::new();
    for src in expand_with(provider, &options.expand, patterns) {
        let mut dest_path = if options.flatten {
            paths::basename(&src).to_string()
        } else {
            src.clone()
        };
        if let Some(ext) = &options.ext {
            dest_path = rewrite_ext(&dest_path, ext, options.ext_dot);
        }
        let dest = paths::unixify(&options.apply_rename(dest_base, &dest_path));
        let src = match &cwd {
            Some(cwd) => paths::join(&[cwd.as_str(), src.as_str()]),
            None => paths::unixify(&src),
        };
        by_dest.entry(dest).or_default().push(src);
    }

    by_dest
        .into_iter()
        .map(|(dest, src)| FileMapping { dest, src })
        .collect()
}
