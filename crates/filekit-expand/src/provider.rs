//! Glob resolution for a single pattern.
//!
//! The set algebra across many patterns lives in [`crate::process_patterns`];
//! a [`GlobProvider`] only answers "which paths does this one pattern match",
//! either on disk or within a caller-supplied list.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::paths;

const GLOB_MAGIC: &[char] = &['*', '?', '[', '{'];

/// Options understood by the glob provider.
///
/// These are passed through untouched from [`crate::ExpandOptions`] and
/// [`crate::match_paths`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobOptions {
    /// Directory patterns are resolved against. Results stay relative to it.
    pub cwd: Option<PathBuf>,
    /// Append `/` to every directory in the results.
    pub mark: bool,
    /// Let a pattern without `/` match the final component at any depth.
    pub match_base: bool,
    /// Return the pattern itself when it matches nothing.
    pub nonull: bool,
    /// Let wildcards match names starting with `.`.
    pub dot: bool,
}

/// Resolves one glob pattern to an ordered list of paths.
pub trait GlobProvider {
    /// Resolve `pattern` against the filesystem below `options.cwd`.
    fn glob(&self, pattern: &str, options: &GlobOptions) -> Vec<String>;

    /// Filter `candidates` down to the ones `pattern` matches, keeping their
    /// order. Never touches the filesystem.
    fn match_list(
        &self,
        candidates: &[String],
        pattern: &str,
        options: &GlobOptions,
    ) -> Vec<String>;
}

/// The default provider: walks the filesystem with `ignore` and matches with
/// `glob_match`.
///
/// Only the directory named by the pattern's literal prefix is walked, and the
/// walk depth is bounded unless the pattern contains `**`. Results are sorted
/// by byte order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsGlob;

impl GlobProvider for FsGlob {
    fn glob(&self, pattern: &str, options: &GlobOptions) -> Vec<String> {
        let mut matches = glob_fs(pattern, options);
        if matches.is_empty() && options.nonull {
            matches.push(pattern.to_string());
        }
        matches
    }

    fn match_list(
        &self,
        candidates: &[String],
        pattern: &str,
        options: &GlobOptions,
    ) -> Vec<String> {
        let mut matches: Vec<String> = candidates
            .iter()
            .filter(|candidate| matches_candidate(pattern, candidate, options))
            .cloned()
            .collect();
        if matches.is_empty() && options.nonull {
            matches.push(pattern.to_string());
        }
        matches
    }
}

/// Whether `s` contains any glob metacharacter.
pub fn has_magic(s: &str) -> bool {
    s.contains(GLOB_MAGIC)
}

fn strip_dot_slash(s: &str) -> &str {
    s.strip_prefix("./").unwrap_or(s)
}

/// Candidates are compared as given: `./foo.js` is not matched by `*.js`.
fn matches_candidate(pattern: &str, candidate: &str, options: &GlobOptions) -> bool {
    if options.match_base && !pattern.contains('/') {
        glob_matches(pattern, paths::basename(candidate), options.dot)
    } else {
        glob_matches(pattern, candidate, options.dot)
    }
}

fn glob_matches(pattern: &str, path: &str, dot: bool) -> bool {
    if !dot && hides_dotfile(pattern, path) {
        return false;
    }
    glob_match::glob_match(pattern, path)
}

/// Like [`glob_matches`], but a trailing `/**` also matches zero segments when
/// the path is a directory, so `deep/**` walks up to and includes `deep`.
fn glob_matches_entry(pattern: &str, path: &str, is_dir: bool, dot: bool) -> bool {
    if glob_matches(pattern, path, dot) {
        return true;
    }
    match pattern.strip_suffix("/**") {
        Some(base) if is_dir && !base.is_empty() => glob_matches(base, path, dot),
        _ => false,
    }
}

/// A path with a `.`-prefixed component only matches when the pattern spells
/// out a `.`-prefixed component itself.
fn hides_dotfile(pattern: &str, path: &str) -> bool {
    let dotted = |s: &str| {
        s.split('/')
            .any(|part| part.starts_with('.') && part != "." && part != "..")
    };
    dotted(path) && !dotted(pattern)
}

fn glob_fs(pattern: &str, options: &GlobOptions) -> Vec<String> {
    let (body, dirs_only) = match pattern.strip_suffix('/') {
        Some(body) if !body.is_empty() => (body, true),
        _ => (pattern, false),
    };
    let body = paths::unixify(strip_dot_slash(body));
    let body = if options.match_base && !body.contains('/') {
        format!("**/{body}")
    } else {
        body
    };
    if body.is_empty() {
        return Vec::new();
    }
    let root = options.cwd.clone().unwrap_or_else(|| PathBuf::from("."));

    if !has_magic(&body) {
        return literal_match(&root, &body, dirs_only, options.mark);
    }

    let absolute = body.starts_with('/');
    let segments: Vec<&str> = body.split('/').collect();
    let literal_len = segments.iter().take_while(|s| !has_magic(s)).count();
    let prefix = segments[..literal_len].join("/");
    let remaining = &segments[literal_len..];
    let max_depth = if remaining.iter().any(|s| s.contains("**")) {
        None
    } else {
        Some(remaining.len())
    };

    let start = if absolute {
        PathBuf::from(if prefix.is_empty() { "/" } else { prefix.as_str() })
    } else if prefix.is_empty() {
        root.clone()
    } else {
        root.join(&prefix)
    };

    let walker = ignore::WalkBuilder::new(&start)
        .standard_filters(false)
        .follow_links(false)
        .max_depth(max_depth)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut results = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(pattern, error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let Some(relative) = relative_path(entry.path(), &root, absolute) else {
            continue;
        };
        let is_dir = entry.path().is_dir();
        if dirs_only && !is_dir {
            continue;
        }
        if !glob_matches_entry(&body, &relative, is_dir, options.dot) {
            continue;
        }
        let mut out = relative;
        if is_dir && (dirs_only || options.mark) {
            out.push('/');
        }
        results.push(out);
    }
    results.sort();
    results.dedup();
    results
}

fn relative_path(path: &Path, root: &Path, absolute: bool) -> Option<String> {
    let relative = if absolute {
        path.to_string_lossy().into_owned()
    } else {
        path.strip_prefix(root).ok()?.to_string_lossy().into_owned()
    };
    if relative.is_empty() {
        return None;
    }
    Some(paths::unixify(&relative))
}

fn literal_match(root: &Path, body: &str, dirs_only: bool, mark: bool) -> Vec<String> {
    let path = if body.starts_with('/') {
        PathBuf::from(body)
    } else {
        root.join(body)
    };
    let Ok(meta) = std::fs::metadata(&path) else {
        return Vec::new();
    };
    if dirs_only && !meta.is_dir() {
        return Vec::new();
    }
    if meta.is_dir() && (dirs_only || mark) {
        vec![format!("{body}/")]
    } else {
        vec![body.to_string()]
    }
}
