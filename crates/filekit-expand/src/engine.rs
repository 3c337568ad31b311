use crate::options::ExpandOptions;
use crate::pattern::{Patterns, process_patterns};
use crate::provider::{FsGlob, GlobOptions, GlobProvider};

/// Match `patterns` against an explicit list of `candidates`.
///
/// Nothing is read from disk. Returns an empty list when either input is
/// empty; otherwise the result holds each matching candidate once, in the
/// order the patterns produced it.
pub fn match_paths<S: AsRef<str>>(
    options: &GlobOptions,
    patterns: impl Into<Patterns>,
    candidates: &[S],
) -> Vec<String> {
    let patterns = patterns.into();
    if patterns.is_empty() || candidates.is_empty() {
        return Vec::new();
    }
    let candidates: Vec<String> = candidates.iter().map(|c| c.as_ref().to_string()).collect();
    process_patterns(&patterns, |pattern| {
        FsGlob.match_list(&candidates, pattern, options)
    })
}

/// `true` if any of `patterns` matches any of `candidates`.
pub fn is_match<S: AsRef<str>>(
    options: &GlobOptions,
    patterns: impl Into<Patterns>,
    candidates: &[S],
) -> bool {
    !match_paths(options, patterns, candidates).is_empty()
}

/// Resolve `patterns` against the filesystem with the default provider.
pub fn expand(options: &ExpandOptions, patterns: impl Into<Patterns>) -> Vec<String> {
    expand_with(&FsGlob, options, patterns)
}

/// Resolve `patterns` with `provider`, then apply `options.filter`.
#[tracing::instrument(skip_all, fields(cwd = ?options.glob.cwd))]
pub fn expand_with<G: GlobProvider + ?Sized>(
    provider: &G,
    options: &ExpandOptions,
    patterns: impl Into<Patterns>,
) -> Vec<String> {
    let patterns = patterns.into();
    if patterns.is_empty() {
        return Vec::new();
    }
    let mut matches = process_patterns(&patterns, |pattern| provider.glob(pattern, &options.glob));
    if let Some(filter) = &options.filter {
        matches.retain(|path| filter.test(&options.resolve(path)));
    }
    tracing::debug!(count = matches.len(), "expanded patterns");
    matches
}
