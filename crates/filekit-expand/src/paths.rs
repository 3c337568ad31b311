//! String-level path helpers.
//!
//! Everything here treats both `/` and `\` as separators and produces
//! `/`-separated output, so results are identical on every host.

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Replace every `\` with `/`.
pub fn unixify(path: &str) -> String {
    path.replace('\\', "/")
}

/// Join path segments and normalize the result.
///
/// Empty segments are skipped, `.` components are dropped and `..` pops the
/// previous component where one exists. A separator at the end of the last
/// non-empty segment is kept. Joining nothing yields `"."`.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let joined = segments
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    normalize(&joined)
}

/// Lexically normalize a path: collapse duplicate separators, drop `.`,
/// resolve `..` against preceding components.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let absolute = path.starts_with(is_separator);
    let trailing = path.ends_with(is_separator);

    let mut parts: Vec<&str> = Vec::new();
    for part in path.split(is_separator) {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }

    let mut out = if absolute { String::from("/") } else { String::new() };
    out.push_str(&parts.join("/"));
    if out.is_empty() {
        out.push('.');
    }
    if trailing && !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// Final path component, ignoring trailing separators.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(is_separator);
    match trimmed.rfind(is_separator) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Extension of the final component including its dot, or `""`.
///
/// A leading dot does not start an extension (`.bashrc` has none).
pub fn extname(path: &str) -> &str {
    let name = basename(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx..],
        _ => "",
    }
}
