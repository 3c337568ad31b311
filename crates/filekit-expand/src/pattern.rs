use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// One glob pattern or an arbitrarily nested list of them.
///
/// A pattern starting with `!` is an exclusion. Nesting carries no meaning
/// beyond grouping: [`Patterns::flatten`] yields the leaves depth-first, left
/// to right, which is the order they are applied in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Patterns {
    One(String),
    Many(Vec<Patterns>),
}

impl Default for Patterns {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl Patterns {
    /// All leaf patterns in application order.
    pub fn flatten(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::One(pattern) => out.push(pattern),
            Self::Many(list) => {
                for item in list {
                    item.collect_into(out);
                }
            }
        }
    }

    /// `true` when there is no leaf pattern at any depth.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(_) => false,
            Self::Many(list) => list.iter().all(Self::is_empty),
        }
    }
}

impl From<&str> for Patterns {
    fn from(pattern: &str) -> Self {
        Self::One(pattern.to_owned())
    }
}

impl From<String> for Patterns {
    fn from(pattern: String) -> Self {
        Self::One(pattern)
    }
}

impl From<&String> for Patterns {
    fn from(pattern: &String) -> Self {
        Self::One(pattern.clone())
    }
}

impl<T: Into<Patterns>> From<Vec<T>> for Patterns {
    fn from(list: Vec<T>) -> Self {
        Self::Many(list.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Patterns>, const N: usize> From<[T; N]> for Patterns {
    fn from(list: [T; N]) -> Self {
        Self::Many(list.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Patterns>> From<&[T]> for Patterns {
    fn from(list: &[T]) -> Self {
        Self::Many(list.iter().cloned().map(Into::into).collect())
    }
}

/// Apply `patterns` in order against a running result set.
///
/// Inclusions append paths returned by `resolve` that are not yet present;
/// exclusions (leading `!`) remove whatever `resolve` returns for the rest of
/// the pattern. Paths already in the set keep their position.
pub fn process_patterns<F>(patterns: &Patterns, mut resolve: F) -> Vec<String>
where
    F: FnMut(&str) -> Vec<String>,
{
    let mut result: IndexSet<String> = IndexSet::new();
    for pattern in patterns.flatten() {
        if let Some(excluded) = pattern.strip_prefix('!') {
            for path in resolve(excluded) {
                result.shift_remove(&path);
            }
        } else {
            result.extend(resolve(pattern));
        }
    }
    result.into_iter().collect()
}
