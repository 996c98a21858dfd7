//! Helpers shared by the in-process tools.

use std::collections::HashSet;

/// Outcome of looking a caller-supplied key up in a static table.
///
/// Every lookup says which branch it took so that fallbacks and silently
/// dropped keys are visible to callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<T> {
    /// The key named an entry in the table.
    Matched(T),
    /// The key was absent or unknown; a designated default was used instead.
    Defaulted(T),
    /// The key was unknown and contributes nothing.
    Ignored,
}

impl<T> Resolution<T> {
    /// The resolved value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Resolution::Matched(v) | Resolution::Defaulted(v) => Some(v),
            Resolution::Ignored => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Resolution::Matched(_))
    }
}

/// Split a comma-separated list, trimming items and dropping empty ones.
pub fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// Remove duplicates, keeping the first occurrence of each item in place.
pub fn dedup_preserving_order<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let item = item.into();
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}
