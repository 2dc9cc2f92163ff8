//! Text matching used to narrow candidate lists.
//!
//! Matching only partitions candidates into shown and hidden. Nothing is
//! scored and filtered lists keep the order the caller declared.

use std::fmt::Display;

/// How a needle is compared against each candidate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Whole-string equality. Used to resolve a fully typed command word.
    #[default]
    Exact,
    /// Case-insensitive prefix match.
    Partial,
    /// Case-insensitive subsequence match, see [`fuzzy_match`].
    Fuzzy { words: bool, ordered: bool },
}

impl MatchMode {
    pub fn fuzzy() -> Self {
        MatchMode::Fuzzy {
            words: false,
            ordered: true,
        }
    }

    pub fn matches(self, needle: &str, haystack: &str) -> bool {
        match self {
            MatchMode::Exact => needle == haystack,
            MatchMode::Partial => partial_match(needle, haystack),
            MatchMode::Fuzzy { words, ordered } => fuzzy_match(needle, haystack, words, ordered),
        }
    }
}

/// Return true if `needle` fuzzy matches `haystack`.
///
/// The needle is split into characters, or into whitespace separated words
/// when `words` is set. With `ordered` the tokens must occur in the haystack
/// in the same order without sharing positions; otherwise each token only has
/// to occur somewhere. An empty needle always matches.
pub fn fuzzy_match(needle: &str, haystack: &str, words: bool, ordered: bool) -> bool {
    let needle = needle.to_lowercase();
    let haystack = haystack.to_lowercase();

    let tokens: Vec<&str> = if words {
        needle.split_whitespace().collect()
    } else {
        needle
            .char_indices()
            .map(|(i, c)| &needle[i..i + c.len_utf8()])
            .collect()
    };

    if !ordered {
        return tokens.iter().all(|t| haystack.contains(t));
    }

    let mut cursor = 0;
    for token in tokens {
        match haystack[cursor..].find(token) {
            Some(i) => cursor += i + token.len(),
            None => return false,
        }
    }
    true
}

/// Return true if `haystack` starts with `needle`, ignoring case.
pub fn partial_match(needle: &str, haystack: &str) -> bool {
    haystack.to_lowercase().starts_with(&needle.to_lowercase())
}

/// Keep the items whose key matches `needle`, preserving input order.
pub fn filter_by<T, F>(needle: &str, items: impl IntoIterator<Item = T>, mode: MatchMode, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    items
        .into_iter()
        .filter(|item| mode.matches(needle, key(item)))
        .collect()
}

/// [`filter_by`] keyed on each item's display form.
pub fn filter_display<T: Display>(
    needle: &str,
    items: impl IntoIterator<Item = T>,
    mode: MatchMode,
) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| mode.matches(needle, &item.to_string()))
        .collect()
}

pub fn fuzzy_filter<T, F>(
    needle: &str,
    items: impl IntoIterator<Item = T>,
    key: F,
    words: bool,
    ordered: bool,
) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    filter_by(needle, items, MatchMode::Fuzzy { words, ordered }, key)
}

pub fn partial_filter<T, F>(needle: &str, items: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    filter_by(needle, items, MatchMode::Partial, key)
}
