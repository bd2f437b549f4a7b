//! German-locale string collation for allergen labels.
//!
//! Labels compare by base letters first (case and diacritics ignored, `ß`
//! expanded to `ss`), then by diacritics, then by case with lowercase first.
//! Remaining ties fall back to code-point order so the ordering is total.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks block (U+0300..=U+036F).
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Primary key: base letters only.
fn primary_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s.nfd().filter(|c| !is_combining_mark(*c)) {
        if c == 'ß' || c == 'ẞ' {
            key.push_str("ss");
        } else {
            key.extend(c.to_lowercase());
        }
    }
    key
}

/// Secondary key: base letters plus their diacritics.
fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// Tertiary key: first difference in letter case, lowercase first.
fn compare_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(char::is_uppercase)
        .cmp(b.chars().map(char::is_uppercase))
}

/// Compare two strings using German collation rules.
#[must_use]
pub fn german_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| compare_case(a, b))
        .then_with(|| a.cmp(b))
}

/// Sort labels in place using German collation.
///
/// Keys are computed once per label rather than once per comparison.
pub fn sort_german(labels: &mut [String]) {
    labels.sort_by_cached_key(|s| CollationKey::new(s));
}

/// Precomputed collation key, ordered like [`german_cmp`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct CollationKey {
    primary: String,
    secondary: String,
    raw: String,
}

impl CollationKey {
    fn new(s: &str) -> Self {
        Self {
            primary: primary_key(s),
            secondary: secondary_key(s),
            raw: s.to_string(),
        }
    }
}

impl Ord for CollationKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .cmp(&other.primary)
            .then_with(|| self.secondary.cmp(&other.secondary))
            .then_with(|| compare_case(&self.raw, &other.raw))
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for CollationKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
