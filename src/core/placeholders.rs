//! `{{name}}` placeholder extraction and consistency checking.
//!
//! A translated value must use the same placeholders as the canonical value
//! at the same path. Tokens are compared as sets: order and repetition do not
//! matter, and whitespace inside the braces is ignored (`{{ count }}` is
//! `count`).

use std::{collections::BTreeSet, ops::Range, sync::LazyLock};

use regex::Regex;

use crate::core::cache::CanonicalValueCache;

/// Non-greedy so that several placeholders in one value match separately.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{.+?\}\}").expect("placeholder regex is valid")
});

/// Shortest value that can hold a placeholder: `{{v}}`.
pub const MIN_PLACEHOLDER_VALUE_LEN: usize = 5;

/// One placeholder occurrence inside a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    /// Byte range of the whole `{{...}}` span.
    pub range: Range<usize>,
}

/// Every placeholder occurrence in `value`, in order.
pub fn find_placeholders(value: &str) -> Vec<Placeholder> {
    PLACEHOLDER_REGEX
        .find_iter(value)
        .map(|m| Placeholder {
            name: m.as_str()[2..m.as_str().len() - 2].trim().to_string(),
            range: m.range(),
        })
        .collect()
}

/// Unique placeholder names in `value`.
pub fn extract_tokens(value: &str) -> BTreeSet<String> {
    if value.chars().count() < MIN_PLACEHOLDER_VALUE_LEN {
        return BTreeSet::new();
    }
    find_placeholders(value).into_iter().map(|p| p.name).collect()
}

/// Placeholder mismatch between a translated value and the canonical one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConsistencyReport {
    pub path: String,
    /// In the canonical value but not in the candidate.
    pub missing: BTreeSet<String>,
    /// In the candidate but not in the canonical value.
    pub invalid: BTreeSet<String>,
    /// Every token of the canonical value.
    pub expected: BTreeSet<String>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

/// Compare `candidate` against the canonical value cached at `path`.
///
/// Returns `None` when there is nothing to compare: the workspace is not a
/// localization workspace, the path has no canonical value, the candidate is
/// too short to hold a placeholder, or neither side has any placeholder.
/// Invalid tokens are only looked for when the candidate contains `{{`.
pub fn check(
    cache: &CanonicalValueCache,
    path: &str,
    candidate: &str,
) -> Option<ConsistencyReport> {
    if !cache.is_localization_workspace() || candidate.chars().count() < MIN_PLACEHOLDER_VALUE_LEN
    {
        return None;
    }
    let canonical = cache.value_at(path)?;

    let expected = extract_tokens(canonical);
    let actual = extract_tokens(candidate);
    if expected.is_empty() && actual.is_empty() {
        return None;
    }

    let missing = expected.difference(&actual).cloned().collect();
    let invalid = if candidate.contains("{{") {
        actual.difference(&expected).cloned().collect()
    } else {
        BTreeSet::new()
    };

    Some(ConsistencyReport {
        path: path.to_string(),
        missing,
        invalid,
        expected,
    })
}
