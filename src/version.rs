//! Tag parsing and latest-version selection.
//!
//! Two tag families exist: semantic-looking tags (`1.2.3`, `v0.14.6`) ordered
//! by a derived numeric key, and date tags (`2025.8.1`) ordered
//! lexicographically. Lexicographic ordering of date tags is only valid
//! because the upstream publisher zero-pads the month; tags that are not
//! zero-padded fall outside the date shape and are discarded.

use regex::Regex;
use std::sync::OnceLock;

fn version_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^v?\d+\.\d+").expect("valid regex"))
}

fn date_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}\.\d{2}\.\d+$").expect("valid regex"))
}

/// True if the tag looks like a plain or `v`-prefixed dotted version.
pub fn is_version_tag(tag: &str) -> bool {
    version_shape().is_match(tag)
}

/// True if the tag is a zero-padded `YYYY.MM.N` date tag.
pub fn is_date_tag(tag: &str) -> bool {
    date_shape().is_match(tag)
}

/// Ordering key for a version tag: strip the optional `v` prefix, split on
/// dots, keep the segments that parse as integers. `"1.10.0"` keys higher
/// than `"1.2.3"` because segments compare numerically, not as text.
pub fn numeric_key(tag: &str) -> Vec<u64> {
    tag.trim_start_matches('v')
        .split('.')
        .filter_map(|part| part.parse::<u64>().ok())
        .collect()
}

/// Highest version among the tags that match the version shape. Tags that do
/// not match (`latest`, digests, channel names) are dropped before the
/// comparison, never merely sorted last.
pub fn latest_numeric<I, S>(tags: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut candidates: Vec<String> = tags
        .into_iter()
        .filter(|t| is_version_tag(t.as_ref()))
        .map(|t| t.as_ref().to_string())
        .collect();
    candidates.sort_by(|a, b| numeric_key(a).cmp(&numeric_key(b)));
    candidates.pop()
}

/// Highest date tag, by plain lexicographic order over the zero-padded shape.
pub fn latest_dated<I, S>(tags: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut candidates: Vec<String> = tags
        .into_iter()
        .filter(|t| is_date_tag(t.as_ref()))
        .map(|t| t.as_ref().to_string())
        .collect();
    candidates.sort();
    candidates.pop()
}
