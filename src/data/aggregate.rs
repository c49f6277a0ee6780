use std::collections::BTreeMap;

use super::model::{Field, RecordSet};

/// Characters that separate concern tokens: full-width comma, comma, space.
pub const CONCERN_DELIMITERS: [char; 3] = ['、', ',', ' '];

/// Value → number of occurrences.
pub type Counts = BTreeMap<String, usize>;

/// Count each distinct value of a single-valued column. Nulls are skipped.
pub fn count_by_category(set: &RecordSet, field: Field) -> Counts {
    let mut counts = Counts::new();
    for value in set.iter().filter_map(|r| r.get(field)) {
        *counts.entry(value.to_string()).or_default() += 1;
    }
    counts
}

/// Split every non-null value of `field` on any of `delimiters` and count the
/// pieces.
///
/// Tokens are kept verbatim: no trimming, and the empty token produced by two
/// adjacent delimiters is counted like any other.
pub fn count_by_tokens(set: &RecordSet, field: Field, delimiters: &[char]) -> Counts {
    let mut counts = Counts::new();
    for value in set.iter().filter_map(|r| r.get(field)) {
        for token in value.split(|c: char| delimiters.contains(&c)) {
            *counts.entry(token.to_string()).or_default() += 1;
        }
    }
    counts
}

/// Entries ordered for a bar chart: highest count first, ties by value.
pub fn ranked(counts: &Counts) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, &v)| (k.as_str(), v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}
