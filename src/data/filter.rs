use std::collections::BTreeSet;

use super::model::{Field, Record, RecordSet};

// ---------------------------------------------------------------------------
// Filter predicate: the three sidebar selections
// ---------------------------------------------------------------------------

/// Current sidebar selections. An empty set means "no filter" on that column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Selected values of "始めた理由" (exact match).
    pub reasons: BTreeSet<String>,
    /// Selected concern tokens (substring match against "悩み").
    pub concerns: BTreeSet<String>,
    /// Selected values of "道具" (exact match).
    pub tools: BTreeSet<String>,
}

impl FilterState {
    pub fn new(
        reasons: impl IntoIterator<Item = String>,
        concerns: impl IntoIterator<Item = String>,
        tools: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            reasons: reasons.into_iter().collect(),
            concerns: concerns.into_iter().collect(),
            tools: tools.into_iter().collect(),
        }
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty() && self.concerns.is_empty() && self.tools.is_empty()
    }

    /// Selection set backing a filterable column, if the column has one.
    pub fn selection_mut(&mut self, field: Field) -> Option<&mut BTreeSet<String>> {
        match field {
            Field::ReasonStarted => Some(&mut self.reasons),
            Field::Concerns => Some(&mut self.concerns),
            Field::Tool => Some(&mut self.tools),
            _ => None,
        }
    }

    /// Flip one value in a column's selection.
    pub fn toggle(&mut self, field: Field, value: &str) {
        if let Some(selected) = self.selection_mut(field) {
            if !selected.remove(value) {
                selected.insert(value.to_string());
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a single record passes every active predicate.
    pub fn matches(&self, record: &Record) -> bool {
        in_set(&self.reasons, record.get(Field::ReasonStarted))
            && contains_any(&self.concerns, record.get(Field::Concerns))
            && in_set(&self.tools, record.get(Field::Tool))
    }
}

/// Exact membership. Nulls never match an active selection.
fn in_set(selected: &BTreeSet<String>, value: Option<&str>) -> bool {
    if selected.is_empty() {
        return true;
    }
    value.is_some_and(|v| selected.contains(v))
}

/// Case-sensitive substring OR over the selected tokens. The record side is
/// not tokenized: "姿勢" matches "筆圧、姿勢が悪い".
fn contains_any(selected: &BTreeSet<String>, value: Option<&str>) -> bool {
    if selected.is_empty() {
        return true;
    }
    value.is_some_and(|v| selected.iter().any(|token| v.contains(token.as_str())))
}

/// Return indices of records that pass all active filters, in table order.
pub fn filtered_indices(set: &RecordSet, filters: &FilterState) -> Vec<usize> {
    set.iter()
        .enumerate()
        .filter(|(_, record)| filters.matches(record))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(reason: Option<&str>, concerns: Option<&str>, tool: Option<&str>) -> Record {
        Record {
            reason_started: reason.map(str::to_string),
            concerns: concerns.map(str::to_string),
            tool: tool.map(str::to_string),
            ..Default::default()
        }
    }

    fn sample() -> RecordSet {
        RecordSet::from_records(vec![
            rec(Some("健康"), Some("筆圧、姿勢が悪い"), Some("筆")),
            rec(Some("趣味"), None, Some("筆ペン")),
            rec(None, Some("バランス"), Some("筆")),
            rec(Some("健康"), Some("止め,はね"), None),
        ])
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn none() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn empty_filters_are_identity() {
        let set = sample();
        assert_eq!(filtered_indices(&set, &FilterState::default()), vec![0, 1, 2, 3]);
        assert!(filtered_indices(&RecordSet::default(), &FilterState::default()).is_empty());
    }

    #[test]
    fn reason_membership_drops_nulls() {
        let filters = FilterState::new(strings(&["健康"]), none(), none());
        assert_eq!(filtered_indices(&sample(), &filters), vec![0, 3]);
    }

    #[test]
    fn concern_token_is_substring_match() {
        let filters = FilterState::new(none(), strings(&["姿勢"]), none());
        assert_eq!(filtered_indices(&sample(), &filters), vec![0]);
    }

    #[test]
    fn concern_tokens_are_or_combined() {
        let filters = FilterState::new(none(), strings(&["バランス", "はね"]), none());
        assert_eq!(filtered_indices(&sample(), &filters), vec![2, 3]);
    }

    #[test]
    fn predicates_combine_with_and() {
        let filters = FilterState::new(strings(&["健康"]), none(), strings(&["筆"]));
        assert_eq!(filtered_indices(&sample(), &filters), vec![0]);
    }

    #[test]
    fn output_is_ordered_subset() {
        let filters = FilterState::new(none(), none(), strings(&["筆", "筆ペン"]));
        let out = filtered_indices(&sample(), &filters);
        assert!(out.windows(2).all(|w| w[0] < w[1]));
        assert!(out.iter().all(|&i| i < sample().len()));
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut filters = FilterState::default();
        filters.toggle(Field::Tool, "筆");
        assert!(filters.tools.contains("筆"));
        filters.toggle(Field::Tool, "筆");
        assert!(filters.is_empty());
        filters.toggle(Field::Goal, "楷書");
        assert!(filters.is_empty());
    }
}
