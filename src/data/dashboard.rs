use serde::Serialize;

use super::aggregate::{count_by_category, count_by_tokens, Counts, CONCERN_DELIMITERS};
use super::filter::{filtered_indices, FilterState};
use super::lookup::find_by_name;
use super::model::{Field, Record, RecordSet};

/// Everything one pass over the table produces for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// Rows in the full table.
    pub total: usize,
    /// Rows passing the current filters, in table order.
    pub visible: Vec<Record>,
    /// "始めた理由" frequencies over the full table.
    pub reason_counts: Counts,
    /// Concern-token frequencies over the full table.
    pub concern_counts: Counts,
    /// Karte of the selected student, if one was requested and found.
    pub selected: Option<Record>,
}

/// Run filter → aggregate → lookup over `set`.
///
/// The two charts are always computed over the whole table; only the
/// `visible` rows react to the filters.
pub fn summarize(
    set: &RecordSet,
    filters: &FilterState,
    selected_name: Option<&str>,
) -> DashboardView {
    let visible = filtered_indices(set, filters)
        .into_iter()
        .filter_map(|i| set.get(i).cloned())
        .collect();

    DashboardView {
        total: set.len(),
        visible,
        reason_counts: count_by_category(set, Field::ReasonStarted),
        concern_counts: count_by_tokens(set, Field::Concerns, &CONCERN_DELIMITERS),
        selected: selected_name.and_then(|name| find_by_name(set, name).cloned()),
    }
}
