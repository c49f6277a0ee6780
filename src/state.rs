use std::error::Error;
use std::path::PathBuf;

use log::{debug, error, info};

use crate::data::aggregate::{count_by_category, count_by_tokens, Counts, CONCERN_DELIMITERS};
use crate::data::filter::{filtered_indices, FilterState};
use crate::data::lookup::{find_by_name, names};
use crate::data::model::{Field, NewRecordDraft, Record, RecordSet};
use crate::data::store::{StoreError, TableStore};

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    /// Storage handle (None until a table is opened).
    pub store: Option<TableStore>,

    /// The whole table as last loaded or appended.
    pub records: RecordSet,

    /// Sidebar selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Choices offered by the sidebar, one list per filterable column.
    pub reason_options: Vec<String>,
    pub concern_options: Vec<String>,
    pub tool_options: Vec<String>,

    /// Chart data, always over the full table.
    pub reason_counts: Counts,
    pub concern_counts: Counts,

    /// Names offered by the karte selector.
    pub names: Vec<String>,
    pub selected_name: Option<String>,

    /// Contents of the "new student" form.
    pub draft: NewRecordDraft,

    /// Status / error message shown in the UI.
    pub status: Option<Status>,
}

impl AppState {
    /// Open a table and make it the session's store.
    pub fn open(&mut self, path: impl Into<PathBuf>) -> Result<(), StoreError> {
        let mut store = TableStore::new(path);
        match store.load() {
            Ok(records) => {
                self.store = Some(store);
                self.set_records(records);
                self.status = None;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load table: {e}");
                self.status = Some(Status::Error(format!("読み込みエラー: {}", error_chain(&e))));
                Err(e)
            }
        }
    }

    /// Re-read the current table from disk.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        let Some(store) = self.store.as_mut() else {
            return Ok(());
        };
        store.invalidate();
        match store.load() {
            Ok(records) => {
                self.set_records(records);
                Ok(())
            }
            Err(e) => {
                error!("Failed to reload table: {e}");
                // No partial load: the session stops working on the stale rows.
                self.store = None;
                self.set_records(RecordSet::default());
                self.status = Some(Status::Error(format!("読み込みエラー: {}", error_chain(&e))));
                Err(e)
            }
        }
    }

    /// Ingest a table: rebuild options, charts and the filtered view.
    pub fn set_records(&mut self, records: RecordSet) {
        self.reason_counts = count_by_category(&records, Field::ReasonStarted);
        self.concern_counts = count_by_tokens(&records, Field::Concerns, &CONCERN_DELIMITERS);
        self.reason_options = self.reason_counts.keys().cloned().collect();
        // The empty token matches every row, so it is not offered as a choice.
        self.concern_options = self
            .concern_counts
            .keys()
            .filter(|token| !token.is_empty())
            .cloned()
            .collect();
        self.tool_options = count_by_category(&records, Field::Tool)
            .into_keys()
            .collect();
        self.names = names(&records).into_iter().map(str::to_string).collect();

        let still_present = self
            .selected_name
            .as_ref()
            .is_some_and(|n| self.names.contains(n));
        if !still_present {
            self.selected_name = self.names.first().cloned();
        }

        self.records = records;
        self.refilter();
    }

    /// Recompute `visible_indices` after filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.records, &self.filters);
        debug!(
            "{} of {} records pass the filters",
            self.visible_indices.len(),
            self.records.len()
        );
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, field: Field, value: &str) {
        self.filters.toggle(field, value);
        self.refilter();
    }

    /// Deselect everything in one column (back to "show all").
    pub fn clear_filter(&mut self, field: Field) {
        if let Some(selected) = self.filters.selection_mut(field) {
            selected.clear();
        }
        self.refilter();
    }

    pub fn select_name(&mut self, name: &str) {
        self.selected_name = Some(name.to_string());
    }

    /// The karte to show, if the selected name exists.
    pub fn selected_record(&self) -> Option<&Record> {
        self.selected_name
            .as_deref()
            .and_then(|name| find_by_name(&self.records, name))
    }

    /// Append the form contents and write the table.
    ///
    /// Returns whether the row was saved. On a write failure the table in
    /// memory stays as it is on disk and the form keeps its contents.
    pub fn submit_draft(&mut self) -> bool {
        let Some(store) = self.store.as_mut() else {
            self.status = Some(Status::Error("データファイルが開かれていません".to_string()));
            return false;
        };

        let mut records = self.records.clone();
        let record = self.draft.to_record();
        match store.append_and_persist(&mut records, record) {
            Ok(()) => {
                info!("Appended record #{}", records.len());
                self.status = Some(Status::Info(format!(
                    "{} さんのデータを追加しました！",
                    self.draft.name
                )));
                self.draft.clear();
                self.set_records(records);
                true
            }
            Err(e) => {
                error!("Failed to save new record: {e}");
                self.status = Some(Status::Error(format!(
                    "保存できませんでした（未保存）: {}",
                    error_chain(&e)
                )));
                false
            }
        }
    }
}

/// The error and its direct cause. `csv::Error` already prints its own io
/// cause, so deeper sources are not appended.
fn error_chain(e: &StoreError) -> String {
    match e.source() {
        Some(source) => format!("{e}: {source}"),
        None => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "名前,年代,始めた理由,目標,悩み,指導メモ,道具\n\
        山田,30代,健康,楷書,筆圧、 姿勢,,筆\n\
        佐藤,20代,趣味,行書,バランス,,筆ペン\n";

    fn opened(dir: &tempfile::TempDir) -> AppState {
        let path = dir.path().join("shodo_data.csv");
        std::fs::write(&path, TABLE).unwrap();
        let mut state = AppState::default();
        state.open(&path).unwrap();
        state
    }

    #[test]
    fn open_builds_options_and_selects_first_name() {
        let dir = tempfile::tempdir().unwrap();
        let state = opened(&dir);
        assert_eq!(state.records.len(), 2);
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.tool_options, vec!["筆", "筆ペン"]);
        assert!(!state.concern_options.iter().any(|t| t.is_empty()));
        assert_eq!(state.concern_counts.get(""), Some(&1));
        assert_eq!(state.selected_name.as_deref(), Some("山田"));
        assert_eq!(
            state.selected_record().and_then(|r| r.goal.as_deref()),
            Some("楷書")
        );
    }

    #[test]
    fn toggling_filters_updates_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = opened(&dir);
        state.toggle_filter_value(Field::Concerns, "バランス");
        assert_eq!(state.visible_indices, vec![1]);
        state.clear_filter(Field::Concerns);
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn submit_appends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = opened(&dir);
        state.draft.name = "鈴木".into();
        state.draft.tool = "筆".into();
        assert!(state.submit_draft());
        assert_eq!(state.records.len(), 3);
        assert_eq!(state.draft, NewRecordDraft::default());
        assert_eq!(
            state.status,
            Some(Status::Info("鈴木 さんのデータを追加しました！".into()))
        );

        let mut fresh = AppState::default();
        fresh.open(dir.path().join("shodo_data.csv")).unwrap();
        assert_eq!(fresh.records, state.records);
    }

    #[test]
    fn failed_reload_drops_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = opened(&dir);
        let path = dir.path().join("shodo_data.csv");
        std::fs::write(&path, "名前,年代\n山田,30代\n").unwrap();

        assert!(state.reload().is_err());
        assert!(state.store.is_none());
        assert!(state.records.is_empty());
        assert!(state.visible_indices.is_empty());

        state.draft.name = "鈴木".into();
        assert!(!state.submit_draft());
        assert_eq!(
            state.status,
            Some(Status::Error("データファイルが開かれていません".into()))
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "名前,年代\n山田,30代\n");
    }

    #[test]
    fn error_text_names_the_cause_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let cause = std::fs::metadata(&path).unwrap_err().to_string();
        let mut state = AppState::default();
        assert!(state.open(&path).is_err());
        let Some(Status::Error(text)) = &state.status else {
            panic!("expected an error status");
        };
        assert_eq!(text.matches(cause.as_str()).count(), 1, "{text}");
    }

    #[test]
    fn submit_without_store_reports_error() {
        let mut state = AppState::default();
        assert!(!state.submit_draft());
        assert!(matches!(state.status, Some(Status::Error(_))));
        assert!(state.records.is_empty());
    }

    #[test]
    fn open_failure_is_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        assert!(state.open(dir.path().join("absent.csv")).is_err());
        assert!(state.store.is_none());
        assert!(matches!(state.status, Some(Status::Error(_))));
    }
}
