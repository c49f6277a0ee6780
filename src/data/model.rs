use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field – the seven columns of the student table
// ---------------------------------------------------------------------------

/// One column of the student table, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    AgeBracket,
    ReasonStarted,
    Goal,
    Concerns,
    CoachingNotes,
    Tool,
}

impl Field {
    /// All columns in the order they appear in the CSV header.
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::AgeBracket,
        Field::ReasonStarted,
        Field::Goal,
        Field::Concerns,
        Field::CoachingNotes,
        Field::Tool,
    ];

    /// Column header as written in the CSV file.
    pub fn header(self) -> &'static str {
        match self {
            Field::Name => "名前",
            Field::AgeBracket => "年代",
            Field::ReasonStarted => "始めた理由",
            Field::Goal => "目標",
            Field::Concerns => "悩み",
            Field::CoachingNotes => "指導メモ",
            Field::Tool => "道具",
        }
    }

    /// The full header row.
    pub fn headers() -> [&'static str; 7] {
        Self::ALL.map(Field::header)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// One student entry. Every attribute is nullable; an empty CSV cell is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "名前")]
    pub name: Option<String>,
    #[serde(rename = "年代")]
    pub age_bracket: Option<String>,
    #[serde(rename = "始めた理由")]
    pub reason_started: Option<String>,
    #[serde(rename = "目標")]
    pub goal: Option<String>,
    /// Several concern tokens joined by "、", "," or a space.
    #[serde(rename = "悩み")]
    pub concerns: Option<String>,
    #[serde(rename = "指導メモ")]
    pub coaching_notes: Option<String>,
    #[serde(rename = "道具")]
    pub tool: Option<String>,
}

impl Record {
    /// Borrow the value of a column, `None` when the cell is null.
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Name => &self.name,
            Field::AgeBracket => &self.age_bracket,
            Field::ReasonStarted => &self.reason_started,
            Field::Goal => &self.goal,
            Field::Concerns => &self.concerns,
            Field::CoachingNotes => &self.coaching_notes,
            Field::Tool => &self.tool,
        };
        value.as_deref()
    }

    /// Empty cells become nulls. CSV cannot tell the two apart, so this is
    /// the form every row takes once it is in a `RecordSet`.
    pub fn normalized(self) -> Self {
        fn cell(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.is_empty())
        }
        Record {
            name: cell(self.name),
            age_bracket: cell(self.age_bracket),
            reason_started: cell(self.reason_started),
            goal: cell(self.goal),
            concerns: cell(self.concerns),
            coaching_notes: cell(self.coaching_notes),
            tool: cell(self.tool),
        }
    }

    /// Display text for a cell, with nulls rendered as an empty string.
    pub fn display(&self, field: Field) -> &str {
        self.get(field).unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// NewRecordDraft – the editable entry form
// ---------------------------------------------------------------------------

/// Raw text of the "new student" form. Any field may be left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecordDraft {
    pub name: String,
    pub age_bracket: String,
    pub reason_started: String,
    pub goal: String,
    pub concerns: String,
    pub coaching_notes: String,
    pub tool: String,
}

impl NewRecordDraft {
    /// Mutable access to the text of one column, for form widgets.
    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::AgeBracket => &mut self.age_bracket,
            Field::ReasonStarted => &mut self.reason_started,
            Field::Goal => &mut self.goal,
            Field::Concerns => &mut self.concerns,
            Field::CoachingNotes => &mut self.coaching_notes,
            Field::Tool => &mut self.tool,
        }
    }

    /// Build the record to append. Empty inputs become nulls.
    pub fn to_record(&self) -> Record {
        Record {
            name: Some(self.name.clone()),
            age_bracket: Some(self.age_bracket.clone()),
            reason_started: Some(self.reason_started.clone()),
            goal: Some(self.goal.clone()),
            concerns: Some(self.concerns.clone()),
            coaching_notes: Some(self.coaching_notes.clone()),
            tool: Some(self.tool.clone()),
        }
        .normalized()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// RecordSet – the complete loaded table
// ---------------------------------------------------------------------------

/// The ordered student table. Insertion order is preserved and rows are only
/// ever added at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records: records.into_iter().map(Record::normalized).collect(),
        }
    }

    /// A new set with `record` appended; `self` is left as it was.
    pub fn appended(&self, record: Record) -> Self {
        let mut records = Vec::with_capacity(self.records.len() + 1);
        records.extend_from_slice(&self.records);
        records.push(record.normalized());
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
