//! Flat-file storage for the student table.
//!
//! The table lives in one CSV file with a fixed seven-column header. Every
//! append rewrites the whole file immediately. There is no locking: two
//! sessions writing the same file at once race, and the last writer wins.
//! Only a single operator at a time is supported.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, info, warn};
use thiserror::Error;

use super::model::{Field, Record, RecordSet};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StoreError {
    /// The table could not be opened or a row could not be parsed.
    #[error("cannot read table {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The file was readable but does not have the expected layout.
    #[error("table {} is malformed: {detail}", .path.display())]
    Malformed { path: PathBuf, detail: String },

    /// The table could not be written back.
    #[error("cannot write table {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl StoreError {
    /// Whether the error happened while writing (the data in memory was not saved).
    pub fn is_write(&self) -> bool {
        matches!(self, StoreError::Write { .. })
    }
}

// ---------------------------------------------------------------------------
// Storage identity used as the memoization key
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
struct StorageIdentity {
    path: PathBuf,
    modified: Option<SystemTime>,
    len: u64,
}

impl StorageIdentity {
    fn probe(path: &Path) -> std::io::Result<Self> {
        let meta = fs::metadata(path)?;
        Ok(Self {
            path: fs::canonicalize(path)?,
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

#[derive(Debug, Clone)]
struct CachedTable {
    identity: StorageIdentity,
    records: RecordSet,
}

// ---------------------------------------------------------------------------
// TableStore
// ---------------------------------------------------------------------------

/// Handle on one CSV table. Loads are memoized until the file changes or the
/// store itself writes to it.
#[derive(Debug)]
pub struct TableStore {
    path: PathBuf,
    cache: Option<CachedTable>,
}

impl TableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole table.
    ///
    /// Returns the cached set when the file's identity (canonical path,
    /// modification time and length) is unchanged since the last read.
    pub fn load(&mut self) -> Result<RecordSet, StoreError> {
        let identity = StorageIdentity::probe(&self.path).map_err(|e| StoreError::Read {
            path: self.path.clone(),
            source: e.into(),
        })?;

        if let Some(cached) = &self.cache {
            if cached.identity == identity {
                debug!("Table cache hit for {}", self.path.display());
                return Ok(cached.records.clone());
            }
        }

        let records = read_table(&self.path)?;
        info!(
            "Loaded {} records from {}",
            records.len(),
            self.path.display()
        );
        self.cache = Some(CachedTable {
            identity,
            records: records.clone(),
        });
        Ok(records)
    }

    /// Return `set` with `record` added at the end.
    pub fn append(&self, set: &RecordSet, record: Record) -> RecordSet {
        set.appended(record)
    }

    /// Overwrite the file with the full set.
    ///
    /// The rows go to a sibling temp file that is then renamed over the
    /// table, so a failed write leaves the previous contents in place.
    pub fn persist(&mut self, set: &RecordSet) -> Result<(), StoreError> {
        // Whatever happens below, the next load must go back to disk.
        self.invalidate();

        let tmp = temp_path(&self.path);
        let result = write_table(&tmp, set)
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(csv::Error::from));

        match result {
            Ok(()) => {
                info!("Wrote {} records to {}", set.len(), self.path.display());
                Ok(())
            }
            Err(source) => {
                warn!("Failed to write {}: {source}", self.path.display());
                let _ = fs::remove_file(&tmp);
                Err(StoreError::Write {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    /// Append `record` and persist immediately.
    ///
    /// `set` is replaced only once the write succeeded; on error it still
    /// holds the rows that are on disk.
    pub fn append_and_persist(
        &mut self,
        set: &mut RecordSet,
        record: Record,
    ) -> Result<(), StoreError> {
        let next = self.append(set, record);
        self.persist(&next)?;
        *set = next;
        Ok(())
    }

    /// Drop the memoized table.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }
}

// ---------------------------------------------------------------------------
// CSV helpers
// ---------------------------------------------------------------------------

fn read_table(path: &Path) -> Result<RecordSet, StoreError> {
    let read_err = |source: csv::Error| StoreError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(read_err)?;
    let headers = reader.headers().map_err(read_err)?.clone();
    let expected = Field::headers();
    if !headers.iter().eq(expected.iter().copied()) {
        return Err(StoreError::Malformed {
            path: path.to_path_buf(),
            detail: format!(
                "expected header {:?}, found {:?}",
                expected,
                headers.iter().collect::<Vec<_>>()
            ),
        });
    }

    let records = reader
        .deserialize::<Record>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    Ok(RecordSet::from_records(records))
}

fn write_table(path: &Path, set: &RecordSet) -> Result<(), csv::Error> {
    // Header written by hand so an empty table still carries it.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(Field::headers())?;
    for record in set {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("table"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "名前,年代,始めた理由,目標,悩み,指導メモ,道具\n";

    fn write(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("shodo_data.csv");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn load_reads_nulls_and_quoted_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            &format!("{HEADER}山田,30代,健康,楷書,\"筆圧,姿勢\",,筆\n"),
        );
        let set = TableStore::new(&path).load().unwrap();
        assert_eq!(set.len(), 1);
        let r = &set.records()[0];
        assert_eq!(r.concerns.as_deref(), Some("筆圧,姿勢"));
        assert_eq!(r.coaching_notes, None);
        assert_eq!(r.tool.as_deref(), Some("筆"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TableStore::new(dir.path().join("nope.csv"))
            .load()
            .unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn wrong_header_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "name,age\nA,20\n");
        let err = TableStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn ragged_row_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, &format!("{HEADER}山田,30代\n"));
        let err = TableStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn persist_then_load_observes_new_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, HEADER);
        let mut store = TableStore::new(&path);
        let mut set = store.load().unwrap();
        assert!(set.is_empty());

        let record = Record {
            name: Some("鈴木".into()),
            concerns: Some("止め はね".into()),
            ..Default::default()
        };
        store.append_and_persist(&mut set, record.clone()).unwrap();
        assert_eq!(set.len(), 1);

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, set);
        assert_eq!(reloaded.records()[0], record);
    }

    #[test]
    fn empty_strings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.csv");
        let mut store = TableStore::new(&path);
        let set = store.append(
            &RecordSet::default(),
            Record {
                name: Some(String::new()),
                tool: Some("筆".into()),
                ..Default::default()
            },
        );
        store.persist(&set).unwrap();
        assert_eq!(store.load().unwrap(), set);
    }

    #[test]
    fn persist_resets_cache_for_same_length_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("same_len.csv");
        let named = |name: &str| {
            RecordSet::from_records(vec![Record {
                name: Some(name.to_string()),
                tool: Some("筆".into()),
                ..Default::default()
            }])
        };
        TableStore::new(&path).persist(&named("山田")).unwrap();

        let mut store = TableStore::new(&path);
        assert_eq!(store.load().unwrap(), named("山田"));

        // "佐藤" and "山田" have the same UTF-8 length.
        let before = fs::metadata(&path).unwrap().len();
        store.persist(&named("佐藤")).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), before);
        assert_eq!(store.load().unwrap(), named("佐藤"));
    }

    #[test]
    fn empty_table_keeps_its_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.csv");
        TableStore::new(&path).persist(&RecordSet::default()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), HEADER);
    }

    #[test]
    fn failed_write_rolls_back_the_append() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TableStore::new(dir.path().join("missing_dir").join("t.csv"));
        let mut set = RecordSet::default();
        let err = store
            .append_and_persist(&mut set, Record::default())
            .unwrap_err();
        assert!(err.is_write());
        assert!(set.is_empty());
    }
}
