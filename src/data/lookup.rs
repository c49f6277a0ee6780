use std::collections::HashSet;

use super::model::{Record, RecordSet};

/// Find the karte for `name`.
///
/// Names are not unique; when several rows share one, the earliest row wins
/// and the others are never reported. `None` when nobody has that name.
pub fn find_by_name<'a>(set: &'a RecordSet, name: &str) -> Option<&'a Record> {
    set.iter().find(|r| r.name.as_deref() == Some(name))
}

/// Distinct non-null names in first-seen order, for the name selector.
pub fn names(set: &RecordSet) -> Vec<&str> {
    let mut seen = HashSet::new();
    set.iter()
        .filter_map(|r| r.name.as_deref())
        .filter(|name| seen.insert(*name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: Option<&str>, goal: &str) -> Record {
        Record {
            name: name.map(str::to_string),
            goal: Some(goal.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn first_duplicate_wins() {
        let set = RecordSet::from_records(vec![
            named(Some("Bob"), "a"),
            named(Some("Alice"), "first"),
            named(None, "b"),
            named(Some("Carol"), "c"),
            named(Some("Alice"), "second"),
        ]);
        let hit = find_by_name(&set, "Alice").unwrap();
        assert_eq!(hit.goal.as_deref(), Some("first"));
        assert!(std::ptr::eq(hit, &set.records()[1]));
    }

    #[test]
    fn miss_and_empty_table_are_none() {
        let set = RecordSet::from_records(vec![named(Some("Bob"), "a")]);
        assert!(find_by_name(&set, "Alice").is_none());
        assert!(find_by_name(&RecordSet::default(), "Bob").is_none());
    }

    #[test]
    fn names_are_unique_and_ordered() {
        let set = RecordSet::from_records(vec![
            named(Some("山田"), "a"),
            named(None, "b"),
            named(Some("佐藤"), "c"),
            named(Some("山田"), "d"),
        ]);
        assert_eq!(names(&set), vec!["山田", "佐藤"]);
    }
}
