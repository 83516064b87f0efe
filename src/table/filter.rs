use crate::model::Record;

/// Keep the records whose name contains `query`, ignoring case.
///
/// Only top-level records are matched; a folder stays or goes on its own
/// name. Relative order is preserved and the input is left untouched.
pub fn filter(records: &[Record], query: &str) -> Vec<Record> {
    if query.is_empty() {
        return records.to_vec();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches(record, &needle))
        .cloned()
        .collect()
}

fn matches(record: &Record, needle: &str) -> bool {
    record.name().to_lowercase().contains(needle)
}
