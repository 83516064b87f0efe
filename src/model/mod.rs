pub mod record;

pub use record::{load_records, sample_records, FileEntry, Record};
