use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// The `type` value that marks a folder entry.
pub const FOLDER_KIND: &str = "folder";

/// Built-in dashboard dataset used when no data file is given.
pub const SAMPLE_DATA: &str = include_str!("../../data/dashboard.json");

/// A plain file entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Free-form type tag such as "pdf", "doc" or "mov".
    pub kind: String,
    pub name: String,
    /// ISO-8601 date the file was added.
    pub added: Option<String>,
}

/// A folder and the files it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub name: String,
    /// `None` for a malformed folder entry that has no `files` array at all.
    pub children: Option<Vec<FileEntry>>,
}

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRecord", into = "RawRecord")]
pub enum Record {
    File(FileEntry),
    Folder(Folder),
}

impl Record {
    pub fn file(kind: &str, name: &str, added: Option<&str>) -> Self {
        Record::File(FileEntry {
            kind: kind.to_string(),
            name: name.to_string(),
            added: added.map(str::to_string),
        })
    }

    pub fn folder(name: &str, children: Option<Vec<FileEntry>>) -> Self {
        Record::Folder(Folder {
            name: name.to_string(),
            children,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Record::File(f) => &f.name,
            Record::Folder(d) => &d.name,
        }
    }

    /// The type tag; folders always report [`FOLDER_KIND`].
    pub fn kind(&self) -> &str {
        match self {
            Record::File(f) => &f.kind,
            Record::Folder(_) => FOLDER_KIND,
        }
    }

    /// Date added. Empty strings count as missing.
    pub fn added(&self) -> Option<&str> {
        match self {
            Record::File(f) => f.added.as_deref().filter(|d| !d.is_empty()),
            Record::Folder(_) => None,
        }
    }

    /// Number of children. Only folders with a children collection have a size.
    pub fn size(&self) -> Option<usize> {
        match self {
            Record::File(_) => None,
            Record::Folder(d) => d.children.as_ref().map(Vec::len),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Record::Folder(_))
    }
}

/// On-disk shape shared by files and folders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawRecord {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    added: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    files: Option<Vec<RawRecord>>,
}

impl From<RawRecord> for FileEntry {
    fn from(raw: RawRecord) -> Self {
        FileEntry {
            kind: raw.kind.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            added: raw.added,
        }
    }
}

impl From<FileEntry> for RawRecord {
    fn from(file: FileEntry) -> Self {
        RawRecord {
            kind: Some(file.kind),
            name: Some(file.name),
            added: file.added,
            files: None,
        }
    }
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        if raw.kind.as_deref() == Some(FOLDER_KIND) {
            Record::Folder(Folder {
                name: raw.name.unwrap_or_default(),
                children: raw
                    .files
                    .map(|files| files.into_iter().map(FileEntry::from).collect()),
            })
        } else {
            Record::File(FileEntry::from(raw))
        }
    }
}

impl From<Record> for RawRecord {
    fn from(record: Record) -> Self {
        match record {
            Record::File(file) => RawRecord::from(file),
            Record::Folder(folder) => RawRecord {
                kind: Some(FOLDER_KIND.to_string()),
                name: Some(folder.name),
                added: None,
                files: folder
                    .children
                    .map(|files| files.into_iter().map(RawRecord::from).collect()),
            },
        }
    }
}

/// Parse a JSON array of records.
pub fn parse_records(json: &str) -> serde_json::Result<Vec<Record>> {
    serde_json::from_str(json)
}

/// Read and parse a JSON data file.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path)?;
    parse_records(&content).map_err(|source| AppError::Data {
        path: path.to_path_buf(),
        source,
    })
}

/// The built-in sample dashboard.
pub fn sample_records() -> Result<Vec<Record>> {
    Ok(parse_records(SAMPLE_DATA)?)
}
