use std::cmp::Ordering;

use serde::Serialize;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::model::Record;

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    Name,
    Type,
    Date,
    Size,
}

impl SortColumn {
    /// Columns in display order.
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Name,
        SortColumn::Type,
        SortColumn::Date,
        SortColumn::Size,
    ];

    /// Parse a column name as used on the command line.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SortColumn::Name),
            "type" => Some(SortColumn::Type),
            "date" | "added" => Some(SortColumn::Date),
            "size" => Some(SortColumn::Size),
            _ => None,
        }
    }

    /// Header label.
    pub fn label(self) -> &'static str {
        match self {
            SortColumn::Name => "Name",
            SortColumn::Type => "Type",
            SortColumn::Date => "Added",
            SortColumn::Size => "Size",
        }
    }

    /// Position in [`SortColumn::ALL`].
    pub fn index(self) -> usize {
        match self {
            SortColumn::Name => 0,
            SortColumn::Type => 1,
            SortColumn::Date => 2,
            SortColumn::Size => 3,
        }
    }
}

/// Sort direction in natural order: ascending is A→Z, oldest first,
/// fewest children first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Direction used for the initial load and after every filter change.
    pub const DEFAULT: SortDirection = SortDirection::Ascending;

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header arrow glyph.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Tri-state sort indicator for a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AriaSort {
    Ascending,
    Descending,
    None,
}

impl From<SortDirection> for AriaSort {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => AriaSort::Ascending,
            SortDirection::Descending => AriaSort::Descending,
        }
    }
}

/// Which column is active plus the last direction used for each column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    active: Option<SortColumn>,
    directions: [SortDirection; 4],
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            active: None,
            directions: [SortDirection::Descending; 4],
        }
    }
}

impl SortState {
    pub fn active(&self) -> Option<SortColumn> {
        self.active
    }

    /// Last direction used for `column` (or the initial default).
    pub fn direction(&self, column: SortColumn) -> SortDirection {
        self.directions[column.index()]
    }

    /// Direction the next toggle of `column` will apply.
    pub fn next_direction(&self, column: SortColumn) -> SortDirection {
        self.direction(column).reversed()
    }

    /// Make `column` the only active column and remember `direction` for it.
    pub fn mark(&mut self, column: SortColumn, direction: SortDirection) {
        self.active = Some(column);
        self.directions[column.index()] = direction;
    }

    pub fn aria_sort(&self, column: SortColumn) -> AriaSort {
        if self.active == Some(column) {
            self.direction(column).into()
        } else {
            AriaSort::None
        }
    }
}

/// Primary collation key: decomposed, combining marks dropped, lowercased.
fn base_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Locale-aware string order. Accents and case are ignored first, then
/// unaccented before accented, then lowercase before uppercase.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_key(a)
        .cmp(&base_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Present values in `direction`, missing values last in either direction.
fn cmp_present_first<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compare two records under the policy for `column`.
pub fn compare(a: &Record, b: &Record, column: SortColumn, direction: SortDirection) -> Ordering {
    match column {
        SortColumn::Name => direction.apply(locale_cmp(a.name(), b.name())),
        SortColumn::Type => match (a.is_folder(), b.is_folder()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (true, true) => Ordering::Equal,
            (false, false) => direction.apply(locale_cmp(a.kind(), b.kind())),
        },
        SortColumn::Date => cmp_present_first(a.added(), b.added(), direction),
        SortColumn::Size => cmp_present_first(a.size(), b.size(), direction),
    }
}

/// Return a new, stably sorted copy of `records`.
pub fn sorted(records: &[Record], column: SortColumn, direction: SortDirection) -> Vec<Record> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| compare(a, b, column, direction));
    out
}
