use serde::Serialize;
use tracing::debug;

use crate::model::Record;
use crate::table::filter::filter;
use crate::table::sort::{sorted, AriaSort, SortColumn, SortDirection, SortState};

/// Placeholder shown for an empty name.
pub const MISSING_NAME: &str = "Missing Name";
/// Placeholder shown for an empty type.
pub const MISSING_TYPE: &str = "Missing Type";
/// Placeholder shown when a record has no date.
pub const MISSING_DATE: &str = "Missing Date";
/// Placeholder shown when a record has no children collection.
pub const MISSING_SIZE: &str = "Missing size";

/// Events that change the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// New filter text. Always resets the order to name, default direction.
    SetFilter(String),
    /// Sort the visible rows explicitly.
    SortBy(SortColumn, SortDirection),
    /// Header activation: flip the remembered direction for the column.
    ToggleSort(SortColumn),
    /// Swap in a new dataset, keeping the current filter.
    ReplaceRecords(Vec<Record>),
}

/// A rendered row with stable identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// `"{name}-{index}"`.
    pub key: String,
    /// `"cell-{name}-{index}"`, identifies the name cell.
    pub cell_id: String,
    /// Display text for Name, Type, Added and Size, in that order.
    pub cells: [String; 4],
    /// Which cells hold a fallback instead of record data.
    #[serde(skip)]
    pub placeholders: [bool; 4],
}

impl RowView {
    pub fn new(record: &Record, index: usize) -> Self {
        let name = record.name();
        let kind = record.kind();
        let added = record.added();
        let size = record.size();
        Self {
            key: format!("{name}-{index}"),
            cell_id: format!("cell-{name}-{index}"),
            cells: [
                (if name.is_empty() { MISSING_NAME } else { name }).to_string(),
                (if kind.is_empty() { MISSING_TYPE } else { kind }).to_string(),
                added.unwrap_or(MISSING_DATE).to_string(),
                size.map(|n| n.to_string())
                    .unwrap_or_else(|| MISSING_SIZE.to_string()),
            ],
            placeholders: [
                name.is_empty(),
                kind.is_empty(),
                added.is_none(),
                size.is_none(),
            ],
        }
    }
}

/// Sort indicator for one header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnState {
    pub column: SortColumn,
    pub label: &'static str,
    pub aria_sort: AriaSort,
}

/// Everything a renderer needs: query, header states and rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    pub query: String,
    pub columns: Vec<ColumnState>,
    pub rows: Vec<RowView>,
}

/// Full dataset, filter query, sort state and the derived visible rows.
#[derive(Debug, Clone)]
pub struct TableView {
    records: Vec<Record>,
    query: String,
    rows: Vec<Record>,
    sort: SortState,
}

impl TableView {
    /// Build the view with every record visible, sorted by name.
    pub fn new(records: Vec<Record>) -> Self {
        let mut view = Self {
            rows: Vec::new(),
            records,
            query: String::new(),
            sort: SortState::default(),
        };
        view.refilter();
        view
    }

    /// The single update entry point.
    pub fn apply(&mut self, action: TableAction) {
        match action {
            TableAction::SetFilter(query) => {
                if query != self.query {
                    self.query = query;
                    self.refilter();
                }
            }
            TableAction::SortBy(column, direction) => self.sort_rows(column, direction),
            TableAction::ToggleSort(column) => {
                let direction = self.sort.next_direction(column);
                self.sort_rows(column, direction);
            }
            TableAction::ReplaceRecords(records) => {
                self.records = records;
                self.refilter();
            }
        }
    }

    pub fn set_filter(&mut self, query: &str) {
        self.apply(TableAction::SetFilter(query.to_string()));
    }

    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.apply(TableAction::ToggleSort(column));
    }

    pub fn sort_by(&mut self, column: SortColumn, direction: SortDirection) {
        self.apply(TableAction::SortBy(column, direction));
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Visible rows in display order.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn aria_sort(&self, column: SortColumn) -> AriaSort {
        self.sort.aria_sort(column)
    }

    pub fn row_views(&self) -> Vec<RowView> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, record)| RowView::new(record, i))
            .collect()
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            query: self.query.clone(),
            columns: SortColumn::ALL
                .into_iter()
                .map(|column| ColumnState {
                    column,
                    label: column.label(),
                    aria_sort: self.aria_sort(column),
                })
                .collect(),
            rows: self.row_views(),
        }
    }

    fn refilter(&mut self) {
        let visible = filter(&self.records, &self.query);
        debug!(
            query = %self.query,
            total = self.records.len(),
            visible = visible.len(),
            "filter applied"
        );
        self.rows = visible;
        self.sort_rows(SortColumn::Name, SortDirection::DEFAULT);
    }

    fn sort_rows(&mut self, column: SortColumn, direction: SortDirection) {
        self.rows = sorted(&self.rows, column, direction);
        self.sort.mark(column, direction);
        debug!(?column, ?direction, rows = self.rows.len(), "sort applied");
    }
}
