//! In-memory filter and sort engine behind the file table.

pub mod filter;
pub mod sort;
pub mod view;

pub use sort::{AriaSort, SortColumn, SortDirection};
pub use view::TableView;
