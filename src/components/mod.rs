pub mod filter_bar;
pub mod status_bar;
pub mod table;
