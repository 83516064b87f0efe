use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::Result;
use crate::model::{self, Record};
use crate::table::view::TableAction;
use crate::table::{SortColumn, TableView};
use crate::theme::{resolve_theme, ThemeColors};

/// Where the records came from, so they can be reloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// The built-in dashboard dataset.
    Sample,
    File(PathBuf),
}

impl DataSource {
    pub fn load(&self) -> Result<Vec<Record>> {
        match self {
            DataSource::Sample => model::sample_records(),
            DataSource::File(path) => model::load_records(path),
        }
    }

    pub fn label(&self) -> String {
        match self {
            DataSource::Sample => "sample dashboard".to_string(),
            DataSource::File(path) => path.display().to_string(),
        }
    }
}

/// Application mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Normal,
    /// Keystrokes edit the filter text.
    Filtering,
}

/// Text and cursor (byte offset) of the filter bar.
#[derive(Debug, Default, Clone)]
pub struct FilterInput {
    pub text: String,
    pub cursor_position: usize,
}

/// A transient message for the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub created: Instant,
}

/// Screen areas from the last render, used for mouse hit testing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutRegions {
    pub filter: Rect,
    pub table: Rect,
}

/// Main application state.
pub struct App {
    pub view: TableView,
    pub source: DataSource,
    pub mode: AppMode,
    pub filter_input: FilterInput,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub status_message: Option<StatusMessage>,
    pub status_timeout: Duration,
    pub theme: ThemeColors,
    pub caption: String,
    pub zebra: bool,
    pub regions: LayoutRegions,
    pub should_quit: bool,
}

impl App {
    pub fn new(view: TableView, source: DataSource, config: &AppConfig) -> Self {
        let filter_input = FilterInput {
            cursor_position: view.query().len(),
            text: view.query().to_string(),
        };
        Self {
            view,
            source,
            mode: AppMode::Normal,
            filter_input,
            selected_index: 0,
            scroll_offset: 0,
            status_message: None,
            status_timeout: Duration::from_millis(config.status_timeout_ms()),
            theme: resolve_theme(&config.theme),
            caption: config.caption().to_string(),
            zebra: config.zebra(),
            regions: LayoutRegions::default(),
            should_quit: false,
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ── Filter bar ───────────────────────────────────────────────────────────

    pub fn enter_filter_mode(&mut self) {
        self.mode = AppMode::Filtering;
        self.filter_input.cursor_position = self.filter_input.text.len();
    }

    /// Leave filter mode; `clear` also empties the query.
    pub fn leave_filter_mode(&mut self, clear: bool) {
        self.mode = AppMode::Normal;
        if clear {
            self.filter_clear();
        }
    }

    /// Insert a character at the cursor and re-filter.
    pub fn filter_input_char(&mut self, c: char) {
        self.filter_input
            .text
            .insert(self.filter_input.cursor_position, c);
        self.filter_input.cursor_position += c.len_utf8();
        self.apply_filter();
    }

    /// Delete the character before the cursor (backspace).
    pub fn filter_delete_char(&mut self) {
        let pos = self.filter_input.cursor_position;
        if let Some(prev) = self.filter_input.text[..pos].chars().next_back() {
            self.filter_input.cursor_position -= prev.len_utf8();
            self.filter_input
                .text
                .remove(self.filter_input.cursor_position);
            self.apply_filter();
        }
    }

    /// Delete the character under the cursor.
    pub fn filter_delete_forward(&mut self) {
        if self.filter_input.cursor_position < self.filter_input.text.len() {
            self.filter_input
                .text
                .remove(self.filter_input.cursor_position);
            self.apply_filter();
        }
    }

    pub fn filter_move_cursor_left(&mut self) {
        let pos = self.filter_input.cursor_position;
        if let Some(prev) = self.filter_input.text[..pos].chars().next_back() {
            self.filter_input.cursor_position -= prev.len_utf8();
        }
    }

    pub fn filter_move_cursor_right(&mut self) {
        let pos = self.filter_input.cursor_position;
        if let Some(next) = self.filter_input.text[pos..].chars().next() {
            self.filter_input.cursor_position += next.len_utf8();
        }
    }

    pub fn filter_cursor_home(&mut self) {
        self.filter_input.cursor_position = 0;
    }

    pub fn filter_cursor_end(&mut self) {
        self.filter_input.cursor_position = self.filter_input.text.len();
    }

    pub fn filter_clear(&mut self) {
        self.filter_input = FilterInput::default();
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        let before = self.view.query().to_string();
        self.view
            .apply(TableAction::SetFilter(self.filter_input.text.clone()));
        if before != self.view.query() {
            self.selected_index = 0;
            self.scroll_offset = 0;
        }
    }

    // ── Sorting and data ─────────────────────────────────────────────────────

    /// Header activation for `column`. The selected record stays selected.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        let selected = self.selected_record().cloned();
        self.view.toggle_sort(column);
        if let Some(index) =
            selected.and_then(|record| self.view.rows().iter().position(|r| *r == record))
        {
            self.selected_index = index;
        }
        let direction = self.view.sort_state().direction(column);
        self.set_status_message(
            format!("Sorted by {} {}", column.label(), direction.arrow()),
            false,
        );
    }

    /// Re-read the data source; on failure the current rows are kept.
    pub fn reload(&mut self) {
        match self.source.load() {
            Ok(records) => {
                let count = records.len();
                info!(source = %self.source.label(), count, "records reloaded");
                self.view.apply(TableAction::ReplaceRecords(records));
                self.clamp_selection();
                self.set_status_message(format!("Reloaded {count} records"), false);
            }
            Err(e) => {
                warn!(source = %self.source.label(), error = %e, "reload failed");
                self.set_status_message(format!("Reload failed: {e}"), true);
            }
        }
    }

    // ── Selection ────────────────────────────────────────────────────────────

    pub fn selected_record(&self) -> Option<&Record> {
        self.view.rows().get(self.selected_index)
    }

    pub fn select_next(&mut self) {
        let len = self.view.rows().len();
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.view.rows().len().saturating_sub(1);
    }

    pub fn page_down(&mut self, page: usize) {
        self.selected_index += page.max(1);
        self.clamp_selection();
    }

    pub fn page_up(&mut self, page: usize) {
        self.selected_index = self.selected_index.saturating_sub(page.max(1));
    }

    /// Select a visible row by index, ignoring out-of-range clicks.
    pub fn select_index(&mut self, index: usize) {
        if index < self.view.rows().len() {
            self.selected_index = index;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.view.rows().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Update the scroll offset to ensure the selected row is visible.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index - visible_height + 1;
        }
    }

    // ── Status bar ───────────────────────────────────────────────────────────

    pub fn set_status_message(&mut self, text: String, is_error: bool) {
        self.status_message = Some(StatusMessage {
            text,
            is_error,
            created: Instant::now(),
        });
    }

    /// Drop the status message once it has outlived the configured timeout.
    pub fn clear_expired_status(&mut self) {
        if let Some(msg) = &self.status_message {
            if msg.created.elapsed() > self.status_timeout {
                self.status_message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{AriaSort, SortDirection};

    fn setup_app() -> App {
        let view = TableView::new(model::sample_records().unwrap());
        App::new(view, DataSource::Sample, &AppConfig::default())
    }

    fn type_query(app: &mut App, query: &str) {
        app.enter_filter_mode();
        for c in query.chars() {
            app.filter_input_char(c);
        }
    }

    #[test]
    fn new_app_uses_config_defaults() {
        let app = setup_app();
        assert_eq!(app.caption, "Files");
        assert!(app.zebra);
        assert_eq!(app.status_timeout, Duration::from_millis(3000));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.selected_record().unwrap().name(), "Amplified");
    }

    #[test]
    fn typing_filters_rows() {
        let mut app = setup_app();
        type_query(&mut app, "State");
        assert_eq!(app.mode, AppMode::Filtering);
        assert_eq!(app.view.rows().len(), 1);
        assert_eq!(app.view.rows()[0].name(), "Statements");
    }

    #[test]
    fn filter_edit_resets_selection() {
        let mut app = setup_app();
        app.select_last();
        type_query(&mut app, "p");
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn backspace_widens_results() {
        let mut app = setup_app();
        type_query(&mut app, "Statex");
        assert!(app.view.rows().is_empty());
        app.filter_delete_char();
        assert_eq!(app.view.rows().len(), 1);
        assert_eq!(app.filter_input.text, "State");
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut app = setup_app();
        type_query(&mut app, "ab");
        app.filter_cursor_home();
        app.filter_delete_char();
        assert_eq!(app.filter_input.text, "ab");
    }

    #[test]
    fn cursor_editing_handles_multibyte() {
        let mut app = setup_app();
        type_query(&mut app, "né");
        app.filter_move_cursor_left();
        assert_eq!(app.filter_input.cursor_position, 1);
        app.filter_input_char('x');
        assert_eq!(app.filter_input.text, "nxé");
        app.filter_move_cursor_right();
        app.filter_move_cursor_right();
        assert_eq!(app.filter_input.cursor_position, app.filter_input.text.len());
        app.filter_cursor_home();
        app.filter_delete_forward();
        assert_eq!(app.filter_input.text, "xé");
    }

    #[test]
    fn escape_clears_and_leaves() {
        let mut app = setup_app();
        type_query(&mut app, "zen");
        app.leave_filter_mode(true);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.view.query(), "");
        assert_eq!(app.view.rows().len(), 16);
    }

    #[test]
    fn enter_keeps_query() {
        let mut app = setup_app();
        type_query(&mut app, "zen");
        app.leave_filter_mode(false);
        assert_eq!(app.view.query(), "zen");
        assert_eq!(app.view.rows().len(), 1);
    }

    #[test]
    fn toggle_sort_sets_status() {
        let mut app = setup_app();
        app.toggle_sort(SortColumn::Size);
        assert_eq!(app.view.aria_sort(SortColumn::Size), AriaSort::Ascending);
        let msg = app.status_message.as_ref().unwrap();
        assert!(msg.text.contains("Size"));
        assert!(!msg.is_error);
    }

    #[test]
    fn filtering_after_sort_returns_to_name_order() {
        let mut app = setup_app();
        app.toggle_sort(SortColumn::Date);
        type_query(&mut app, "o");
        assert_eq!(app.view.sort_state().active(), Some(SortColumn::Name));
        assert_eq!(
            app.view.sort_state().direction(SortColumn::Name),
            SortDirection::Ascending
        );
    }

    #[test]
    fn selection_moves_and_clamps() {
        let mut app = setup_app();
        app.select_previous();
        assert_eq!(app.selected_index, 0);
        app.select_next();
        assert_eq!(app.selected_index, 1);
        app.select_last();
        assert_eq!(app.selected_index, 15);
        app.select_next();
        assert_eq!(app.selected_index, 15);
        app.page_up(10);
        assert_eq!(app.selected_index, 5);
        app.page_down(100);
        assert_eq!(app.selected_index, 15);
        app.select_first();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn select_index_ignores_out_of_range() {
        let mut app = setup_app();
        app.select_index(3);
        assert_eq!(app.selected_index, 3);
        app.select_index(99);
        assert_eq!(app.selected_index, 3);
    }

    #[test]
    fn update_scroll_follows_selection() {
        let mut app = setup_app();
        app.select_last();
        app.update_scroll(5);
        assert_eq!(app.scroll_offset, 11);
        app.select_first();
        app.update_scroll(5);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn toggle_sort_keeps_selected_record() {
        let view = TableView::new(model::sample_records().unwrap());
        let mut app = App::new(view, DataSource::Sample, &AppConfig::default());
        app.select_index(4);
        let before = app.selected_record().unwrap().clone();

        app.toggle_sort(SortColumn::Size);
        app.toggle_sort(SortColumn::Size);

        assert_eq!(app.selected_record(), Some(&before));
        assert_eq!(app.view.rows()[app.selected_index], before);
    }

    #[test]
    fn reload_from_file_replaces_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("records.json");
        std::fs::write(&path, r#"[{"type": "pdf", "name": "Only", "added": "2020-01-01"}]"#)
            .expect("write");

        let view = TableView::new(model::sample_records().unwrap());
        let mut app = App::new(view, DataSource::File(path), &AppConfig::default());
        app.select_last();
        app.reload();

        assert_eq!(app.view.rows().len(), 1);
        assert_eq!(app.selected_index, 0);
        assert!(!app.status_message.as_ref().unwrap().is_error);
    }

    #[test]
    fn failed_reload_keeps_rows() {
        let view = TableView::new(model::sample_records().unwrap());
        let source = DataSource::File(PathBuf::from("/nonexistent/records.json"));
        let mut app = App::new(view, source, &AppConfig::default());
        app.reload();

        assert_eq!(app.view.rows().len(), 16);
        assert!(app.status_message.as_ref().unwrap().is_error);
    }

    #[test]
    fn clear_expired_status_keeps_recent() {
        let mut app = setup_app();
        app.set_status_message("hello".into(), false);
        app.clear_expired_status();
        assert!(app.status_message.is_some());
    }

    #[test]
    fn clear_expired_status_removes_old() {
        let mut app = setup_app();
        app.status_timeout = Duration::ZERO;
        app.status_message = Some(StatusMessage {
            text: "old".into(),
            is_error: false,
            created: Instant::now() - Duration::from_millis(10),
        });
        app.clear_expired_status();
        assert!(app.status_message.is_none());
    }
}
