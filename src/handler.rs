use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{App, AppMode};
use crate::components::table::{body_height, header_column_at, row_index_at};
use crate::table::SortColumn;

/// Column bound to a sort key in normal mode.
fn sort_key_column(c: char) -> Option<SortColumn> {
    match c {
        '1' | 'n' => Some(SortColumn::Name),
        '2' | 't' => Some(SortColumn::Type),
        '3' | 'd' => Some(SortColumn::Date),
        '4' | 's' => Some(SortColumn::Size),
        _ => None,
    }
}

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }
    match app.mode {
        AppMode::Normal => handle_normal_key(app, key),
        AppMode::Filtering => handle_filter_key(app, key),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    let page = body_height(app.regions.table);
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('/') | KeyCode::Char('f') => app.enter_filter_mode(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::PageDown => app.page_down(page),
        KeyCode::PageUp => app.page_up(page),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Esc => app.filter_clear(),
        KeyCode::Char(c) => {
            if let Some(column) = sort_key_column(c) {
                app.toggle_sort(column);
            }
        }
        _ => {}
    }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.leave_filter_mode(false),
        KeyCode::Esc => app.leave_filter_mode(true),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.filter_clear(),
        KeyCode::Backspace => app.filter_delete_char(),
        KeyCode::Delete => app.filter_delete_forward(),
        KeyCode::Left => app.filter_move_cursor_left(),
        KeyCode::Right => app.filter_move_cursor_right(),
        KeyCode::Home => app.filter_cursor_home(),
        KeyCode::End => app.filter_cursor_end(),
        KeyCode::Down => app.select_next(),
        KeyCode::Up => app.select_previous(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.filter_input_char(c)
        }
        _ => {}
    }
}

/// Handle a mouse event against the regions recorded by the last render.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    let position = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.regions.filter.contains(position) {
                app.enter_filter_mode();
                return;
            }
            let table = app.regions.table;
            if !table.contains(position) {
                return;
            }
            if app.mode == AppMode::Filtering {
                app.leave_filter_mode(false);
            }
            if let Some(column) = header_column_at(table, mouse.column, mouse.row) {
                app.toggle_sort(column);
            } else if let Some(index) = row_index_at(table, mouse.row, app.scroll_offset) {
                app.select_index(index);
            }
        }
        MouseEventKind::ScrollDown => app.select_next(),
        MouseEventKind::ScrollUp => app.select_previous(),
        _ => {}
    }
}
