use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, AppMode};
use crate::components::filter_bar::FilterBarWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::components::table::{body_height, TableWidget};

/// Render the dashboard: filter bar, table, status bar.
pub fn render(app: &mut App, frame: &mut Frame) {
    let [filter_area, table_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let filtering = app.mode == AppMode::Filtering;
    let visible = app.view.rows().len();
    let total = app.view.records().len();

    frame.render_widget(
        FilterBarWidget::new(&app.filter_input, &app.theme)
            .focused(filtering)
            .counts(visible, total),
        filter_area,
    );

    let block = Block::default()
        .title(format!(" {} ", app.caption))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if filtering {
            app.theme.border_fg
        } else {
            app.theme.border_focused_fg
        }));
    let table_inner = block.inner(table_area);
    frame.render_widget(block, table_area);

    app.regions.filter = filter_area;
    app.regions.table = table_inner;
    app.update_scroll(body_height(table_inner));

    frame.render_widget(
        TableWidget::new(&app.view, &app.theme)
            .selected(app.selected_index)
            .scroll(app.scroll_offset)
            .zebra(app.zebra),
        table_inner,
    );

    let source = app.source.label();
    let row_info = match app.selected_record() {
        Some(record) => format!(
            "{} of {} · {}",
            app.selected_index + 1,
            visible,
            record.name()
        ),
        None => format!("0 of {visible}"),
    };
    let mut status = StatusBarWidget::new(&source, &row_info, &app.theme).filtering(filtering);
    if let Some(msg) = &app.status_message {
        status = status.status_message(&msg.text, msg.is_error);
    }
    frame.render_widget(status, status_area);
}
