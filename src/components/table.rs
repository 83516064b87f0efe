use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::table::{AriaSort, SortColumn, TableView};
use crate::theme::ThemeColors;

/// Rows taken by the header line.
pub const HEADER_HEIGHT: u16 = 1;

/// Horizontal span `(x, width)` of each column inside `area`.
///
/// Columns share the width equally; the last one absorbs the remainder.
pub fn column_bounds(area: Rect) -> [(u16, u16); 4] {
    let each = area.width / 4;
    let mut bounds = [(0, 0); 4];
    for (i, bound) in bounds.iter_mut().enumerate() {
        let x = area.x + each * i as u16;
        let width = if i == 3 {
            area.width - each * 3
        } else {
            each
        };
        *bound = (x, width);
    }
    bounds
}

/// The header column under screen position `(x, y)`, if any.
pub fn header_column_at(area: Rect, x: u16, y: u16) -> Option<SortColumn> {
    if area.width == 0 || area.height == 0 || y != area.y {
        return None;
    }
    column_bounds(area)
        .iter()
        .position(|&(cx, cw)| x >= cx && x < cx + cw)
        .map(|i| SortColumn::ALL[i])
}

/// Index into the visible rows for a click at screen row `y`.
pub fn row_index_at(area: Rect, y: u16, scroll_offset: usize) -> Option<usize> {
    let body_top = area.y + HEADER_HEIGHT;
    if y < body_top || y >= area.y + area.height {
        return None;
    }
    Some(scroll_offset + (y - body_top) as usize)
}

/// Number of body rows that fit below the header.
pub fn body_height(area: Rect) -> usize {
    area.height.saturating_sub(HEADER_HEIGHT) as usize
}

/// Pad or truncate `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        if width == 0 {
            return String::new();
        }
        let mut out: String = text.chars().take(width - 1).collect();
        out.push('…');
        out
    } else {
        format!("{text:<width$}")
    }
}

/// Sortable file table: header with sort arrows, zebra-striped body.
pub struct TableWidget<'a> {
    view: &'a TableView,
    theme: &'a ThemeColors,
    selected_index: usize,
    scroll_offset: usize,
    zebra: bool,
}

impl<'a> TableWidget<'a> {
    pub fn new(view: &'a TableView, theme: &'a ThemeColors) -> Self {
        Self {
            view,
            theme,
            selected_index: 0,
            scroll_offset: 0,
            zebra: true,
        }
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn scroll(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn zebra(mut self, zebra: bool) -> Self {
        self.zebra = zebra;
        self
    }

    fn header_label(&self, column: SortColumn) -> String {
        match self.view.aria_sort(column) {
            AriaSort::None => format!(" {}", column.label()),
            _ => format!(
                " {} {}",
                column.label(),
                self.view.sort_state().direction(column).arrow()
            ),
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let base = Style::default()
            .bg(self.theme.header_bg)
            .fg(self.theme.header_fg)
            .add_modifier(Modifier::BOLD);
        buf.set_style(Rect::new(area.x, area.y, area.width, 1), base);

        for (column, (x, width)) in SortColumn::ALL.into_iter().zip(column_bounds(area)) {
            let style = if self.view.aria_sort(column) == AriaSort::None {
                base
            } else {
                base.fg(self.theme.accent_fg)
            };
            let label = fit(&self.header_label(column), width as usize);
            buf.set_stringn(x, area.y, label, width as usize, style);
        }
    }
}

impl<'a> Widget for TableWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        self.render_header(area, buf);

        let visible_height = body_height(area);
        if visible_height == 0 {
            return;
        }

        let rows = self.view.row_views();
        if rows.is_empty() {
            let style = Style::default()
                .fg(self.theme.dim_fg)
                .add_modifier(Modifier::ITALIC);
            buf.set_stringn(
                area.x + 1,
                area.y + HEADER_HEIGHT,
                "No matching files",
                area.width.saturating_sub(1) as usize,
                style,
            );
            return;
        }

        let bounds = column_bounds(area);
        let records = self.view.rows();

        for (i, (idx, row)) in rows
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_height)
            .enumerate()
        {
            let y = area.y + HEADER_HEIGHT + i as u16;
            let is_folder = records.get(idx).is_some_and(|r| r.is_folder());

            let mut row_style = Style::default()
                .bg(self.theme.table_bg)
                .fg(self.theme.table_fg);
            if self.zebra && idx % 2 == 1 {
                row_style = row_style.bg(self.theme.row_alt_bg);
            }
            if is_folder {
                row_style = row_style
                    .fg(self.theme.folder_fg)
                    .add_modifier(Modifier::BOLD);
            }
            if idx == self.selected_index {
                row_style = row_style
                    .bg(self.theme.selected_bg)
                    .fg(self.theme.selected_fg)
                    .add_modifier(Modifier::BOLD);
            }
            buf.set_style(Rect::new(area.x, y, area.width, 1), row_style);

            for ((cell, &placeholder), &(x, width)) in
                row.cells.iter().zip(&row.placeholders).zip(bounds.iter())
            {
                let style = if placeholder {
                    row_style
                        .fg(self.theme.placeholder_fg)
                        .add_modifier(Modifier::ITALIC)
                } else {
                    row_style
                };
                let text = fit(&format!(" {cell}"), width as usize);
                buf.set_stringn(x, y, text, width as usize, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{sample_records, Record};
    use crate::theme;

    fn line(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    fn render(view: &TableView, area: Rect) -> Buffer {
        let tc = theme::dark_theme();
        let mut buf = Buffer::empty(area);
        TableWidget::new(view, &tc).render(area, &mut buf);
        buf
    }

    #[test]
    fn column_bounds_cover_width() {
        let bounds = column_bounds(Rect::new(2, 0, 43, 5));
        assert_eq!(bounds[0], (2, 10));
        assert_eq!(bounds[1], (12, 10));
        assert_eq!(bounds[3], (32, 13));
    }

    #[test]
    fn header_hit_testing() {
        let area = Rect::new(0, 5, 40, 10);
        assert_eq!(header_column_at(area, 0, 5), Some(SortColumn::Name));
        assert_eq!(header_column_at(area, 15, 5), Some(SortColumn::Type));
        assert_eq!(header_column_at(area, 39, 5), Some(SortColumn::Size));
        assert_eq!(header_column_at(area, 40, 5), None);
        assert_eq!(header_column_at(area, 15, 6), None);
    }

    #[test]
    fn row_hit_testing_accounts_for_scroll() {
        let area = Rect::new(0, 5, 40, 10);
        assert_eq!(row_index_at(area, 5, 0), None);
        assert_eq!(row_index_at(area, 6, 0), Some(0));
        assert_eq!(row_index_at(area, 8, 4), Some(6));
        assert_eq!(row_index_at(area, 15, 0), None);
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn renders_header_with_active_arrow() {
        let view = TableView::new(sample_records().unwrap());
        let buf = render(&view, Rect::new(0, 0, 80, 5));
        let header = line(&buf, 0, 80);
        assert!(header.contains("Name ▲"));
        assert!(header.contains("Type"));
        assert!(!header.contains("Type ▲"));
        assert!(header.contains("Added"));
        assert!(header.contains("Size"));
    }

    #[test]
    fn first_body_row_is_first_visible_record() {
        let view = TableView::new(sample_records().unwrap());
        let buf = render(&view, Rect::new(0, 0, 80, 5));
        let row = line(&buf, 1, 80);
        assert!(row.contains("Amplified"));
        assert!(row.contains("pdf"));
        assert!(row.contains("2022-02-07"));
        assert!(row.contains("Missing size"));
    }

    #[test]
    fn only_fallback_cells_are_italic() {
        let view = TableView::new(vec![Record::file("pdf", "Missing Date", None)]);
        let buf = render(&view, Rect::new(0, 0, 80, 3));
        // Name cell holds real text; the Added cell (x 40..60) is a fallback.
        assert!(line(&buf, 1, 80).contains("Missing Date"));
        let name_cell = buf.cell((2, 1)).unwrap();
        assert!(!name_cell.modifier.contains(Modifier::ITALIC));
        let added_cell = buf.cell((42, 1)).unwrap();
        assert!(added_cell.modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn descending_arrow_after_second_toggle() {
        let mut view = TableView::new(sample_records().unwrap());
        view.toggle_sort(SortColumn::Size);
        view.toggle_sort(SortColumn::Size);
        let buf = render(&view, Rect::new(0, 0, 80, 5));
        assert!(line(&buf, 0, 80).contains("Size ▼"));
        assert!(line(&buf, 1, 80).contains("Misc"));
    }

    #[test]
    fn zebra_rows_alternate_background() {
        let view = TableView::new(vec![
            Record::file("pdf", "a", Some("2020-01-01")),
            Record::file("pdf", "b", Some("2020-01-01")),
            Record::file("pdf", "c", Some("2020-01-01")),
        ]);
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        // Selection parked off-screen so stripes are visible on every row.
        TableWidget::new(&view, &tc)
            .selected(usize::MAX)
            .render(area, &mut buf);

        assert_eq!(buf.cell((0, 1)).unwrap().bg, tc.table_bg);
        assert_eq!(buf.cell((0, 2)).unwrap().bg, tc.row_alt_bg);
        assert_eq!(buf.cell((0, 3)).unwrap().bg, tc.table_bg);
    }

    #[test]
    fn selected_row_is_highlighted() {
        let view = TableView::new(sample_records().unwrap());
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        TableWidget::new(&view, &tc)
            .selected(1)
            .render(area, &mut buf);
        assert_eq!(buf.cell((0, 2)).unwrap().bg, tc.selected_bg);
    }

    #[test]
    fn scroll_offset_skips_rows() {
        let view = TableView::new(sample_records().unwrap());
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 80, 3);
        let mut buf = Buffer::empty(area);
        TableWidget::new(&view, &tc)
            .scroll(15)
            .selected(15)
            .render(area, &mut buf);
        assert!(line(&buf, 1, 80).contains("Zen"));
    }

    #[test]
    fn empty_view_shows_placeholder_line() {
        let mut view = TableView::new(sample_records().unwrap());
        view.set_filter("no such file");
        let buf = render(&view, Rect::new(0, 0, 40, 3));
        assert!(line(&buf, 1, 40).contains("No matching files"));
    }

    #[test]
    fn zero_area_does_not_panic() {
        let view = TableView::new(Vec::new());
        let _ = render(&view, Rect::new(0, 0, 0, 0));
    }
}
