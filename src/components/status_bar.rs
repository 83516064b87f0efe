use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

const NORMAL_HINTS: &str = " /:filter  1-4:sort  r:reload  q:quit ";
const FILTER_HINTS: &str = " enter:keep  esc:clear  ^u:erase ";

/// Status bar widget: data source, row info, key hints or a status message.
pub struct StatusBarWidget<'a> {
    source: &'a str,
    row_info: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
    filtering: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(source: &'a str, row_info: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            source,
            row_info,
            theme,
            status_message: None,
            is_error: false,
            filtering: false,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }

    pub fn filtering(mut self, filtering: bool) -> Self {
        self.filtering = filtering;
        self
    }
}

/// Keep at most `width` characters, marking the cut with a leading ellipsis.
fn tail(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let skip = count - (width - 1);
    std::iter::once('…').chain(text.chars().skip(skip)).collect()
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        buf.set_style(
            Rect::new(area.x, area.y, area.width, 1),
            Style::default().bg(self.theme.status_bg),
        );

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_fg)
            } else {
                Style::default()
                    .bg(self.theme.status_bg)
                    .fg(self.theme.success_fg)
            };
            let display = format!("{:<width$}", tail(msg, width), width = width);
            buf.set_line(
                area.x,
                area.y,
                &Line::from(Span::styled(display, style)),
                area.width,
            );
            return;
        }

        // Normal bar: [source] [row info] [key hints]
        let hints = if self.filtering {
            FILTER_HINTS
        } else {
            NORMAL_HINTS
        };
        let hints_len = hints.chars().count();
        let remaining = width.saturating_sub(hints_len);

        let info = tail(self.row_info, remaining);
        let info_len = info.chars().count();
        let source_budget = remaining.saturating_sub(info_len).saturating_sub(1);
        let source = tail(self.source, source_budget);
        let gap = remaining
            .saturating_sub(source.chars().count())
            .saturating_sub(info_len);

        let spans = vec![
            Span::styled(source, Style::default().fg(self.theme.status_fg)),
            Span::raw(" ".repeat(gap)),
            Span::styled(
                info,
                Style::default()
                    .fg(self.theme.accent_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                hints,
                Style::default()
                    .fg(self.theme.dim_fg)
                    .add_modifier(Modifier::DIM),
            ),
        ];
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    fn content(buf: &Buffer, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn test_tail_truncation() {
        assert_eq!(tail("abcdef", 10), "abcdef");
        assert_eq!(tail("abcdef", 4), "…def");
        assert_eq!(tail("abcdef", 0), "");
    }

    #[test]
    fn test_status_message_success() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new("sample", "16 of 16", &tc)
            .status_message("Sorted by Size ▲", false)
            .render(area, &mut buf);

        assert!(content(&buf, 80).contains("Sorted by Size"));
        assert_eq!(buf.cell((0, 0)).unwrap().fg, tc.success_fg);
    }

    #[test]
    fn test_status_message_error() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new("sample", "info", &tc)
            .status_message("Reload failed", true)
            .render(area, &mut buf);

        let cell = buf.cell((0, 0)).unwrap();
        assert_eq!(cell.bg, tc.error_fg);
        assert_eq!(cell.fg, tc.status_fg);
    }

    #[test]
    fn test_normal_bar_rendering() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new("data/dashboard.json", "1 of 16 · Statements", &tc)
            .render(area, &mut buf);

        let text = content(&buf, 100);
        assert!(text.contains("data/dashboard.json"));
        assert!(text.contains("1 of 16"));
        assert!(text.contains("/:filter"));
        assert!(text.contains("q:quit"));
    }

    #[test]
    fn test_filter_mode_hints() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new("sample", "0 of 16", &tc)
            .filtering(true)
            .render(area, &mut buf);
        assert!(content(&buf, 100).contains("esc:clear"));
    }

    #[test]
    fn test_zero_area_does_not_panic() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new("x", "y", &tc).render(area, &mut buf);
    }
}
