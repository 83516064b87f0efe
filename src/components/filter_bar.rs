use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::app::FilterInput;
use crate::theme::ThemeColors;

/// Bordered filter input shown above the table.
pub struct FilterBarWidget<'a> {
    input: &'a FilterInput,
    theme: &'a ThemeColors,
    focused: bool,
    match_count: usize,
    total: usize,
}

impl<'a> FilterBarWidget<'a> {
    pub fn new(input: &'a FilterInput, theme: &'a ThemeColors) -> Self {
        Self {
            input,
            theme,
            focused: false,
            match_count: 0,
            total: 0,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn counts(mut self, match_count: usize, total: usize) -> Self {
        self.match_count = match_count;
        self.total = total;
        self
    }
}

impl<'a> Widget for FilterBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let border = if self.focused {
            self.theme.border_focused_fg
        } else {
            self.theme.border_fg
        };
        let block = Block::default()
            .title(" Filter ")
            .title_bottom(
                Line::from(format!(" {}/{} ", self.match_count, self.total)).right_aligned(),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let text = &self.input.text;
        let text_style = Style::default().fg(self.theme.filter_fg);

        let spans = if !self.focused {
            if text.is_empty() {
                vec![Span::styled(
                    "Press / to filter by name",
                    Style::default()
                        .fg(self.theme.dim_fg)
                        .add_modifier(Modifier::ITALIC),
                )]
            } else {
                vec![Span::styled(text.as_str(), text_style)]
            }
        } else {
            let pos = self.input.cursor_position.min(text.len());
            let (before, rest) = text.split_at(pos);
            let (cursor, after) = match rest.chars().next() {
                Some(c) => rest.split_at(c.len_utf8()),
                None => (" ", ""),
            };
            let cursor_style = Style::default()
                .bg(self.theme.filter_fg)
                .fg(self.theme.status_bg)
                .add_modifier(Modifier::BOLD);
            vec![
                Span::styled(before, text_style),
                Span::styled(cursor, cursor_style),
                Span::styled(after, text_style),
            ]
        };

        buf.set_line(inner.x, inner.y, &Line::from(spans), inner.width);
    }
}
