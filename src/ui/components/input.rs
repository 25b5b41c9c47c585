use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Single-line search box drawn as a popup. The cursor always sits at the end.
pub struct SearchInput<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
}

impl<'a> SearchInput<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(Span::styled(self.label, Theme::title()))
            .title_bottom(Line::from(vec![
                Span::styled("[Enter]", Theme::nav_key()),
                Span::styled("Load ", Theme::nav_label()),
                Span::styled("[Esc]", Theme::nav_key()),
                Span::styled("Cancel", Theme::nav_label()),
            ]))
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.value.is_empty() {
            Line::from(vec![
                Span::styled(" ", Theme::selected()),
                Span::styled(self.placeholder, Theme::dim()),
            ])
        } else {
            Line::from(vec![
                Span::styled(self.value, Theme::normal()),
                Span::styled(" ", Theme::selected()),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16, from: u16, to: u16) -> String {
        (from..to).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn shows_placeholder_when_empty() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        SearchInput::new("Search", "")
            .placeholder("City name")
            .render(area, &mut buf);
        assert_eq!(row(&buf, 1, 2, 11), "City name");
    }

    #[test]
    fn shows_typed_value() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        SearchInput::new("Search", "Lima")
            .placeholder("City name")
            .render(area, &mut buf);
        assert_eq!(row(&buf, 1, 1, 5), "Lima");
    }
}
