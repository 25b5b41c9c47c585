use crate::ui::{Palette, Theme};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

const ORBIT: [&str; 8] = ["◐", "◓", "◑", "◒", "◐", "◓", "◑", "◒"];

/// Glyph for the header's orbit indicator at the given UI tick.
pub fn orbit_glyph(frame: usize) -> &'static str {
    ORBIT[frame % ORBIT.len()]
}

pub struct FactTickerWidget<'a> {
    fact: &'a str,
    palette: Palette,
}

impl<'a> FactTickerWidget<'a> {
    pub fn new(fact: &'a str, palette: Palette) -> Self {
        Self { fact, palette }
    }
}

impl Widget for FactTickerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(self.palette.border());

        Paragraph::new(Line::from(vec![
            Span::styled("✦ ", self.palette.title()),
            Span::styled(self.fact, Theme::dim()),
        ]))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block)
        .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_wraps() {
        assert_eq!(orbit_glyph(0), orbit_glyph(8));
        assert_ne!(orbit_glyph(0), orbit_glyph(1));
    }
}
