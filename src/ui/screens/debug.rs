use crate::models::{Coordinates, Snapshot};
use crate::ui::{centered_rect, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Ctrl+D overlay: the raw snapshot as pretty JSON.
pub struct DebugOverlay<'a> {
    snapshot: Option<&'a Snapshot>,
    last_coordinates: Option<Coordinates>,
    scroll: u16,
}

impl<'a> DebugOverlay<'a> {
    pub fn new(snapshot: Option<&'a Snapshot>, last_coordinates: Option<Coordinates>) -> Self {
        Self {
            snapshot,
            last_coordinates,
            scroll: 0,
        }
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }
}

pub fn debug_text(snapshot: Option<&Snapshot>, last_coordinates: Option<Coordinates>) -> String {
    let coords = last_coordinates
        .map(|c| c.to_string())
        .unwrap_or_else(|| "none".to_string());

    let body = match snapshot {
        Some(s) => serde_json::to_string_pretty(s)
            .unwrap_or_else(|e| format!("<failed to serialize snapshot: {}>", e)),
        None => "null".to_string(),
    };

    format!("Last coordinates: {}\n\n{}", coords, body)
}

impl Widget for DebugOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(80, 80, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(Span::styled("Debug", Theme::title()))
            .title_bottom(Line::from(vec![
                Span::styled("[↑↓]", Theme::nav_key()),
                Span::styled("Scroll ", Theme::nav_label()),
                Span::styled("[^D]", Theme::nav_key()),
                Span::styled("Close", Theme::nav_label()),
            ]))
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());

        let text = debug_text(self.snapshot, self.last_coordinates);
        let lines: Vec<Line> = text.lines().map(|l| Line::from(l.to_string())).collect();

        Paragraph::new(lines)
            .style(Theme::normal())
            .block(block)
            .scroll((self.scroll, 0))
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::air_quality::test_air::flat;
    use crate::models::weather::test_weather::weather;
    use crate::models::Location;

    #[test]
    fn dump_contains_raw_fields_and_coordinates() {
        let snapshot = Snapshot::new(
            Location {
                name: "Quito".into(),
                country: "Ecuador".into(),
                coordinates: Coordinates::new(-0.18, -78.47),
            },
            weather(14.0, 3, 6.0, 11.0),
            flat(22.0),
        );

        let text = debug_text(Some(&snapshot), Some(Coordinates::new(-0.18, -78.47)));
        assert!(text.starts_with("Last coordinates: -0.1800, -78.4700"));
        assert!(text.contains("\"uv_index\""));
        assert!(text.contains("\"us_aqi\": 22.0"));
        assert!(text.contains("\"Quito\""));
    }

    #[test]
    fn dump_without_snapshot() {
        let text = debug_text(None, None);
        assert_eq!(text, "Last coordinates: none\n\nnull");
    }
}
