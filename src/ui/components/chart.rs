use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

/// Line chart of one hourly series. `points` are (hour offset, value).
pub struct SeriesChart<'a> {
    title: &'a str,
    unit: &'a str,
    points: &'a [(f64, f64)],
    x_labels: Vec<String>,
    color: Color,
    floor: Option<f64>,
}

impl<'a> SeriesChart<'a> {
    pub fn new(title: &'a str, unit: &'a str, points: &'a [(f64, f64)]) -> Self {
        Self {
            title,
            unit,
            points,
            x_labels: Vec::new(),
            color: Theme::ACCENT,
            floor: None,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn x_labels(mut self, labels: Vec<String>) -> Self {
        self.x_labels = labels;
        self
    }

    /// Pin the lower y bound, e.g. 0 for humidity or UV.
    pub fn floor(mut self, floor: f64) -> Self {
        self.floor = Some(floor);
        self
    }

    fn y_bounds(&self) -> [f64; 2] {
        let (mut lo, mut hi) = self
            .points
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), (_, y)| (lo.min(*y), hi.max(*y)));
        if let Some(floor) = self.floor {
            lo = floor;
        }
        if hi - lo < 1.0 {
            hi = lo + 1.0;
        }
        let pad = (hi - lo) * 0.1;
        let lo = if self.floor.is_some() { lo } else { lo - pad };
        [lo, hi + pad]
    }
}

impl Widget for SeriesChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(self.title, Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        if self.points.is_empty() {
            Paragraph::new(Span::styled("No data", Theme::dim()))
                .block(block)
                .render(area, buf);
            return;
        }

        let [y_lo, y_hi] = self.y_bounds();
        let x_hi = self.points.last().map(|(x, _)| *x).unwrap_or(0.0).max(1.0);

        let dataset = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(self.color))
            .data(self.points);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Theme::dim())
                    .bounds([0.0, x_hi])
                    .labels(self.x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Theme::dim())
                    .bounds([y_lo, y_hi])
                    .labels(vec![
                        format!("{:.0}{}", y_lo, self.unit),
                        format!("{:.0}{}", y_hi, self.unit),
                    ]),
            );

        chart.render(area, buf);
    }
}
