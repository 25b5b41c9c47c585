use crate::models::{Snapshot, WeatherCondition};
use crate::ui::components::SeriesChart;
use crate::ui::{Palette, Theme};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

const HOURS_AHEAD: usize = 24;

pub struct ForecastScreen<'a> {
    pub snapshot: Option<&'a Snapshot>,
    pub palette: Palette,
}

impl<'a> ForecastScreen<'a> {
    pub fn new(snapshot: Option<&'a Snapshot>, palette: Palette) -> Self {
        Self { snapshot, palette }
    }
}

/// Points for the next 24 hourly slots starting at the current one.
/// Gaps (null values) are skipped rather than drawn as zero.
fn next_hours(series: &[Option<f64>], start: usize) -> Vec<(f64, f64)> {
    series
        .iter()
        .skip(start)
        .take(HOURS_AHEAD)
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
        .collect()
}

impl Widget for ForecastScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.palette.base());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Title
                Constraint::Min(12),    // Charts
                Constraint::Length(10), // Daily table
                Constraint::Length(1),  // Nav
            ])
            .split(area);

        let location = self
            .snapshot
            .map(|s| s.location.display_name())
            .unwrap_or_else(|| "No location loaded".to_string());

        let title = Line::from(vec![
            Span::styled("Forecast", self.palette.title()),
            Span::styled(" - ", Theme::dim()),
            Span::styled(location, Theme::normal()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        match self.snapshot {
            Some(snapshot) => {
                self.render_charts(snapshot, chunks[1], buf);
                self.render_daily(snapshot, chunks[2], buf);
            }
            None => {
                Paragraph::new(Span::styled("Waiting for data...", Theme::dim()))
                    .render(chunks[1], buf);
            }
        }

        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Refresh ", Theme::nav_label()),
            Span::styled("[/]", Theme::nav_key()),
            Span::styled("Search ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl ForecastScreen<'_> {
    fn render_charts(&self, snapshot: &Snapshot, area: Rect, buf: &mut Buffer) {
        let hourly = &snapshot.weather.hourly;
        let start = snapshot.weather.current_index();

        let x_labels: Vec<String> = [0, HOURS_AHEAD / 2, HOURS_AHEAD - 1]
            .iter()
            .filter_map(|offset| hourly.time.get(start + offset))
            .map(|t| t.format("%H:%M").to_string())
            .collect();

        let temps = next_hours(&hourly.temperature_c, start);
        let humidity = next_hours(&hourly.humidity_percent, start);
        let wind = next_hours(&hourly.wind_speed_kmh, start);
        let uv = next_hours(&hourly.uv_index, start);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        SeriesChart::new("Temperature (next 24h)", "°C", &temps)
            .color(Theme::TEMP_WARM)
            .x_labels(x_labels.clone())
            .render(top[0], buf);

        SeriesChart::new("Humidity", "%", &humidity)
            .color(Color::LightBlue)
            .floor(0.0)
            .x_labels(x_labels.clone())
            .render(top[1], buf);

        SeriesChart::new("Wind", " km/h", &wind)
            .color(Color::Cyan)
            .floor(0.0)
            .x_labels(x_labels.clone())
            .render(bottom[0], buf);

        SeriesChart::new("UV Index", "", &uv)
            .color(Theme::UV_HIGH)
            .floor(0.0)
            .x_labels(x_labels)
            .render(bottom[1], buf);
    }

    fn render_daily(&self, snapshot: &Snapshot, area: Rect, buf: &mut Buffer) {
        let daily = &snapshot.weather.daily;

        let header = Row::new(vec![
            Cell::from("Day"),
            Cell::from("Conditions"),
            Cell::from("High"),
            Cell::from("Low"),
        ])
        .style(Theme::header());

        let rows: Vec<Row> = (0..daily.len())
            .map(|i| {
                let day = daily.date[i].format("%a %b %d").to_string();
                let condition = daily.weather_code[i]
                    .map(WeatherCondition::from_wmo_code)
                    .unwrap_or(WeatherCondition::Unknown);
                let high = daily.temp_max_c[i];
                let low = daily.temp_min_c[i];

                Row::new(vec![
                    Cell::from(day),
                    Cell::from(format!("{} {}", condition.symbol(), condition)),
                    temp_cell(high),
                    temp_cell(low),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Min(16),
                Constraint::Length(8),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(Span::styled("Daily", Theme::header()))
                .borders(Borders::ALL)
                .border_style(self.palette.border()),
        );

        Widget::render(table, area, buf);
    }
}

fn temp_cell(value: Option<f64>) -> Cell<'static> {
    match value {
        Some(t) => Cell::from(format!("{:.1}°C", t)).style(Style::default().fg(Theme::temp_color(t))),
        None => Cell::from("--").style(Theme::dim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_hours_starts_at_offset_and_skips_gaps() {
        let series: Vec<Option<f64>> = (0..48).map(|h| Some(h as f64)).collect();
        let points = next_hours(&series, 10);
        assert_eq!(points.len(), 24);
        assert_eq!(points[0], (0.0, 10.0));
        assert_eq!(points[23], (23.0, 33.0));

        let gappy = vec![Some(1.0), None, Some(3.0)];
        assert_eq!(next_hours(&gappy, 0), vec![(0.0, 1.0), (2.0, 3.0)]);
    }

    #[test]
    fn next_hours_near_end_is_short() {
        let series: Vec<Option<f64>> = vec![Some(1.0); 5];
        assert_eq!(next_hours(&series, 3).len(), 2);
        assert!(next_hours(&series, 9).is_empty());
    }
}
