use crate::models::{DerivedSummary, DisplayMode, Snapshot};
use crate::ui::components::{
    aqi_gauge, humidity_gauge, score_gauge, temperature_gauge, uv_gauge, wind_gauge,
    FactTickerWidget,
};
use crate::ui::{Palette, Theme};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct DashboardScreen<'a> {
    pub snapshot: Option<&'a Snapshot>,
    pub summary: &'a DerivedSummary,
    pub palette: Palette,
    pub mode: DisplayMode,
    pub score: f64,
    pub orbit: &'a str,
    pub fact: &'a str,
    pub loading: bool,
    pub error_banner: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(
        snapshot: Option<&'a Snapshot>,
        summary: &'a DerivedSummary,
        palette: Palette,
    ) -> Self {
        Self {
            snapshot,
            summary,
            palette,
            mode: DisplayMode::default(),
            score: f64::from(summary.score),
            orbit: "",
            fact: "",
            loading: false,
            error_banner: None,
            status_message: None,
        }
    }

    pub fn mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    /// Animated score value to draw instead of the settled one.
    pub fn score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub fn orbit(mut self, glyph: &'a str) -> Self {
        self.orbit = glyph;
        self
    }

    pub fn fact(mut self, fact: &'a str) -> Self {
        self.fact = fact;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn error_banner(mut self, banner: Option<&'a str>) -> Self {
        self.error_banner = banner;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.palette.base());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(4), // Alert / error banner
                Constraint::Min(10),   // Conditions, score + decision, advice
                Constraint::Length(3), // Fact ticker
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_banner(chunks[1], buf);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(chunks[2]);

        self.render_conditions(body[0], buf);
        self.render_score_and_decision(body[1], buf);
        self.render_advice(body[2], buf);

        FactTickerWidget::new(self.fact, self.palette).render(chunks[3], buf);

        self.render_status_message(chunks[4], buf);
        self.render_nav(chunks[5], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let location = self
            .snapshot
            .map(|s| s.location.display_name())
            .unwrap_or_else(|| "Locating...".to_string());

        let title = format!("SkyPulse {} {}", self.orbit, location);
        let block = Block::default()
            .title(Span::styled(title, self.palette.title()))
            .borders(Borders::BOTTOM)
            .border_style(self.palette.border());

        let updated = self
            .snapshot
            .map(|s| s.fetched_at.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "Never".to_string());

        let mut spans = vec![
            Span::styled(format!("Updated: {}", updated), Theme::dim()),
            Span::styled(format!("  Mode: {}", self.mode), Theme::dim()),
            Span::styled(
                format!("  Theme: {}", self.summary.theme.as_str()),
                Theme::dim(),
            ),
        ];
        if self.loading {
            spans.push(Span::styled("  Loading...", Theme::highlight()));
        }

        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }

    fn render_banner(&self, area: Rect, buf: &mut Buffer) {
        if let Some(error) = self.error_banner {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::error())
                .title(Span::styled("Error", Theme::error()));
            Paragraph::new(Span::styled(error, Theme::error()))
                .block(block)
                .wrap(Wrap { trim: true })
                .render(area, buf);
            return;
        }

        let alert = &self.summary.alert;
        let color = if alert.is_stable() {
            self.palette.banner
        } else {
            alert.severity().color()
        };
        let style = Style::default().fg(color);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(Span::styled(
                format!("{} {}", alert.severity().symbol(), alert.title()),
                style.add_modifier(Modifier::BOLD),
            ));

        Paragraph::new(Span::styled(alert.message(), style))
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_conditions(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(6)])
            .split(area);

        let block = Block::default()
            .title(Span::styled("Current Conditions", Theme::header()))
            .borders(Borders::ALL)
            .border_style(self.palette.border());

        let Some(snapshot) = self.snapshot else {
            Paragraph::new(Span::styled("Waiting for data...", Theme::dim()))
                .block(block)
                .render(area, buf);
            return;
        };

        let weather = &snapshot.weather;
        let air = &snapshot.air_quality;
        let condition = weather.condition();
        let pm2_5 = air
            .current
            .pm2_5
            .map(|v| format!("{:.1} µg/m³", v))
            .unwrap_or_else(|| "no data".to_string());

        let lines = vec![
            Line::from(vec![
                Span::styled(format!("{} ", condition.symbol()), self.palette.title()),
                Span::styled(condition.as_str(), Theme::normal()),
                Span::styled(format!("  {}", weather.current.description), Theme::dim()),
            ]),
            Line::from(vec![
                Span::styled("PM2.5  ", Theme::dim()),
                Span::styled(pm2_5, Theme::normal()),
            ]),
        ];
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(chunks[0], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Length(5),
            ])
            .split(chunks[1]);
        let halves = |row: Rect| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(row)
        };

        let border = self.palette.border();
        let top = halves(rows[0]);
        temperature_gauge("Temp", Some(weather.current.temperature_c))
            .border_style(border)
            .render(top[0], buf);
        humidity_gauge("Humidity", weather.current_humidity())
            .border_style(border)
            .render(top[1], buf);

        let middle = halves(rows[1]);
        wind_gauge("Wind", Some(weather.current.wind_speed_kmh))
            .border_style(border)
            .render(middle[0], buf);
        uv_gauge("UV", Some(weather.current_uv()))
            .border_style(border)
            .render(middle[1], buf);

        let mut aqi = aqi_gauge("US AQI", air.aqi()).border_style(border);
        if let Some(band) = air.band() {
            aqi = aqi.caption(band.as_str());
        }
        aqi.render(rows[2], buf);
    }

    fn render_score_and_decision(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(5)])
            .split(area);

        let score = self.snapshot.map(|_| self.score);
        score_gauge("Environmental Score", score)
            .border_style(self.palette.border())
            .render(chunks[0], buf);

        let decision = &self.summary.decision;
        let verdict_style = Style::default()
            .fg(decision.verdict.color())
            .add_modifier(Modifier::BOLD);

        let block = Block::default()
            .title(Span::styled("Go Outside?", Theme::header()))
            .borders(Borders::ALL)
            .border_style(self.palette.border());

        let lines = vec![
            Line::from(vec![
                Span::styled(decision.verdict.as_str(), verdict_style),
                Span::styled(format!("  {}", decision.title), Theme::header()),
            ]),
            Line::from(Span::styled(decision.reason, Theme::normal())),
            Line::from(vec![
                Span::styled("When: ", Theme::dim()),
                Span::styled(decision.time_anchor, Theme::normal()),
            ]),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);
    }

    fn render_advice(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Activities", Theme::header()))
            .borders(Borders::ALL)
            .border_style(self.palette.border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.summary.advice.is_empty() {
            Paragraph::new(Span::styled("No advice yet", Theme::dim())).render(inner, buf);
            return;
        }

        let mut items: Vec<ListItem> = self
            .summary
            .advice
            .iter()
            .map(|a| {
                let style = Style::default().fg(a.verdict.color());
                let title_line = Line::from(vec![
                    Span::styled(format!("{} ", a.verdict.symbol()), style),
                    Span::styled(format!("{:<8}", a.activity.as_str()), Theme::normal()),
                    Span::styled(a.verdict.as_str(), style),
                ]);
                let note_line = Line::from(vec![
                    Span::styled("  ", Theme::dim()),
                    Span::styled(a.note, Theme::dim()),
                ]);
                ListItem::new(vec![title_line, note_line])
            })
            .collect();

        if let Some(ref improvement) = self.summary.improvement {
            items.push(ListItem::new(Line::from("")));
            items.push(ListItem::new(Line::from(vec![
                Span::styled("Air: ", Theme::dim()),
                Span::styled(improvement.as_str(), Theme::warning()),
            ])));
        }

        List::new(items).render(inner, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if self.error_banner.is_some() {
                Theme::warning()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(area, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(nav_line()).render(area, buf);
    }
}

pub fn nav_line() -> Line<'static> {
    Line::from(vec![
        Span::styled("[1]", Theme::nav_key()),
        Span::styled("Dashboard ", Theme::nav_label()),
        Span::styled("[2]", Theme::nav_key()),
        Span::styled("Forecast ", Theme::nav_label()),
        Span::styled("[r]", Theme::nav_key()),
        Span::styled("Refresh ", Theme::nav_label()),
        Span::styled("[l]", Theme::nav_key()),
        Span::styled("Locate ", Theme::nav_label()),
        Span::styled("[m]", Theme::nav_key()),
        Span::styled("Mode ", Theme::nav_label()),
        Span::styled("[/]", Theme::nav_key()),
        Span::styled("Search ", Theme::nav_label()),
        Span::styled("[^D]", Theme::nav_key()),
        Span::styled("Debug ", Theme::nav_label()),
        Span::styled("[q]", Theme::nav_key()),
        Span::styled("Quit", Theme::nav_label()),
    ])
}
