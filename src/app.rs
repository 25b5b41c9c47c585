use crate::config::Config;
use crate::error::Result;
use crate::logic::derive_summary;
use crate::models::{Coordinates, DerivedSummary, DisplayMode, Snapshot, ThemeClass};
use chrono::Local;
use std::time::{Duration, Instant};

const SCORE_ANIMATION: Duration = Duration::from_millis(1500);
const ORBIT_FRAMES: usize = 8;

pub const FACTS: &[&str] = &[
    "Quantum fluctuations affect your umbrella usage.",
    "You're 84% likely to experience entangled rain today.",
    "This weather was observed into existence.",
    "Clouds might be in a superposition of sunny and rainy.",
    "Don't blame us if it's Schrödinger's drizzle.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Forecast,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Forecast),
            _ => None,
        }
    }
}

pub struct SearchState {
    pub active: bool,
    pub query: String,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            active: false,
            query: String::new(),
        }
    }

    pub fn open(&mut self) {
        self.active = true;
        self.query.clear();
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.query.clear();
    }

    /// Close the input and hand back the trimmed query, if any.
    pub fn submit(&mut self) -> Option<String> {
        self.active = false;
        let query = std::mem::take(&mut self.query);
        let query = query.trim();
        if query.is_empty() {
            None
        } else {
            Some(query.to_string())
        }
    }
}

/// What a spawned fetch task should load.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Coordinates(Coordinates),
    City(String),
}

impl FetchRequest {
    pub fn describe(&self) -> String {
        match self {
            FetchRequest::Coordinates(c) => format!("Loading weather at {}...", c),
            FetchRequest::City(name) => format!("Searching for {}...", name),
        }
    }
}

/// Result of a fetch task, tagged with the generation it was started under.
pub struct FetchOutcome {
    pub generation: u64,
    pub result: Result<Snapshot>,
}

pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Eases the displayed score from its previous value to a new target.
pub struct ScoreAnimation {
    from: f64,
    to: f64,
    started: Option<Instant>,
    duration: Duration,
}

impl ScoreAnimation {
    pub fn new() -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            started: None,
            duration: SCORE_ANIMATION,
        }
    }

    pub fn retarget(&mut self, to: u8, now: Instant) {
        self.from = self.value_at(now);
        self.to = f64::from(to);
        self.started = Some(now);
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        let Some(started) = self.started else {
            return self.to;
        };
        let elapsed = now.saturating_duration_since(started).as_secs_f64();
        let t = elapsed / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_in_out_quad(t)
    }
}

pub struct FactTicker {
    index: usize,
    interval: Duration,
    last_switch: Instant,
}

impl FactTicker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            index: 0,
            interval: interval.max(Duration::from_secs(1)),
            last_switch: now,
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if now.saturating_duration_since(self.last_switch) >= self.interval {
            self.index = (self.index + 1) % FACTS.len();
            self.last_switch = now;
        }
    }

    pub fn current(&self) -> &'static str {
        FACTS[self.index % FACTS.len()]
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,
    pub mode: DisplayMode,

    // Data
    pub snapshot: Option<Snapshot>,
    pub summary: DerivedSummary,
    pub last_coordinates: Option<Coordinates>,

    // Overlays
    pub search: SearchState,
    pub show_debug: bool,
    pub debug_scroll: u16,

    // Animation
    pub score_animation: ScoreAnimation,
    pub facts: FactTicker,
    pub orbit_frame: usize,

    // UI state
    pub status_message: Option<String>,
    pub error_banner: Option<&'static str>,
    pub loading: bool,

    generation: u64,
    pending_fetch: Option<FetchRequest>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let now = Instant::now();
        let interval = Duration::from_secs(config.display.fact_interval_secs);
        let mut app = Self {
            screen: Screen::Dashboard,
            should_quit: false,
            mode: config.display.mode,
            config,
            snapshot: None,
            summary: DerivedSummary::default(),
            last_coordinates: None,
            search: SearchState::new(),
            show_debug: false,
            debug_scroll: 0,
            score_animation: ScoreAnimation::new(),
            facts: FactTicker::new(interval, now),
            orbit_frame: 0,
            status_message: None,
            error_banner: None,
            loading: false,
            generation: 0,
            pending_fetch: None,
        };
        app.request_locate();
        app
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn toggle_debug(&mut self) {
        self.show_debug = !self.show_debug;
        self.debug_scroll = 0;
    }

    pub fn scroll_debug(&mut self, down: bool) {
        self.debug_scroll = if down {
            self.debug_scroll.saturating_add(1)
        } else {
            self.debug_scroll.saturating_sub(1)
        };
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
        self.recompute_summary(Instant::now());
        self.set_status(&format!("Display mode: {}", self.mode));
    }

    /// Home coordinates when configured, else the fallback city.
    pub fn request_locate(&mut self) {
        let coords = match self.config.home {
            Some(home) => home.coordinates(),
            None => self.config.fallback.location().coordinates,
        };
        self.queue_fetch(FetchRequest::Coordinates(coords));
    }

    pub fn request_refresh(&mut self) {
        match self.last_coordinates {
            Some(coords) => self.queue_fetch(FetchRequest::Coordinates(coords)),
            None => self.request_locate(),
        }
    }

    pub fn request_city(&mut self, name: String) {
        self.queue_fetch(FetchRequest::City(name));
    }

    fn queue_fetch(&mut self, request: FetchRequest) {
        self.set_status(&request.describe());
        self.pending_fetch = Some(request);
    }

    /// Take the queued request and stamp it with a fresh generation.
    /// Any fetch still in flight becomes stale.
    pub fn take_fetch(&mut self) -> Option<(u64, FetchRequest)> {
        let request = self.pending_fetch.take()?;
        self.generation += 1;
        self.loading = true;
        Some((self.generation, request))
    }

    /// Apply a completed fetch. Returns false when it was superseded.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.generation != self.generation {
            tracing::debug!(
                "Discarding stale fetch (generation {}, latest {})",
                outcome.generation,
                self.generation
            );
            return false;
        }

        self.loading = false;
        match outcome.result {
            Ok(snapshot) => {
                self.last_coordinates = Some(snapshot.location.coordinates);
                let name = snapshot.location.display_name();
                self.snapshot = Some(snapshot);
                self.error_banner = None;
                self.recompute_summary(Instant::now());
                self.set_status(&format!("Loaded {}", name));
            }
            Err(e) => {
                tracing::warn!("Fetch failed: {}", e);
                self.error_banner = Some(e.banner());
                self.set_status(e.banner());
            }
        }
        true
    }

    pub fn dismiss_error(&mut self) {
        self.error_banner = None;
    }

    fn recompute_summary(&mut self, now: Instant) {
        let weather = self.snapshot.as_ref().map(|s| &s.weather);
        let air = self.snapshot.as_ref().map(|s| &s.air_quality);
        let local_now = self
            .snapshot
            .as_ref()
            .map(Snapshot::observed_at)
            .unwrap_or_else(|| Local::now().naive_local());
        self.summary = derive_summary(weather, air, self.mode, local_now);
        self.score_animation.retarget(self.summary.score, now);
    }

    pub fn tick(&mut self, now: Instant) {
        self.facts.tick(now);
        self.orbit_frame = (self.orbit_frame + 1) % ORBIT_FRAMES;
    }

    pub fn displayed_score(&self, now: Instant) -> u8 {
        self.score_animation.value_at(now).round().clamp(0.0, 100.0) as u8
    }

    pub fn theme(&self) -> ThemeClass {
        self.summary.theme
    }
}
