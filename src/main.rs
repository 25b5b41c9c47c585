mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod report;
mod ui;

use app::{App, FetchOutcome, FetchRequest, Screen};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use error::{Result, SkyPulseError};
use logic::{derive_summary, SnapshotLoader};
use models::{Coordinates, DisplayMode};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use ui::components::{orbit_glyph, SearchInput};
use ui::screens::{DashboardScreen, DebugOverlay, ForecastScreen};
use ui::{centered_rect, Palette};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive()?;
            Ok(())
        }
        Some(Commands::Check) => run_check(cli.config.as_ref()).await,
        Some(Commands::Show {
            city,
            lat,
            lon,
            calm,
            json,
        }) => {
            let target = match (lat, lon) {
                (Some(lat), Some(lon)) => Some(ShowTarget::Coordinates(Coordinates::new(lat, lon))),
                _ => city.map(ShowTarget::City),
            };
            run_show(cli.config.as_ref(), target, calm, json).await
        }
        Some(Commands::Search { query }) => run_search(cli.config.as_ref(), &query).await,
        None => run_tui(cli.config.as_ref()).await,
    }
}

/// The TUI owns the terminal, so its logs go to a file in the data dir.
/// One-shot commands log to stderr.
fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    if cli.command.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return;
    }

    let log_file = Config::log_path().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(SkyPulseError::from)
    });

    match log_file {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .init(),
    }
}

fn load_config(path: Option<&PathBuf>) -> Config {
    match Config::load(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `skypulse init` to create a config file");
            std::process::exit(1);
        }
    }
}

async fn run_check(config_path: Option<&PathBuf>) -> Result<()> {
    let config = load_config(config_path);
    println!("Configuration OK");
    match config.home {
        Some(home) => println!("  Home:      {}", home.coordinates()),
        None => println!("  Home:      not set"),
    }
    println!(
        "  Fallback:  {} ({})",
        config.fallback.location().display_name(),
        config.fallback.location().coordinates
    );
    println!("  Mode:      {}", config.display.mode);
    println!();

    let loader = SnapshotLoader::new(&config)?;
    let status = loader.check_connections().await;

    let mark = |ok: bool| if ok { "OK" } else { "OFFLINE" };
    println!("Forecast API:        {}", mark(status.forecast));
    println!("Air quality API:     {}", mark(status.air_quality));
    println!("Geocoding API:       {}", mark(status.geocoding));
    println!("Reverse geocoding:   {}", mark(status.reverse_geocoding));

    if status.all_connected() {
        println!();
        println!("All services reachable");
        return Ok(());
    }

    if !status.any_connected() {
        eprintln!();
        eprintln!("No weather service could be reached. Check your network and endpoints.");
        std::process::exit(1);
    }

    if !status.core_connected() {
        eprintln!();
        eprintln!("Forecast and air quality are required for the dashboard.");
        std::process::exit(1);
    }

    Ok(())
}

enum ShowTarget {
    City(String),
    Coordinates(Coordinates),
}

async fn run_show(
    config_path: Option<&PathBuf>,
    target: Option<ShowTarget>,
    calm: bool,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path);
    let loader = SnapshotLoader::new(&config)?;

    let snapshot = match target {
        Some(ShowTarget::City(name)) => loader.load_by_city(&name).await?,
        Some(ShowTarget::Coordinates(coords)) => {
            if !coords.is_valid() {
                return Err(SkyPulseError::InvalidData(format!(
                    "Coordinates out of range: {}",
                    coords
                )));
            }
            loader.load_by_coordinates(coords).await?
        }
        None => {
            let coords = match config.home {
                Some(home) => home.coordinates(),
                None => config.fallback.location().coordinates,
            };
            loader.load_by_coordinates(coords).await?
        }
    };

    let mode = if calm {
        DisplayMode::Calm
    } else {
        config.display.mode
    };

    let summary = derive_summary(
        Some(&snapshot.weather),
        Some(&snapshot.air_quality),
        mode,
        snapshot.observed_at(),
    );

    if json {
        println!("{}", report::render_json(&snapshot, &summary)?);
    } else {
        print!("{}", report::render_text(&snapshot, &summary));
    }

    Ok(())
}

async fn run_search(config_path: Option<&PathBuf>, query: &str) -> Result<()> {
    let config = load_config(config_path);
    let loader = SnapshotLoader::new(&config)?;
    let results = loader.search(query).await?;
    print!("{}", report::render_search_results(query, &results));
    Ok(())
}

async fn run_tui(config_path: Option<&PathBuf>) -> Result<()> {
    let config = load_config(config_path);
    let loader = SnapshotLoader::new(&config)?;
    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, &loader).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    loader: &SnapshotLoader,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();

    loop {
        if let Some((generation, request)) = app.take_fetch() {
            spawn_fetch(loader.clone(), generation, request, tx.clone());
        }

        while let Ok(outcome) = rx.try_recv() {
            app.apply_fetch(outcome);
        }

        let now = Instant::now();
        app.tick(now);

        terminal.draw(|f| draw(f, app, now))?;

        // Handle input with timeout so fetch results and animation keep flowing
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn spawn_fetch(
    loader: SnapshotLoader,
    generation: u64,
    request: FetchRequest,
    tx: mpsc::UnboundedSender<FetchOutcome>,
) {
    tokio::spawn(async move {
        tracing::debug!("Fetch {} started: {:?}", generation, request);
        let result = match request {
            FetchRequest::Coordinates(coords) => loader.load_by_coordinates(coords).await,
            FetchRequest::City(name) => loader.load_by_city(&name).await,
        };
        if tx.send(FetchOutcome { generation, result }).is_err() {
            tracing::debug!("UI closed before fetch {} completed", generation);
        }
    });
}

fn draw(f: &mut Frame, app: &App, now: Instant) {
    let area = f.area();
    let palette = Palette::for_class(app.theme());

    match app.screen {
        Screen::Dashboard => {
            let screen = DashboardScreen::new(app.snapshot.as_ref(), &app.summary, palette)
                .mode(app.mode)
                .score(f64::from(app.displayed_score(now)))
                .orbit(orbit_glyph(app.orbit_frame))
                .fact(app.facts.current())
                .loading(app.loading)
                .error_banner(app.error_banner)
                .with_status(app.status_message.as_deref());
            f.render_widget(screen, area);
        }
        Screen::Forecast => {
            f.render_widget(ForecastScreen::new(app.snapshot.as_ref(), palette), area);
        }
    }

    if app.search.active {
        let column = centered_rect(60, 100, area);
        let popup = Rect {
            y: area.y + area.height / 3,
            height: 3.min(area.height),
            ..column
        };
        f.render_widget(
            SearchInput::new("Search city", &app.search.query).placeholder("e.g. Lisbon"),
            popup,
        );
    }

    if app.show_debug {
        f.render_widget(
            DebugOverlay::new(app.snapshot.as_ref(), app.last_coordinates)
                .scroll(app.debug_scroll),
            area,
        );
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.search.active {
        match key.code {
            KeyCode::Esc => app.search.cancel(),
            KeyCode::Enter => {
                if let Some(query) = app.search.submit() {
                    app.request_city(query);
                }
            }
            KeyCode::Backspace => {
                app.search.query.pop();
            }
            KeyCode::Char(c) => app.search.query.push(c),
            _ => {}
        }
        return;
    }

    if ctrl && key.code == KeyCode::Char('d') {
        app.toggle_debug();
        return;
    }

    if app.show_debug {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.scroll_debug(false),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_debug(true),
            KeyCode::Esc => app.toggle_debug(),
            KeyCode::Char('q') => app.quit(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc => {
            if app.error_banner.is_some() {
                app.dismiss_error();
            } else {
                app.switch_screen(Screen::Dashboard);
            }
        }
        KeyCode::Char('/') => app.search.open(),
        KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Char('l') => app.request_locate(),
        KeyCode::Char('m') => app.toggle_mode(),
        KeyCode::Char(c) => {
            if let Some(screen) = Screen::from_key(c) {
                app.switch_screen(screen);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app() -> App {
        let mut app = App::new(Config::default());
        app.take_fetch();
        app
    }

    #[test]
    fn search_flow_queues_city_fetch() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        assert!(app.search.active);

        for c in "Oslo".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        // Typing 'q' or '2' while searching must not quit or switch screens
        handle_key(&mut app, press(KeyCode::Char('q')));
        handle_key(&mut app, press(KeyCode::Backspace));
        assert!(!app.should_quit);
        assert_eq!(app.search.query, "Oslo");

        handle_key(&mut app, press(KeyCode::Enter));
        assert!(!app.search.active);
        let (_, request) = app.take_fetch().unwrap();
        assert_eq!(request, FetchRequest::City("Oslo".into()));
    }

    #[test]
    fn escape_cancels_search() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        handle_key(&mut app, press(KeyCode::Char('x')));
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.search.active);
        assert!(app.take_fetch().is_none());
    }

    #[test]
    fn screen_and_mode_keys() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('2')));
        assert_eq!(app.screen, Screen::Forecast);
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Dashboard);

        handle_key(&mut app, press(KeyCode::Char('m')));
        assert_eq!(app.mode, DisplayMode::Calm);
    }

    #[test]
    fn debug_overlay_toggles_and_scrolls() {
        let mut app = app();
        handle_key(&mut app, ctrl('d'));
        assert!(app.show_debug);
        handle_key(&mut app, press(KeyCode::Down));
        handle_key(&mut app, press(KeyCode::Down));
        handle_key(&mut app, press(KeyCode::Up));
        assert_eq!(app.debug_scroll, 1);
        // Screen keys are swallowed while the overlay is open
        handle_key(&mut app, press(KeyCode::Char('2')));
        assert_eq!(app.screen, Screen::Dashboard);
        handle_key(&mut app, ctrl('d'));
        assert!(!app.show_debug);
    }

    #[test]
    fn refresh_and_locate_queue_fetches() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('r')));
        assert!(app.take_fetch().is_some());
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert!(app.take_fetch().is_some());
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        handle_key(&mut app, ctrl('c'));
        assert!(app.should_quit);

        let mut app = self::app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
