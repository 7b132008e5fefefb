mod app;
mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod ui;

use app::{App, CropsFocus, Screen};
use clap::Parser;
use cli::{Cli, Commands, CropsArgs};
use config::Config;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datasources::{Catalog, SensorSource, SimulatedSource};
use db::Database;
use error::{Result, SmartFarmError};
use logic::{FilterCriteria, MonitorService};
use models::Language;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use ui::components::{HeaderBar, Sidebar};
use ui::screens::{
    AnalyticsScreen, CalculatorScreen, ChatScreen, CropsScreen, DashboardScreen, LandingScreen,
    ShopScreen,
};
use ui::Theme;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            init_logging(cli.verbose, None)?;
            Config::setup_interactive()?;
            Ok(())
        }
        Some(Commands::Check) => {
            init_logging(cli.verbose, None)?;
            let config = load_config_or_exit(&cli);
            run_check(&cli, &config)
        }
        Some(Commands::Crops(ref args)) => {
            init_logging(cli.verbose, None)?;
            let config = load_config_or_exit(&cli);
            run_crops(args, &config)
        }
        None => {
            // Logs go to a file so they don't draw over the TUI
            let log_path = Config::log_path(cli.data_dir.as_ref())?;
            init_logging(cli.verbose, Some(&log_path))?;
            let config = load_config_or_exit(&cli);
            run_tui(&cli, config).await
        }
    }
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

fn load_config_or_exit(cli: &Cli) -> Config {
    match Config::load(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `smartfarm init` to create a config file");
            std::process::exit(1);
        }
    }
}

fn run_check(cli: &Cli, config: &Config) -> Result<()> {
    println!("Config: OK (farm \"{}\")", config.farm.name);

    let db_path = Config::db_path(cli.data_dir.as_ref())?;
    let db = Database::open(&db_path)?;
    let farm_crops = db.get_farm_crops()?.len();
    let cart_items: u32 = db.get_cart()?.iter().map(|l| l.quantity).sum();
    println!(
        "Database: OK ({}, {} farm crops, {} cart items)",
        db.path().display(),
        farm_crops,
        cart_items
    );

    let catalog = Catalog::load(config.catalog.path.as_deref())?;
    let seasons: Vec<String> = catalog.seasons().iter().map(|s| s.label()).collect();
    println!(
        "Catalog: OK ({} crops, seasons: {}, {} states)",
        catalog.len(),
        seasons.join(", "),
        catalog.states().len()
    );
    Ok(())
}

fn run_crops(args: &CropsArgs, config: &Config) -> Result<()> {
    let catalog = Catalog::load(config.catalog.path.as_deref())?;

    let language = match args.lang.as_deref() {
        Some(code) => Language::from_code(code).ok_or_else(|| {
            SmartFarmError::InvalidData(format!("unknown language code '{}'", code))
        })?,
        None => config.farm.language,
    };

    let mut criteria = FilterCriteria::new();
    if let Some(ref term) = args.search {
        criteria = criteria.with_search(term.as_str());
    }
    if let Some(ref season) = args.season {
        criteria = criteria.with_season_id(season);
    }
    if let Some(ref state) = args.state {
        criteria = criteria.with_state(state.as_str());
    }

    let matches = catalog.filter(&criteria);
    tracing::debug!(?criteria, count = matches.len(), "Filtered catalog");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No crops match.");
        return Ok(());
    }
    for crop in matches {
        let states: Vec<&str> = crop.applicable_states.iter().map(String::as_str).collect();
        println!(
            "{:>3}  {:<20} {:<8} {}",
            crop.id,
            crop.display_name(language),
            crop.season.label(),
            states.join(", ")
        );
    }
    Ok(())
}

async fn run_tui(cli: &Cli, config: Config) -> Result<()> {
    let db = Database::open(&Config::db_path(cli.data_dir.as_ref())?)?;
    let catalog = Catalog::load(config.catalog.path.as_deref())?;

    let mut source = match config.monitoring.seed {
        Some(seed) => SimulatedSource::seeded(seed),
        None => SimulatedSource::new(),
    };
    let forecast = source.forecast(config.monitoring.forecast_days);
    let interval = config.monitoring.interval();

    let mut app = App::new(config, db, catalog)?;
    app.set_forecast(forecast);

    let mut monitor = MonitorService::spawn(Box::new(source), interval);
    tracing::info!(source = monitor.source_name(), "Starting UI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &mut monitor).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(terminal: &mut Tui, app: &mut App, monitor: &mut MonitorService) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        while let Some(update) = monitor.try_next() {
            app.apply_update(update);
        }

        if let Err(e) = app.poll_chat(Instant::now()) {
            app.report_error("Chat", &e);
        }

        // Short poll so monitor updates and chat replies show up promptly
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

        tokio::task::yield_now().await;
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame
        .buffer_mut()
        .set_style(area, app.theme_mode.base_style());

    if app.screen == Screen::Landing {
        let screen =
            LandingScreen::new(&app.login_state).with_status(app.status_message.as_deref());
        frame.render_widget(screen, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(8),    // Body
            Constraint::Length(1), // Status message
            Constraint::Length(1), // Nav bar
        ])
        .split(area);

    let header = HeaderBar::new(app.screen.label(), app.user_label())
        .language(app.language)
        .theme_mode(app.theme_mode)
        .sidebar_visible(app.sidebar_visible);
    frame.render_widget(header, rows[0]);

    let body = if app.sidebar_visible {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(20), Constraint::Min(30)])
            .split(rows[1]);
        let items: Vec<(char, &str)> = Screen::tabs()
            .iter()
            .zip('1'..='6')
            .map(|(screen, key)| (key, screen.label()))
            .collect();
        let active = Screen::tabs().iter().position(|s| *s == app.screen);
        frame.render_widget(Sidebar::new(&items).active(active), cols[0]);
        cols[1]
    } else {
        rows[1]
    };

    draw_screen(frame, app, body);

    if let Some(ref msg) = app.status_message {
        let style = if msg.contains("failed") {
            Theme::warning()
        } else {
            Theme::success()
        };
        frame.render_widget(Paragraph::new(Span::styled(msg.as_str(), style)), rows[2]);
    }

    let nav = Line::from(vec![
        Span::styled("[1-6]", Theme::nav_key()),
        Span::styled("Tabs ", Theme::nav_label()),
        Span::styled("[b]", Theme::nav_key()),
        Span::styled("Sidebar ", Theme::nav_label()),
        Span::styled("[t]", Theme::nav_key()),
        Span::styled("Theme ", Theme::nav_label()),
        Span::styled("[l]", Theme::nav_key()),
        Span::styled("Language ", Theme::nav_label()),
        Span::styled("[o]", Theme::nav_key()),
        Span::styled("Logout ", Theme::nav_label()),
        Span::styled("[q]", Theme::nav_key()),
        Span::styled("Quit", Theme::nav_label()),
    ]);
    frame.render_widget(Paragraph::new(nav), rows[3]);
}

fn draw_screen(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    match app.screen {
        Screen::Landing => {}
        Screen::Dashboard => {
            let farm = app.farm_crop_records();
            let screen = DashboardScreen::new(
                app.sensors.as_ref(),
                app.monitoring.as_ref(),
                &app.forecast,
            )
            .with_farm(&farm, app.dashboard_state.selected_crop)
            .language(app.language);
            frame.render_widget(screen, area);
        }
        Screen::Crops => {
            let crops = app.visible_crops();
            let season = app.season_label();
            let state = app.state_label();
            let screen = CropsScreen::new(&crops, &app.crops_state.search)
                .with_filters(&season, &state)
                .with_focus(app.crops_state.focus)
                .with_selection(app.crops_state.selected_index)
                .language(app.language)
                .show_details(app.crops_state.show_details);
            frame.render_widget(screen, area);
        }
        Screen::Chat => {
            let screen = ChatScreen::new(&app.chat_state.messages, &app.chat_state.input)
                .typing(app.chat_state.typing, app.chat_bot.is_typing());
            frame.render_widget(screen, area);
        }
        Screen::Shop => {
            let screen = ShopScreen::new(&app.cart).with_selection(app.shop_state.selected_index);
            frame.render_widget(screen, area);
        }
        Screen::Analytics => {
            let screen = AnalyticsScreen::new(&app.soil_health, &app.water_usage);
            frame.render_widget(screen, area);
        }
        Screen::Calculator => {
            let crop_label = app
                .calculator_crop()
                .map(|c| c.display_name(app.language))
                .unwrap_or("Any crop");
            let screen = CalculatorScreen::new(&app.calculator_state.area_input, crop_label)
                .typing(app.calculator_state.typing)
                .with_result(app.calculator_state.result.as_ref());
            frame.render_widget(screen, area);
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.screen == Screen::Landing {
        handle_landing_input(app, key);
        return;
    }

    if app.is_editing() {
        handle_screen_input(app, key.code);
        return;
    }

    // Global key handling
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc => {
            if app.screen == Screen::Crops && app.crops_state.show_details {
                app.crops_state.show_details = false;
            } else {
                app.switch_screen(Screen::Dashboard);
            }
        }
        KeyCode::Char('t') => {
            if let Err(e) = app.toggle_theme() {
                app.report_error("Saving theme", &e);
            }
        }
        KeyCode::Char('b') => app.toggle_sidebar(),
        KeyCode::Char('l') => {
            if let Err(e) = app.cycle_language() {
                app.report_error("Saving language", &e);
            }
        }
        KeyCode::Char('o') => {
            if let Err(e) = app.logout() {
                app.report_error("Logout", &e);
            }
        }
        KeyCode::Char(c) => match Screen::from_key(c) {
            Some(screen) => app.switch_screen(screen),
            None => handle_screen_input(app, key.code),
        },
        _ => handle_screen_input(app, key.code),
    }
}

fn handle_landing_input(app: &mut App, key: KeyEvent) {
    let login = &mut app.login_state;

    if !login.modal_open {
        match key.code {
            KeyCode::Char('l') | KeyCode::Enter => login.open(false),
            KeyCode::Char('s') => login.open(true),
            KeyCode::Char('g') => {
                if let Err(e) = app.login(logic::auth::login_with_google()) {
                    app.report_error("Login", &e);
                }
            }
            KeyCode::Char('t') => {
                if let Err(e) = app.toggle_theme() {
                    app.report_error("Saving theme", &e);
                }
            }
            KeyCode::Char('q') => app.quit(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => login.close(),
        KeyCode::Tab | KeyCode::Down => login.field = login.field.next(),
        KeyCode::BackTab | KeyCode::Up => login.field = login.field.prev(),
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            login.sign_up = !login.sign_up;
        }
        KeyCode::Enter => {
            if let Err(e) = app.submit_login() {
                app.report_error("Login", &e);
            }
        }
        KeyCode::Backspace => {
            if let Some(buffer) = login.active_buffer() {
                buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buffer) = login.active_buffer() {
                buffer.push(c);
            }
        }
        _ => {}
    }
}

fn handle_screen_input(app: &mut App, code: KeyCode) {
    match app.screen {
        Screen::Landing => {}
        Screen::Dashboard => handle_dashboard_input(app, code),
        Screen::Crops => handle_crops_input(app, code),
        Screen::Chat => handle_chat_input(app, code),
        Screen::Shop => handle_shop_input(app, code),
        Screen::Analytics => {}
        Screen::Calculator => handle_calculator_input(app, code),
    }
}

fn handle_dashboard_input(app: &mut App, code: KeyCode) {
    let count = app.farm_crops.len();
    let state = &mut app.dashboard_state;
    match code {
        KeyCode::Up => state.selected_crop = state.selected_crop.saturating_sub(1),
        KeyCode::Down => {
            if count > 0 && state.selected_crop < count - 1 {
                state.selected_crop += 1;
            }
        }
        KeyCode::Char('x') => {
            if let Err(e) = app.remove_selected_farm_crop() {
                app.report_error("Removing crop", &e);
            }
        }
        _ => {}
    }
}

fn handle_crops_input(app: &mut App, code: KeyCode) {
    let focus = app.crops_state.focus;
    match focus {
        CropsFocus::Search => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Down => {
                app.crops_state.focus = CropsFocus::List
            }
            KeyCode::Tab => app.crops_state.focus = focus.next(),
            KeyCode::Backspace => {
                app.crops_state.search.pop();
                app.refilter();
            }
            KeyCode::Char(c) => {
                app.crops_state.search.push(c);
                app.refilter();
            }
            _ => {}
        },
        CropsFocus::Season | CropsFocus::State => match code {
            KeyCode::Tab => app.crops_state.focus = focus.next(),
            KeyCode::Down => app.crops_state.focus = CropsFocus::List,
            KeyCode::Left | KeyCode::Right if focus == CropsFocus::Season => {
                app.cycle_season(code == KeyCode::Right)
            }
            KeyCode::Left | KeyCode::Right => app.cycle_state(code == KeyCode::Right),
            _ => {}
        },
        CropsFocus::List => match code {
            KeyCode::Tab => app.crops_state.focus = focus.next(),
            KeyCode::Char('/') => app.crops_state.focus = CropsFocus::Search,
            KeyCode::Up => app.crops_state.prev(),
            KeyCode::Down => app.crops_state.next(),
            KeyCode::Enter => app.crops_state.show_details = !app.crops_state.show_details,
            KeyCode::Char('a') => {
                if let Err(e) = app.add_selected_to_farm() {
                    app.report_error("Adding crop", &e);
                }
            }
            _ => {}
        },
    }
}

fn handle_chat_input(app: &mut App, code: KeyCode) {
    if app.chat_state.typing {
        match code {
            KeyCode::Esc => app.chat_state.typing = false,
            KeyCode::Enter => {
                if let Err(e) = app.send_chat(Instant::now()) {
                    app.report_error("Sending message", &e);
                }
            }
            KeyCode::Backspace => {
                app.chat_state.input.pop();
            }
            KeyCode::Char(c) => app.chat_state.input.push(c),
            _ => {}
        }
    } else if matches!(code, KeyCode::Char('i') | KeyCode::Enter) {
        app.chat_state.typing = true;
    }
}

fn handle_shop_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up => app.shop_state.prev(),
        KeyCode::Down => app.shop_state.next(),
        KeyCode::Enter | KeyCode::Char('a') => {
            if let Some(id) = app.selected_product_id() {
                if let Err(e) = app.add_to_cart(id) {
                    app.report_error("Adding to cart", &e);
                }
            }
        }
        KeyCode::Char('x') => {
            if let Some(id) = app.selected_product_id() {
                if app.cart.quantity_of(id) > 0 {
                    if let Err(e) = app.remove_from_cart(id) {
                        app.report_error("Removing from cart", &e);
                    }
                }
            }
        }
        KeyCode::Char('c') => {
            if let Err(e) = app.clear_cart() {
                app.report_error("Clearing cart", &e);
            }
        }
        _ => {}
    }
}

fn handle_calculator_input(app: &mut App, code: KeyCode) {
    let state = &mut app.calculator_state;
    if state.typing {
        match code {
            KeyCode::Esc => state.typing = false,
            KeyCode::Enter => {
                state.typing = false;
                app.calculate();
            }
            KeyCode::Backspace => {
                state.area_input.pop();
            }
            KeyCode::Char(c) => state.area_input.push(c),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('i') => state.typing = true,
        KeyCode::Left | KeyCode::Right => state.cycle_crop(app.catalog.len()),
        KeyCode::Enter => app.calculate(),
        _ => {}
    }
}
