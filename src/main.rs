//! Weatherdash - Hourly temperature forecasts in the terminal
//!
//! A terminal UI that shows the afternoon-to-midnight temperature forecast for
//! a short list of cities, with the option to add more cities by name.

mod app;
mod ui;

use std::io;
use std::panic;
use std::process;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use app::{Action, App};
use weatherdash::cli::{Cli, StartupConfig};
use weatherdash::data::{GeocodingClient, WeatherClient};
use weatherdash::fetch::{self, FetchHandle};
use weatherdash::logging;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    ui::render_dashboard(frame, app);
    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Hands network work to the fetcher
fn dispatch(fetcher: &FetchHandle, action: Action) {
    match action {
        Action::LoadForecast(request) => fetcher.load_forecast(request),
        Action::LookupCity(query) => fetcher.lookup_city(query),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    match logging::init(config.log_file.as_deref(), config.debug) {
        Ok(path) => info!(log_file = %path.display(), "Starting weatherdash"),
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    let http = config.http_client()?;
    let mut fetcher = FetchHandle::new(
        WeatherClient::with_client(http.clone()).with_base_url(&config.weather_url),
        GeocodingClient::with_client(http).with_base_url(&config.geocoding_url),
    );

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let initial = app.start();
    dispatch(&fetcher, initial);

    let result = run(&mut terminal, &mut app, &mut fetcher);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    if let Err(e) = &result {
        error!(error = %e, "Exiting on terminal error");
    }
    result.map_err(Into::into)
}

/// Main event loop
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    fetcher: &mut FetchHandle,
) -> io::Result<()> {
    loop {
        // Apply finished fetches before drawing
        while let Some(message) = fetch::try_recv(fetcher) {
            if let Some(action) = app.handle_message(message) {
                dispatch(fetcher, action);
            }
        }

        terminal.draw(|f| render_ui(f, app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = app.handle_key(key) {
                        dispatch(fetcher, action);
                    }
                }
            }
        }

        if app.should_quit {
            info!("Quitting");
            return Ok(());
        }
    }
}
