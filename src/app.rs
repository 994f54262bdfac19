//! Application state management for Weatherdash
//!
//! Wraps the dashboard controller with the terminal-only state (input mode,
//! help overlay, quit flag) and maps keyboard input to dashboard operations.
//! Operations that need the network come back as [`Action`]s for the main loop
//! to dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use weatherdash::dashboard::{Dashboard, ForecastRequest};
use weatherdash::fetch::FetchMessage;

/// Where keystrokes go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys select cities and trigger commands
    Browse,
    /// Keys edit the "add city" input
    Editing,
}

/// Network work requested by a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadForecast(ForecastRequest),
    LookupCity(String),
}

/// Main application struct
pub struct App {
    /// Dashboard state
    pub dashboard: Dashboard,
    /// Current input mode
    pub mode: InputMode,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
}

impl App {
    /// Creates a new App instance with default state
    pub fn new() -> Self {
        Self {
            dashboard: Dashboard::new(),
            mode: InputMode::Browse,
            should_quit: false,
            show_help: false,
        }
    }

    /// Initial forecast load for the first selected city
    pub fn start(&mut self) -> Action {
        Action::LoadForecast(self.dashboard.reload())
    }

    /// Applies a finished fetch, returning any follow-up work
    pub fn handle_message(&mut self, message: FetchMessage) -> Option<Action> {
        self.dashboard
            .handle_message(message)
            .map(Action::LoadForecast)
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// Browse mode:
    /// - `←`/`h`, `→`/`l`/`Tab`: Select previous/next city
    /// - `1`-`9`: Select city by position
    /// - `a` or `/`: Edit the "add city" input
    /// - `r`: Reload the selected city's forecast
    /// - `?`: Toggle help
    /// - `q` or `Esc`: Quit
    ///
    /// Editing mode:
    /// - Characters and `Backspace` edit the input
    /// - `Enter`: Look up the typed city
    /// - `Esc`: Back to browse mode, keeping the text
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Option<Action> {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return None;
        }

        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return None;
        }

        match self.mode {
            InputMode::Browse => self.handle_browse_key(key_event),
            InputMode::Editing => self.handle_editing_key(key_event),
        }
    }

    fn handle_browse_key(&mut self, key_event: KeyEvent) -> Option<Action> {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.select_previous(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.select_next(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.dashboard.select_city(index).map(Action::LoadForecast)
            }
            KeyCode::Char('a') | KeyCode::Char('/') => {
                self.mode = InputMode::Editing;
                None
            }
            KeyCode::Char('r') => Some(Action::LoadForecast(self.dashboard.reload())),
            KeyCode::Char('?') => {
                self.show_help = true;
                None
            }
            _ => None,
        }
    }

    fn handle_editing_key(&mut self, key_event: KeyEvent) -> Option<Action> {
        match key_event.code {
            KeyCode::Esc => {
                self.mode = InputMode::Browse;
                None
            }
            KeyCode::Enter => {
                let query = self.dashboard.submit_input()?;
                self.mode = InputMode::Browse;
                Some(Action::LookupCity(query))
            }
            KeyCode::Backspace => {
                self.dashboard.pop_input();
                None
            }
            KeyCode::Char(c) => {
                self.dashboard.push_input(c);
                None
            }
            _ => None,
        }
    }

    /// Selects the previous city, wrapping to the last
    fn select_previous(&mut self) -> Option<Action> {
        let count = self.dashboard.cities().len();
        let current = self.dashboard.selected_index();
        let index = if current == 0 { count - 1 } else { current - 1 };
        self.dashboard.select_city(index).map(Action::LoadForecast)
    }

    /// Selects the next city, wrapping to the first
    fn select_next(&mut self) -> Option<Action> {
        let count = self.dashboard.cities().len();
        let index = (self.dashboard.selected_index() + 1) % count;
        self.dashboard.select_city(index).map(Action::LoadForecast)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
