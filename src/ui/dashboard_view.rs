//! Dashboard screen rendering
//!
//! Renders the city selector, the "add city" input, the error line and the
//! forecast table for the selected city.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, InputMode};
use weatherdash::data::ForecastRow;

/// Label appended to every temperature; no conversion is applied
pub const TEMPERATURE_SUFFIX: &str = "F";

const INPUT_PLACEHOLDER: &str = "Enter city name";

/// Renders the whole dashboard
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let error_height = if app.dashboard.error().is_some() { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(error_height),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_city_bar(frame, app, chunks[0]);
    render_input(frame, app, chunks[1]);
    if let Some(error) = app.dashboard.error() {
        let error_line = Paragraph::new(error.to_string()).style(Style::default().fg(Color::Red));
        frame.render_widget(error_line, chunks[2]);
    }
    render_forecast_table(frame, app, chunks[3]);
    render_status_line(frame, app, chunks[4]);
}

/// One selector entry per city, selected one highlighted
fn render_city_bar(frame: &mut Frame, app: &App, area: Rect) {
    let selected = app.dashboard.selected_index();
    let mut spans = Vec::new();

    for (i, city) in app.dashboard.cities().iter().enumerate() {
        let label = if i < 9 {
            format!(" {} {} ", i + 1, city.name)
        } else {
            format!(" {} ", city.name)
        };
        let style = if i == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    let block = Block::default().title(" Cities ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == InputMode::Editing;
    let input = app.dashboard.input();

    let text = if input.is_empty() && !editing {
        Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(input.to_string())
    };

    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(" Add city [+] ")
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);

    if editing {
        let width = input.chars().count() as u16;
        let x = (area.x + 1 + width).min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

/// Formats a temperature cell, e.g. "24.5 F"
pub fn format_temperature(temperature: f64) -> String {
    format!("{} {}", temperature, TEMPERATURE_SUFFIX)
}

fn forecast_row(row: &ForecastRow) -> Row<'static> {
    Row::new(vec![
        Cell::from(row.time.clone()),
        Cell::from(format_temperature(row.temperature)),
    ])
}

fn render_forecast_table(frame: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app.dashboard.rows().iter().map(forecast_row).collect();

    let header = Row::new(vec!["Time", "Temperature"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let block = Block::default()
        .title(format!(" {} ", app.dashboard.selected_city().name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let table = Table::new(rows, [Constraint::Length(10), Constraint::Min(12)])
        .header(header)
        .block(block);

    frame.render_widget(table, area);
}

fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if app.dashboard.is_loading() {
        spans.push(Span::styled("Loading... ", Style::default().fg(Color::Cyan)));
    }

    let hints = match app.mode {
        InputMode::Browse => "←/→ city  a add  r reload  ? help  q quit",
        InputMode::Editing => "Enter add  Esc cancel",
    };
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
