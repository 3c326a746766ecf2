//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components.

use super::app::App;
use super::widgets::{header, input, output};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Output
            Constraint::Length(3), // Input
        ])
        .split(area);

    render_header(frame, main_layout[0], app);
    render_output(frame, main_layout[1], app);
    render_input(frame, main_layout[2], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let widget = header::Header::new(
        &app.connection_info,
        app.in_flight.as_deref(),
        app.is_connected(),
    );
    frame.render_widget(widget, area);
}

fn render_output(frame: &mut Frame, area: Rect, app: &App) {
    let text = app.session.display_text();
    let is_error = app.session.is_failed() || app.session.error().is_some();
    frame.render_widget(output::OutputPanel::new(&text, is_error), area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let prompt = input::prompt(&app.session.path().to_string());
    let widget = input::InputBar::new(
        &prompt,
        &app.input.text,
        app.input.cursor,
        app.is_processing(),
    );
    frame.render_widget(widget, area);

    let available = input::InputBar::text_width(&prompt, area);
    let visible_cursor = app.input.cursor.min(available);
    // Border (1) + prompt + cursor within the visible text
    let cursor_x = area.x + 1 + (prompt.chars().count() + visible_cursor) as u16;
    let cursor_y = area.y + 1;
    frame.set_cursor_position((cursor_x, cursor_y));
}
