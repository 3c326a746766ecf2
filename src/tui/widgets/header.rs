//! Header widget for the TUI.
//!
//! Displays the application name, version, the running command and the
//! server connection.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

/// Header bar widget.
pub struct Header<'a> {
    connection_info: &'a str,
    in_flight: Option<&'a str>,
    is_connected: bool,
}

impl<'a> Header<'a> {
    /// Creates a new header widget.
    pub fn new(connection_info: &'a str, in_flight: Option<&'a str>, is_connected: bool) -> Self {
        Self {
            connection_info,
            in_flight,
            is_connected,
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(style);
        }

        let left_text = format!(" mongo-nav v{}", env!("CARGO_PKG_VERSION"));
        let left_span = Span::styled(left_text, style);
        buf.set_span(area.x, area.y, &left_span, area.width);

        if let Some(command) = self.in_flight {
            let busy_style = style.fg(Color::Yellow);
            let busy_text = format!("⋯ {command}");
            let busy_width = busy_text.chars().count() as u16;
            let busy_x = area.x + area.width.saturating_sub(busy_width) / 2;
            buf.set_string(busy_x, area.y, &busy_text, busy_style);
        }

        let status_dot = if self.is_connected { "●" } else { "○" };
        let status_color = if self.is_connected {
            Color::Green
        } else {
            Color::Red
        };
        let status_style = Style::default().bg(Color::Blue).fg(status_color);

        let info_text = format!(" {} ", self.connection_info);
        let right_width = info_text.chars().count() as u16 + 2;
        if right_width < area.width {
            let right_x = area.right().saturating_sub(right_width);
            buf.set_string(right_x, area.y, " ", style);
            buf.set_string(right_x + 1, area.y, status_dot, status_style);
            buf.set_string(right_x + 2, area.y, &info_text, style);
        }
    }
}
