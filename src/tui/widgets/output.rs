//! Output panel for the TUI.
//!
//! Shows the last listing, or the last error in red. Overflow is clipped.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Text,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Output panel widget.
pub struct OutputPanel<'a> {
    text: &'a str,
    is_error: bool,
}

impl<'a> OutputPanel<'a> {
    pub fn new(text: &'a str, is_error: bool) -> Self {
        Self { text, is_error }
    }
}

impl Widget for OutputPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Output ");

        let style = if self.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };

        Paragraph::new(Text::styled(self.text, style))
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
