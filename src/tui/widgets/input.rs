//! Input widget for the TUI.
//!
//! A single-line text field behind a prompt that shows the current path.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Builds the prompt for a path.
pub fn prompt(path: &str) -> String {
    format!("mongo-nav ({path}) > ")
}

/// Calculates the scroll offset needed to keep the cursor visible.
///
/// Returns the number of characters to skip from the start of the text.
pub fn calculate_scroll_offset(cursor: usize, available_width: usize) -> usize {
    cursor.saturating_sub(available_width)
}

/// Input bar widget.
pub struct InputBar<'a> {
    prompt: &'a str,
    text: &'a str,
    cursor: usize,
    busy: bool,
}

impl<'a> InputBar<'a> {
    /// Creates a new input bar widget.
    pub fn new(prompt: &'a str, text: &'a str, cursor: usize, busy: bool) -> Self {
        Self {
            prompt,
            text,
            cursor,
            busy,
        }
    }

    /// Width available for the text once borders and prompt are drawn.
    pub fn text_width(prompt: &str, area: Rect) -> usize {
        // Two borders plus one cell for the cursor
        (area.width as usize).saturating_sub(prompt.chars().count() + 3)
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.busy {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Command ");

        let prompt_style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);

        let available_width = Self::text_width(self.prompt, area);
        let scroll_offset = calculate_scroll_offset(self.cursor, available_width);
        let visible_text: String = self.text.chars().skip(scroll_offset).collect();

        let line = Line::from(vec![
            Span::styled(self.prompt, prompt_style),
            Span::raw(visible_text),
        ]);

        Paragraph::new(line).block(block).render(area, buf);
    }
}
