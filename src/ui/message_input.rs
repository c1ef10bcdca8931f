//! Message input field rendering.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::input_buffer::InputBuffer;

use super::styles;

/// Placeholder text shown while the input is empty.
const PLACEHOLDER_TEXT: &str = "Type your message...";

/// Prompt symbol shown before the input text.
const PROMPT_SYMBOL: &str = "> ";

const SUBMIT_HINT: &str = " Enter: send ";

/// Renders the input field. The input is always focused, so the cursor is always placed.
pub fn render_message_input(frame: &mut Frame<'_>, area: Rect, input: &InputBuffer) {
    let paragraph = Paragraph::new(build_input_line(input)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styles::panel_border_style())
            .title_bottom(Line::from(SUBMIT_HINT).right_aligned()),
    );

    frame.render_widget(paragraph, area);

    let cursor_x = area
        .x
        .saturating_add(1)
        .saturating_add(PROMPT_SYMBOL.len() as u16)
        .saturating_add(input.cursor_column().min(u16::MAX as usize) as u16);
    let cursor_y = area.y.saturating_add(1);
    frame.set_cursor_position((cursor_x, cursor_y));
}

fn build_input_line(input: &InputBuffer) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());

    if input.is_empty() {
        Line::from(vec![
            prompt,
            Span::styled(PLACEHOLDER_TEXT.to_owned(), styles::input_placeholder_style()),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(input.text().to_owned(), styles::input_text_style()),
        ])
    }
}
