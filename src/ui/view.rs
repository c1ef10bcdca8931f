use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::usecases::contracts::Screen;

use super::message_input::render_message_input;
use super::message_rendering::visible_lines;
use super::styles;

const CONNECTING_TEXT: &str = "Connecting to socket server...";
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(frame: &mut Frame<'_>, screen: &Screen<'_>) {
    // Until the channel has opened there is nothing to show but the indicator.
    if !screen.has_opened {
        render_connecting(frame, frame.area(), screen.shell.ticks());
        return;
    }

    // 3 lines for input: 1 border + 1 text + 1 border
    let [messages_area, input_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    render_messages_panel(frame, messages_area, screen);
    render_message_input(frame, input_area, screen.shell.input());

    let status = Paragraph::new(status_line(screen)).style(styles::status_line_style());
    frame.render_widget(status, status_area);
}

fn render_connecting(frame: &mut Frame<'_>, area: Rect, ticks: usize) {
    let [_, middle, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

    let indicator = Paragraph::new(Line::styled(
        connecting_text(ticks),
        styles::connecting_style(),
    ))
    .centered();
    frame.render_widget(indicator, middle);
}

fn connecting_text(ticks: usize) -> String {
    let spinner = SPINNER_FRAMES[ticks % SPINNER_FRAMES.len()];
    format!("{spinner} {CONNECTING_TEXT}")
}

fn render_messages_panel(frame: &mut Frame<'_>, area: Rect, screen: &Screen<'_>) {
    let block = Block::default()
        .title("Messages")
        .borders(Borders::ALL)
        .border_style(styles::panel_border_style());

    let Some(bottom) = screen.viewport.bottom_entry(screen.entries.len()) else {
        let placeholder =
            Paragraph::new(Line::styled("No messages yet", styles::empty_log_style())).block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    // Inner size = area minus borders
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    let lines = visible_lines(screen.entries.clone(), bottom, inner_width, inner_height);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn status_line(screen: &Screen<'_>) -> String {
    let channel = screen.channel_state.as_label();
    let endpoint = screen.endpoint.unwrap_or("-");
    let scroll_hint = if screen.viewport.is_following_latest() {
        "↑/↓ PgUp/PgDn: scroll"
    } else {
        "scrolled back | ↓/PgDn: newer"
    };
    format!("channel: {channel} | {endpoint} | Enter: send | {scroll_hint} | Esc: quit")
}
