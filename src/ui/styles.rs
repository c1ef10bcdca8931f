//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Conversation styles
// =============================================================================

/// Bubble text for entries typed here (white on green).
pub fn local_entry_style() -> Style {
    Style::default().fg(Color::White).bg(Color::Green)
}

/// Bubble text for entries received from the server (white on dark gray).
pub fn remote_entry_style() -> Style {
    Style::default().fg(Color::White).bg(Color::DarkGray)
}

/// Origin label above a bubble.
pub fn entry_label_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Client-side timestamp next to the origin label.
pub fn entry_time_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn empty_log_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Connecting screen
// =============================================================================

pub fn connecting_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

// =============================================================================
// Input field styles
// =============================================================================

pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Green)
}

pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn panel_border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

// =============================================================================
// Status line
// =============================================================================

pub fn status_line_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
