//! Conversation entry rendering.
//!
//! Each entry becomes a small block of lines:
//! - a header with the origin label and the client-side time
//! - the text, wrapped to at most 80% of the panel width
//! - a blank spacer line
//!
//! Local entries are right-aligned, remote entries left-aligned.

use ratatui::{
    layout::Alignment,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

use crate::domain::chat_entry::{ChatEntry, Origin};

use super::styles;

/// Bubbles never take more than this share of the panel width, in percent.
const BUBBLE_WIDTH_PERCENT: usize = 80;

/// Renders one entry into the lines the list shows for it.
pub fn entry_lines(entry: &ChatEntry, panel_width: usize) -> Vec<Line<'static>> {
    let alignment = alignment_for(entry.origin);
    let bubble_style = match entry.origin {
        Origin::Local => styles::local_entry_style(),
        Origin::Remote => styles::remote_entry_style(),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(entry.origin.as_label().to_owned(), styles::entry_label_style()),
        Span::styled(
            format!(" {}", entry.at.format("%H:%M")),
            styles::entry_time_style(),
        ),
    ])
    .alignment(alignment)];

    for text_line in wrap_text(&entry.text, bubble_width(panel_width)) {
        lines.push(
            Line::from(Span::styled(format!(" {text_line} "), bubble_style)).alignment(alignment),
        );
    }

    lines.push(Line::default());
    lines
}

fn alignment_for(origin: Origin) -> Alignment {
    match origin {
        Origin::Local => Alignment::Right,
        Origin::Remote => Alignment::Left,
    }
}

/// Usable text columns inside a bubble, after the one-column padding on each side.
fn bubble_width(panel_width: usize) -> usize {
    (panel_width * BUBBLE_WIDTH_PERCENT / 100)
        .saturating_sub(2)
        .max(1)
}

/// Splits `text` on newlines, then wraps each line at `width` display columns.
///
/// An empty text still yields one empty line so the entry stays visible.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut wrapped = Vec::new();

    for source_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for ch in source_line.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width && !current.is_empty() {
                wrapped.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }

        wrapped.push(current);
    }

    wrapped
}

/// Lines for a panel `height` rows tall whose bottom edge shows entry `bottom`
/// of `entries`.
///
/// Entries are rendered from `bottom` upwards until the panel is full, so only
/// what is visible gets built. When the top entry does not fit completely its
/// oldest lines are cut, keeping the bottom of the panel anchored.
pub fn visible_lines(
    entries: std::slice::Iter<'_, ChatEntry>,
    bottom: usize,
    panel_width: usize,
    height: usize,
) -> Vec<Line<'static>> {
    let mut blocks = Vec::new();
    let mut used = 0;

    for entry in entries.take(bottom + 1).rev() {
        if used >= height {
            break;
        }
        let lines = entry_lines(entry, panel_width);
        used += lines.len();
        blocks.push(lines);
    }

    let mut lines: Vec<Line<'static>> = blocks.into_iter().rev().flatten().collect();
    let overflow = lines.len().saturating_sub(height);
    lines.drain(..overflow);
    lines
}
