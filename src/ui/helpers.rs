use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use md_base::constants::{CLOCK_CRITICAL_SECONDS, CLOCK_WARNING_SECONDS};
use ratatui::style::Color;

use super::theme;

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        s.to_string()
    } else {
        let mut result = String::new();
        let mut width = 0;
        for c in s.chars() {
            let cw = c.width().unwrap_or(0);
            if width + cw + 1 > max_width {
                result.push('…');
                break;
            }
            result.push(c);
            width += cw;
        }
        result
    }
}

/// Word-wrap text to fit within a given width
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if current_width == 0 {
            current_line = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
            current_width = word_width;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Color for a subsystem status string.
pub fn status_color(status: &str) -> Color {
    match status.trim().to_uppercase().as_str() {
        "CRITICAL" | "FAILURE" | "FAILED" | "OFFLINE" => theme::ERROR,
        "OK" | "RESOLVED" | "NOMINAL" | "STABLE" | "ONLINE" => theme::SUCCESS,
        _ => theme::WARNING,
    }
}

/// Clock color: calm, then amber under two minutes, red in the last thirty seconds.
pub fn clock_color(remaining: u32) -> Color {
    if remaining <= CLOCK_CRITICAL_SECONDS {
        theme::ERROR
    } else if remaining <= CLOCK_WARNING_SECONDS {
        theme::WARNING
    } else {
        theme::TEXT
    }
}

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

pub fn spinner(frame: u64) -> &'static str {
    SPINNER_FRAMES[(frame % SPINNER_FRAMES.len() as u64) as usize]
}
