use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use md_base::timer::format_clock;

use super::{helpers::*, theme};
use crate::state::State;

const HELP_HEIGHT: u16 = 6;

pub fn render_sidebar(frame: &mut Frame, state: &State, area: Rect) {
    let base_style = Style::default().bg(theme::BG_BASE);

    let sidebar_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),              // Clock + systems
            Constraint::Length(HELP_HEIGHT), // Help hints
        ])
        .split(area);

    let width = area.width.saturating_sub(4) as usize;
    let remaining = state.countdown.remaining();

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("  ", base_style),
            Span::styled("REACTOR BREACH IN", Style::default().fg(theme::TEXT_MUTED).bold()),
        ]),
        Line::from(vec![
            Span::styled("  ", base_style),
            Span::styled(format_clock(remaining), Style::default().fg(clock_color(remaining)).bold()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", base_style),
            Span::styled("RANK ", Style::default().fg(theme::TEXT_MUTED)),
            Span::styled(state.difficulty.label(), Style::default().fg(theme::TEXT)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", base_style),
            Span::styled("SYSTEMS", Style::default().fg(theme::TEXT_MUTED).bold()),
        ]),
    ];

    let map = state.statuses.map();
    let key_width = map.keys().map(|k| k.chars().count()).max().unwrap_or(0).min(width / 2);
    for (key, status) in map {
        let name = truncate_string(key, key_width);
        let pad = key_width.saturating_sub(name.chars().count());
        let status_width = width.saturating_sub(key_width + 3);
        lines.push(Line::from(vec![
            Span::styled("  ", base_style),
            Span::styled("● ", Style::default().fg(status_color(status))),
            Span::styled(format!("{}{} ", name, " ".repeat(pad)), Style::default().fg(theme::TEXT_SECONDARY)),
            Span::styled(truncate_string(status, status_width), Style::default().fg(status_color(status)).bold()),
        ]));
    }

    lines.push(Line::from(""));
    let (narration, narration_color) = if !state.narrator.is_supported() {
        ("UNAVAILABLE", theme::TEXT_MUTED)
    } else if state.narrator.is_muted() {
        ("OFF", theme::WARNING)
    } else {
        ("ON", theme::SUCCESS)
    };
    lines.push(Line::from(vec![
        Span::styled("  ", base_style),
        Span::styled("VOICE ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled(narration, Style::default().fg(narration_color)),
    ]));

    frame.render_widget(Paragraph::new(lines).style(base_style), sidebar_layout[0]);

    // Help hints
    let hint = |key: &'static str, label: &'static str| {
        Line::from(vec![
            Span::styled("  ", base_style),
            Span::styled(key, Style::default().fg(theme::ACCENT)),
            Span::styled(label, Style::default().fg(theme::TEXT_MUTED)),
        ])
    };
    let help = vec![
        hint("Enter   ", "send command"),
        hint("Ctrl+R  ", "reboot"),
        hint("Ctrl+T  ", "toggle voice"),
        hint("↑↓ PgUp ", "scroll log"),
        hint("Ctrl+Q  ", "quit"),
    ];
    let help_block = Block::default().borders(Borders::TOP).border_style(Style::default().fg(theme::BORDER)).style(base_style);
    frame.render_widget(Paragraph::new(help).block(help_block), sidebar_layout[1]);
}
