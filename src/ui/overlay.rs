//! Full-screen briefing and centered game-over overlay.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use md_base::difficulty::Difficulty;
use md_base::timer::format_clock;

use super::theme;
use crate::state::State;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(area.x + (area.width - w) / 2, area.y + (area.height - h) / 2, w, h)
}

pub fn render_briefing(frame: &mut Frame, state: &State, area: Rect) {
    let rect = centered(area, 64, 18);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::ACCENT))
        .style(Style::default().bg(theme::BG_SURFACE))
        .title(Span::styled(" ISV MERIDIAN // EMERGENCY WAKE ", Style::default().fg(theme::ACCENT).bold()));

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Cascade failure detected. The reactor breaches in ten minutes.",
            Style::default().fg(theme::TEXT),
        )),
        Line::from(Span::styled(
            "Talk the ship computer through the repairs before it does.",
            Style::default().fg(theme::TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(Span::styled("SELECT RANK", Style::default().fg(theme::TEXT_MUTED).bold())),
    ];

    for (i, d) in Difficulty::ALL.iter().enumerate() {
        let selected = *d == state.difficulty;
        let marker = if selected { "▸" } else { " " };
        let style =
            if selected { Style::default().fg(theme::BG_BASE).bg(theme::ACCENT).bold() } else { Style::default().fg(theme::TEXT) };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), Style::default().fg(theme::ACCENT)),
            Span::styled(format!(" {} {} ", i + 1, d.label()), style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(state.difficulty.hint(), Style::default().fg(theme::TEXT_MUTED).italic())));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("1/2/3 ←/→ ", Style::default().fg(theme::ACCENT)),
        Span::styled("choose   ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled("Enter ", Style::default().fg(theme::ACCENT)),
        Span::styled("wake the ship   ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled("Ctrl+Q ", Style::default().fg(theme::ACCENT)),
        Span::styled("quit", Style::default().fg(theme::TEXT_MUTED)),
    ]));

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        rect,
    );
}

pub fn render_game_over(frame: &mut Frame, state: &State, area: Rect) {
    let Some(session) = state.session.as_ref().filter(|s| s.over) else {
        return;
    };
    let (title, color, detail) = if session.victory {
        (
            " MISSION SUCCESS ",
            theme::SUCCESS,
            format!("Systems stabilized with {} on the clock.", format_clock(state.countdown.remaining())),
        )
    } else {
        (" SHIP LOST ", theme::ERROR, "The reactor breached. All hands lost.".to_string())
    };

    let rect = centered(area, 48, 7);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::BG_ELEVATED))
        .title(Span::styled(title, Style::default().fg(color).bold()))
        .title_alignment(Alignment::Center);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(detail, Style::default().fg(theme::TEXT))),
        Line::from(""),
        Line::from(Span::styled("Ctrl+R reboot   Ctrl+Q quit", Style::default().fg(theme::TEXT_MUTED))),
    ];

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block).alignment(Alignment::Center), rect);
}
