use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::{helpers::spinner, theme};
use crate::state::State;

pub fn render_input(frame: &mut Frame, state: &State, area: Rect) {
    let enabled = state.input_enabled();
    let border_color = if enabled { theme::BORDER_FOCUS } else { theme::TEXT_MUTED };
    let title = if state.is_over() {
        " Session over "
    } else if state.is_streaming() {
        " Link busy... "
    } else {
        " Command "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme::BG_INPUT))
        .title(Span::styled(title, Style::default().fg(if enabled { theme::ACCENT } else { theme::TEXT_MUTED })));

    let content_area = block.inner(area);
    frame.render_widget(block, area);

    let content = if state.input.is_empty() {
        let placeholder = if state.is_over() {
            " Ctrl+R to reboot the simulation"
        } else {
            " Give the ship an order..."
        };
        Line::from(Span::styled(placeholder, Style::default().fg(theme::TEXT_MUTED).italic()))
    } else {
        Line::from(vec![Span::raw(" "), Span::styled(state.input.as_str(), Style::default().fg(theme::TEXT))])
    };

    // Keep the cursor visible on long commands
    let cursor_col = state.input[..state.input_cursor].width() as u16;
    let visible = content_area.width.saturating_sub(2);
    let h_scroll = cursor_col.saturating_sub(visible);

    frame.render_widget(
        Paragraph::new(content).style(Style::default().bg(theme::BG_INPUT)).scroll((0, h_scroll)),
        content_area,
    );

    if !state.is_over() {
        frame.set_cursor_position(Position::new(content_area.x + 1 + cursor_col - h_scroll, content_area.y));
    }
}

pub fn render_status_bar(frame: &mut Frame, state: &State, area: Rect) {
    let base_style = Style::default().bg(theme::BG_BASE).fg(theme::TEXT_MUTED);

    let mut spans = vec![Span::styled(" ", base_style)];

    let badge = match &state.session {
        None => (" BRIEFING ".to_string(), theme::TEXT_MUTED),
        Some(s) if s.over && s.victory => (" MISSION SUCCESS ".to_string(), theme::SUCCESS),
        Some(s) if s.over => (" SHIP LOST ".to_string(), theme::ERROR),
        Some(s) if s.streaming => (format!(" {} RECEIVING ", spinner(state.spinner_frame)), theme::SUCCESS),
        Some(_) => (" READY ".to_string(), theme::TEXT_MUTED),
    };
    spans.push(Span::styled(badge.0, Style::default().fg(theme::BG_BASE).bg(badge.1).bold()));
    spans.push(Span::styled(" ", base_style));

    spans.push(Span::styled(
        format!(" {} ", state.provider_name),
        Style::default().fg(theme::BG_BASE).bg(theme::ACCENT_DIM).bold(),
    ));
    spans.push(Span::styled(" ", base_style));
    spans.push(Span::styled(format!(" {} ", state.model), Style::default().fg(theme::TEXT).bg(theme::BG_ELEVATED)));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base_style), area);
}
