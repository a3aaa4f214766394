use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};

use super::{helpers::*, theme};
use crate::state::{MessageKind, Role, State};

pub fn render_conversation(frame: &mut Frame, state: &mut State, area: Rect) {
    let base_style = Style::default().bg(theme::BG_SURFACE);
    let streaming = state.is_streaming();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(theme::BORDER))
        .style(base_style)
        .title(Span::styled(
            if streaming { " Ship Log ● " } else { " Ship Log " },
            Style::default().fg(theme::ACCENT).bold(),
        ))
        .title_alignment(Alignment::Left);

    let content_area = block.inner(area);
    frame.render_widget(block, area);

    let mut text: Vec<Line> = Vec::new();
    let last_index = state.messages.len().saturating_sub(1);

    for (idx, msg) in state.messages.iter().enumerate() {
        let is_streaming_this = streaming && idx == last_index && msg.role == Role::Model;
        if msg.content.trim().is_empty() && !is_streaming_this {
            continue;
        }

        let (role_icon, role_label, role_color) = match (msg.role, msg.kind) {
            (Role::User, _) => ("▸", "YOU", theme::USER),
            (Role::Model, MessageKind::LinkFailure) => ("✗", "LINK", theme::ERROR),
            (Role::Model, MessageKind::Text) => ("●", "SHIP", theme::MODEL),
        };
        let prefix = format!("{} {:<4} ", role_icon, role_label);
        let prefix_width = prefix.chars().count();
        let wrap_width = (content_area.width.saturating_sub(2) as usize).saturating_sub(prefix_width);
        let text_style = match msg.kind {
            MessageKind::LinkFailure => Style::default().fg(theme::ERROR).italic(),
            MessageKind::Text if msg.role == Role::User => Style::default().fg(theme::TEXT).bold(),
            MessageKind::Text => Style::default().fg(theme::TEXT),
        };

        let header = vec![
            Span::styled(format!("{} ", role_icon), Style::default().fg(role_color)),
            Span::styled(format!("{:<4}", role_label), Style::default().fg(role_color).bold()),
            Span::styled(" ", base_style),
        ];

        if msg.content.trim().is_empty() {
            // Thinking indicator
            let mut spans = header;
            spans.push(Span::styled(
                format!("{} receiving...", spinner(state.spinner_frame)),
                Style::default().fg(theme::TEXT_MUTED).italic(),
            ));
            text.push(Line::from(spans));
            text.push(Line::from(""));
            continue;
        }

        let mut is_first_line = true;
        let mut in_fence = false;
        for line in msg.content.lines() {
            let fence = line.trim_start().starts_with("```");
            let style = if in_fence || fence { Style::default().fg(theme::TEXT_MUTED) } else { text_style };
            if fence {
                in_fence = !in_fence;
            }
            let wrapped = if in_fence || fence { vec![line.to_string()] } else { wrap_text(line, wrap_width) };
            for wrapped_line in wrapped {
                let mut spans = if is_first_line {
                    is_first_line = false;
                    header.clone()
                } else {
                    vec![Span::styled(" ".repeat(prefix_width), base_style)]
                };
                spans.push(Span::styled(wrapped_line, style));
                text.push(Line::from(spans));
            }
        }

        if msg.role == Role::Model && !is_streaming_this {
            text.push(Line::from(vec![
                Span::styled(" ".repeat(prefix_width), base_style),
                Span::styled(msg.timestamp.format("%H:%M:%S").to_string(), Style::default().fg(theme::BG_ELEVATED)),
            ]));
        }
        text.push(Line::from(""));
    }

    // Padding at end for scroll
    text.push(Line::from(""));

    // Calculate scroll
    let viewport_width = content_area.width.saturating_sub(2) as usize;
    let viewport_height = content_area.height as usize;

    let content_height: usize = text
        .iter()
        .map(|line| {
            let char_count: usize = line.spans.iter().map(|span| span.content.chars().count()).sum();
            if char_count == 0 || viewport_width == 0 { 1 } else { char_count.div_ceil(viewport_width) }
        })
        .sum();

    let max_scroll = content_height.saturating_sub(viewport_height) as f32;
    state.max_scroll = max_scroll;

    if state.user_scrolled && state.scroll_offset >= max_scroll - 0.5 {
        state.user_scrolled = false;
    }
    if !state.user_scrolled {
        state.scroll_offset = max_scroll;
    }
    state.scroll_offset = state.scroll_offset.clamp(0.0, max_scroll);

    let paragraph = Paragraph::new(text)
        .style(base_style)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset.round() as u16, 0));

    frame.render_widget(paragraph, content_area);

    if content_height > viewport_height {
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .style(Style::default().fg(theme::BG_ELEVATED))
            .thumb_style(Style::default().fg(theme::ACCENT_DIM));

        let mut scrollbar_state =
            ScrollbarState::new(max_scroll as usize).position(state.scroll_offset.round() as usize);

        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin { horizontal: 0, vertical: 1 }),
            &mut scrollbar_state,
        );
    }
}
