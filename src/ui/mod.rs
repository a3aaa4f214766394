mod conversation;
pub mod helpers;
mod input;
pub mod inspector;
mod overlay;
mod sidebar;
pub mod theme;

use ratatui::{prelude::*, widgets::Block};

use md_base::constants::SIDEBAR_WIDTH;

use crate::state::State;

pub fn render(frame: &mut Frame, state: &mut State) {
    let area = frame.area();

    // Fill base background
    frame.render_widget(Block::default().style(Style::default().bg(theme::BG_BASE)), area);

    // Main layout: body + footer (no header)
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    if state.session.is_none() {
        overlay::render_briefing(frame, state, main_layout[0]);
    } else {
        render_body(frame, state, main_layout[0]);
        overlay::render_game_over(frame, state, main_layout[0]);
    }
    input::render_status_bar(frame, state, main_layout[1]);
}

fn render_body(frame: &mut Frame, state: &mut State, area: Rect) {
    // Body layout: sidebar + main content
    let body_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH), // Sidebar
            Constraint::Min(1),                // Main content
        ])
        .split(area);

    sidebar::render_sidebar(frame, state, body_layout[0]);
    render_main_content(frame, state, body_layout[1]);
}

fn render_main_content(frame: &mut Frame, state: &mut State, area: Rect) {
    // Inspector takes a side column when there is room, otherwise a strip below the log
    let wide = area.width >= 100;
    let content_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Log + inspector
            Constraint::Length(3), // Input area
        ])
        .split(area);

    let panes = if wide {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(38)])
            .split(content_layout[0])
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(10)])
            .split(content_layout[0])
    };

    conversation::render_conversation(frame, state, panes[0]);
    inspector::render_inspector(frame, state, panes[1]);
    input::render_input(frame, state, content_layout[1]);
}
