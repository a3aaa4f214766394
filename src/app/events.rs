use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use md_base::constants::{SCROLL_ARROW_AMOUNT, SCROLL_PAGE_AMOUNT};
use md_base::difficulty::Difficulty;

use crate::app::actions::Action;
use crate::state::State;

/// Map a terminal event to an action. `None` means quit.
pub fn handle_event(event: &Event, state: &State) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            // Global Ctrl shortcuts (always handled first)
            if ctrl {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('c') => return None,
                    KeyCode::Char('r') => return Some(Action::Reboot),
                    KeyCode::Char('t') => return Some(Action::ToggleNarration),
                    _ => return Some(Action::None),
                }
            }

            if state.session.is_none() {
                return Some(handle_briefing_key(key));
            }

            let action = match key.code {
                KeyCode::Up => Action::ScrollUp(SCROLL_ARROW_AMOUNT),
                KeyCode::Down => Action::ScrollDown(SCROLL_ARROW_AMOUNT),
                KeyCode::PageUp => Action::ScrollUp(SCROLL_PAGE_AMOUNT),
                KeyCode::PageDown => Action::ScrollDown(SCROLL_PAGE_AMOUNT),
                _ if state.is_over() => Action::None,
                KeyCode::Enter => Action::InputSubmit,
                KeyCode::Char(c) => Action::InputChar(c),
                KeyCode::Backspace => Action::InputBackspace,
                KeyCode::Delete => Action::InputDelete,
                KeyCode::Left => Action::CursorLeft,
                KeyCode::Right => Action::CursorRight,
                KeyCode::Home => Action::CursorHome,
                KeyCode::End => Action::CursorEnd,
                _ => Action::None,
            };
            Some(action)
        }
        // Terminals may send \r\n or \r inside pastes
        Event::Paste(text) if state.session.as_ref().is_some_and(|s| s.is_active()) => {
            Some(Action::PasteText(text.replace("\r\n", "\n").replace('\r', "\n")))
        }
        Event::Resize(_, _) => Some(Action::ScrollDown(0)),
        _ => Some(Action::None),
    }
}

fn handle_briefing_key(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char(c) => match Difficulty::parse(&c.to_string()) {
            Some(d) => Action::SelectDifficulty(d),
            None => Action::None,
        },
        KeyCode::Left | KeyCode::Up => Action::PrevDifficulty,
        KeyCode::Right | KeyCode::Down | KeyCode::Tab => Action::NextDifficulty,
        KeyCode::Enter => Action::StartGame,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::actions::test_support::state;
    use crate::app::actions::{apply_session_event, apply_tick, begin_session};
    use crate::llms::{SessionEvent, StreamEvent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn ctrl_q_quits() {
        assert_eq!(handle_event(&ctrl('q'), &state()), None);
    }

    #[test]
    fn global_shortcuts() {
        let s = state();
        assert_eq!(handle_event(&ctrl('r'), &s), Some(Action::Reboot));
        assert_eq!(handle_event(&ctrl('t'), &s), Some(Action::ToggleNarration));
    }

    #[test]
    fn briefing_keys_choose_difficulty() {
        let s = state();
        assert_eq!(handle_event(&key(KeyCode::Char('3')), &s), Some(Action::SelectDifficulty(Difficulty::Hard)));
        assert_eq!(handle_event(&key(KeyCode::Left), &s), Some(Action::PrevDifficulty));
        assert_eq!(handle_event(&key(KeyCode::Enter), &s), Some(Action::StartGame));
        assert_eq!(handle_event(&key(KeyCode::Char('x')), &s), Some(Action::None));
    }

    #[test]
    fn playing_keys_edit_input_and_scroll() {
        let mut s = state();
        begin_session(&mut s, 1, Difficulty::Normal);
        assert_eq!(handle_event(&key(KeyCode::Char('3')), &s), Some(Action::InputChar('3')));
        assert_eq!(handle_event(&key(KeyCode::Enter), &s), Some(Action::InputSubmit));
        assert_eq!(handle_event(&key(KeyCode::PageUp), &s), Some(Action::ScrollUp(SCROLL_PAGE_AMOUNT)));
    }

    #[test]
    fn game_over_ignores_typing() {
        let mut s = state();
        begin_session(&mut s, 1, Difficulty::Normal);
        apply_session_event(&mut s, SessionEvent { generation: 1, event: StreamEvent::Done });
        while !apply_tick(&mut s) {}
        assert_eq!(handle_event(&key(KeyCode::Char('a')), &s), Some(Action::None));
        assert_eq!(handle_event(&key(KeyCode::Up), &s), Some(Action::ScrollUp(SCROLL_ARROW_AMOUNT)));
    }
}
