use crate::state::{Message, State};

use super::ActionResult;

pub fn insert_char(state: &mut State, c: char) {
    state.input.insert(state.input_cursor, c);
    state.input_cursor += c.len_utf8();
}

pub fn backspace(state: &mut State) {
    if let Some(c) = state.input[..state.input_cursor].chars().next_back() {
        state.input_cursor -= c.len_utf8();
        state.input.remove(state.input_cursor);
    }
}

pub fn delete(state: &mut State) {
    if state.input_cursor < state.input.len() {
        state.input.remove(state.input_cursor);
    }
}

pub fn cursor_left(state: &mut State) {
    if let Some(c) = state.input[..state.input_cursor].chars().next_back() {
        state.input_cursor -= c.len_utf8();
    }
}

pub fn cursor_right(state: &mut State) {
    if let Some(c) = state.input[state.input_cursor..].chars().next() {
        state.input_cursor += c.len_utf8();
    }
}

/// Handle InputSubmit action: echo the command and open an empty model
/// message for the reply to stream into.
pub fn handle_input_submit(state: &mut State) -> ActionResult {
    if !state.input_enabled() || state.input.trim().is_empty() {
        return ActionResult::Nothing;
    }
    let Some(session) = state.session.as_mut() else {
        return ActionResult::Nothing;
    };
    let command = std::mem::take(&mut state.input).trim().to_string();
    state.input_cursor = 0;
    session.streaming = true;
    session.turn_text.clear();

    state.messages.push(Message::user(command.clone()));
    state.messages.push(Message::model(""));
    state.user_scrolled = false;
    state.dirty = true;
    ActionResult::SendCommand(command)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::state;
    use super::super::{Action, apply_action, begin_session};
    use super::*;
    use crate::llms::StreamEvent;
    use crate::state::Role;
    use md_base::difficulty::Difficulty;

    fn playing() -> State {
        let mut s = state();
        begin_session(&mut s, 1, Difficulty::Normal);
        super::super::apply_session_event(
            &mut s,
            crate::llms::SessionEvent { generation: 1, event: StreamEvent::Done },
        );
        s
    }

    fn type_text(s: &mut State, text: &str) {
        for c in text.chars() {
            apply_action(s, Action::InputChar(c));
        }
    }

    #[test]
    fn editing_respects_multibyte_chars() {
        let mut s = state();
        type_text(&mut s, "Δv+");
        apply_action(&mut s, Action::CursorLeft);
        apply_action(&mut s, Action::CursorLeft);
        apply_action(&mut s, Action::InputBackspace);
        assert_eq!(s.input, "v+");
        assert_eq!(s.input_cursor, 0);
        apply_action(&mut s, Action::InputDelete);
        assert_eq!(s.input, "+");
        apply_action(&mut s, Action::CursorEnd);
        assert_eq!(s.input_cursor, 1);
    }

    #[test]
    fn submit_echoes_and_opens_reply() {
        let mut s = playing();
        type_text(&mut s, "  seal the breach ");
        let result = apply_action(&mut s, Action::InputSubmit);
        assert_eq!(result, ActionResult::SendCommand("seal the breach".into()));
        assert!(s.input.is_empty());
        assert!(s.is_streaming());

        let n = s.messages.len();
        assert_eq!(s.messages[n - 2].role, Role::User);
        assert_eq!(s.messages[n - 2].content, "seal the breach");
        assert_eq!(s.messages[n - 1].role, Role::Model);
        assert!(s.messages[n - 1].content.is_empty());
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut s = playing();
        type_text(&mut s, "   ");
        assert_eq!(apply_action(&mut s, Action::InputSubmit), ActionResult::Nothing);
    }

    #[test]
    fn submit_blocked_while_streaming() {
        let mut s = state();
        begin_session(&mut s, 1, Difficulty::Normal);
        type_text(&mut s, "hello");
        assert_eq!(apply_action(&mut s, Action::InputSubmit), ActionResult::Nothing);
        assert_eq!(s.input, "hello");
    }

    #[test]
    fn submit_blocked_without_session() {
        let mut s = state();
        type_text(&mut s, "hello");
        assert_eq!(apply_action(&mut s, Action::InputSubmit), ActionResult::Nothing);
    }
}
