//! Action handling split into domain-focused modules.
//!
//! - `input`: input editing and command submission
//! - `streaming`: session start/reboot, stream events, clock ticks

pub mod input;
pub mod streaming;

pub use streaming::{TurnOutcome, apply_session_event, apply_tick, begin_session, reboot};

use md_base::difficulty::Difficulty;

use crate::state::State;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    InputChar(char),
    InputBackspace,
    InputDelete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    PasteText(String),
    InputSubmit,
    SelectDifficulty(Difficulty),
    NextDifficulty,
    PrevDifficulty,
    StartGame,
    Reboot,
    ToggleNarration,
    ScrollUp(u16),
    ScrollDown(u16),
    None,
}

/// Side effects the app loop performs after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Nothing,
    StartSession(Difficulty),
    SendCommand(String),
    Reboot,
}

pub fn apply_action(state: &mut State, action: Action) -> ActionResult {
    match action {
        Action::InputChar(c) => input::insert_char(state, c),
        Action::PasteText(text) => {
            // Commands are single-line
            for c in text.chars().map(|c| if c == '\n' { ' ' } else { c }) {
                input::insert_char(state, c);
            }
        }
        Action::InputBackspace => input::backspace(state),
        Action::InputDelete => input::delete(state),
        Action::CursorLeft => input::cursor_left(state),
        Action::CursorRight => input::cursor_right(state),
        Action::CursorHome => state.input_cursor = 0,
        Action::CursorEnd => state.input_cursor = state.input.len(),
        Action::InputSubmit => return input::handle_input_submit(state),
        Action::SelectDifficulty(d) => {
            if state.session.is_none() {
                state.difficulty = d;
            }
        }
        Action::NextDifficulty => {
            if state.session.is_none() {
                state.difficulty = state.difficulty.next();
            }
        }
        Action::PrevDifficulty => {
            if state.session.is_none() {
                state.difficulty = state.difficulty.prev();
            }
        }
        Action::StartGame => {
            if state.session.is_none() {
                return ActionResult::StartSession(state.difficulty);
            }
        }
        Action::Reboot => {
            if state.session.is_some() {
                return ActionResult::Reboot;
            }
        }
        Action::ToggleNarration => state.narrator.toggle_mute(),
        Action::ScrollUp(amount) => {
            state.scroll_offset = (state.scroll_offset - amount as f32).max(0.0);
            state.user_scrolled = true;
        }
        Action::ScrollDown(amount) => {
            state.scroll_offset = (state.scroll_offset + amount as f32).min(state.max_scroll);
        }
        Action::None => return ActionResult::Nothing,
    }
    state.dirty = true;
    ActionResult::Nothing
}

#[cfg(test)]
pub(crate) mod test_support {
    use md_base::difficulty::Difficulty;
    use md_base::status::{MemoryKvStore, StatusStore};
    use md_mod_speech::Narrator;

    use crate::state::State;

    pub fn state() -> State {
        state_with(MemoryKvStore::new())
    }

    pub fn state_with(kv: MemoryKvStore) -> State {
        State::new(StatusStore::load(Box::new(kv)), Narrator::unsupported(), Difficulty::Normal)
    }
}
