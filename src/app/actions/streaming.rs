use md_base::applier::apply_payload;
use md_base::config::prompts;
use md_base::difficulty::Difficulty;
use md_base::payload::extract_payload;
use md_base::timer::Tick;

use crate::llms::{SessionEvent, StreamEvent};
use crate::state::{GameSession, Message, MessageKind, State};

/// What the app loop must tell the session controller after an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Stale or superseded event, nothing changed
    Ignored,
    /// A fragment was shown
    Streaming,
    /// The turn finished with this full text
    Completed(String),
    /// The turn failed and a link-failure message was shown
    Failed,
}

/// Fresh session: empty transcript, clock started, waiting on the opening turn.
pub fn begin_session(state: &mut State, generation: u64, difficulty: Difficulty) {
    state.session = Some(GameSession::new(generation, difficulty));
    state.difficulty = difficulty;
    state.messages.clear();
    state.messages.push(Message::model(""));
    state.payload = None;
    state.input.clear();
    state.input_cursor = 0;
    state.scroll_offset = 0.0;
    state.user_scrolled = false;
    state.countdown.start();
    state.dirty = true;
}

/// Discard the session and return to the briefing screen. The status map
/// survives.
pub fn reboot(state: &mut State) {
    state.countdown.stop();
    state.countdown.reset();
    state.narrator.silence();
    state.session = None;
    state.messages.clear();
    state.payload = None;
    state.input.clear();
    state.input_cursor = 0;
    state.scroll_offset = 0.0;
    state.user_scrolled = false;
    state.dirty = true;
    tracing::info!("session rebooted");
}

pub fn apply_session_event(state: &mut State, evt: SessionEvent) -> TurnOutcome {
    let Some(session) = state.session.as_mut() else {
        return TurnOutcome::Ignored;
    };
    if !session.accepts(evt.generation) {
        tracing::debug!(generation = evt.generation, current = session.generation, "dropped stale stream event");
        return TurnOutcome::Ignored;
    }
    state.dirty = true;

    match evt.event {
        StreamEvent::Chunk(text) => {
            session.turn_text.push_str(&text);
            let cumulative = session.turn_text.clone();
            replace_trailing_model(state, Message::model(cumulative));
            TurnOutcome::Streaming
        }
        StreamEvent::Done => {
            session.streaming = false;
            let text = std::mem::take(&mut session.turn_text);
            replace_trailing_model(state, Message::model(text.clone()));
            handle_stream_done(state, &text);
            TurnOutcome::Completed(text)
        }
        StreamEvent::Error(error) => {
            session.streaming = false;
            session.turn_text.clear();
            replace_trailing_model(state, Message::link_failure(prompts::link_failure(&error)));
            TurnOutcome::Failed
        }
    }
}

/// Completed turn: payload, statuses, victory, narration.
fn handle_stream_done(state: &mut State, text: &str) {
    if let Some(payload) = extract_payload(text) {
        let applied = apply_payload(&payload, &mut state.statuses);
        tracing::debug!(applied, "status payload applied");
        state.payload = Some(payload);
    }

    if contains_victory_marker(text)
        && let Some(session) = state.session.as_mut()
        && session.finish(true)
    {
        state.countdown.stop();
        tracing::info!(remaining = state.countdown.remaining(), "mission success");
    }

    state.narrator.narrate(text);
}

pub fn contains_victory_marker(text: &str) -> bool {
    text.to_lowercase().contains(&prompts::victory_marker().to_lowercase())
}

/// Replace the model message at the end of the transcript, or append one.
fn replace_trailing_model(state: &mut State, msg: Message) {
    match state.messages.last_mut() {
        Some(last) if last.is_model() && last.kind == MessageKind::Text => {
            last.content = msg.content;
            last.kind = msg.kind;
        }
        _ => state.messages.push(msg),
    }
}

/// One elapsed second. Returns true when this tick ended the game.
pub fn apply_tick(state: &mut State) -> bool {
    match state.countdown.tick() {
        Tick::Remaining(_) => {
            state.dirty = true;
            false
        }
        Tick::Expired => {
            state.dirty = true;
            let Some(session) = state.session.as_mut() else {
                return false;
            };
            if !session.finish(false) {
                return false;
            }
            state.narrator.silence();
            tracing::info!(generation = session.generation, "clock expired, ship lost");
            true
        }
        Tick::Inactive => false,
    }
}
