use serde_json::Value;

use md_base::constants::SESSION_SECONDS;
use md_base::difficulty::Difficulty;
use md_base::status::StatusStore;
use md_base::timer::Countdown;
use md_mod_speech::Narrator;

use super::{GameSession, Message};

/// Runtime state owned by the UI thread
pub struct State {
    /// `None` while the briefing screen is shown
    pub session: Option<GameSession>,
    /// Difficulty picked on the briefing screen
    pub difficulty: Difficulty,
    pub messages: Vec<Message>,
    pub input: String,
    /// Byte offset into `input`
    pub input_cursor: usize,
    pub statuses: StatusStore,
    /// Latest payload extracted from a completed model turn
    pub payload: Option<Value>,
    pub countdown: Countdown,
    pub narrator: Narrator,
    pub provider_name: String,
    pub model: String,
    pub scroll_offset: f32,
    pub max_scroll: f32,
    pub user_scrolled: bool,
    /// Something changed since the last frame
    pub dirty: bool,
    pub spinner_frame: u64,
}

impl State {
    pub fn new(statuses: StatusStore, narrator: Narrator, difficulty: Difficulty) -> Self {
        Self {
            session: None,
            difficulty,
            messages: Vec::new(),
            input: String::new(),
            input_cursor: 0,
            statuses,
            payload: None,
            countdown: Countdown::new(SESSION_SECONDS),
            narrator,
            provider_name: String::new(),
            model: String::new(),
            scroll_offset: 0.0,
            max_scroll: 0.0,
            user_scrolled: false,
            dirty: true,
            spinner_frame: 0,
        }
    }

    pub fn with_labels(mut self, provider_name: &str, model: &str) -> Self {
        self.provider_name = provider_name.to_string();
        self.model = model.to_string();
        self
    }

    pub fn is_streaming(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.streaming)
    }

    pub fn input_enabled(&self) -> bool {
        self.session.as_ref().is_some_and(GameSession::input_enabled)
    }

    pub fn is_over(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.over)
    }
}
