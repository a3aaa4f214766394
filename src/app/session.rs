//! Chat session controller: owns the conversation with the ship computer.

use std::sync::Arc;
use std::sync::mpsc::Sender;

use md_base::config::prompts;
use md_base::difficulty::Difficulty;
use md_base::timer::format_clock;

use crate::llms::{ChatMessage, ChatRole, LlmClient, LlmRequest, SessionEvent, StreamSink, start_streaming};

/// Opening request for a fresh session.
pub fn opening_message(difficulty: Difficulty) -> String {
    prompts::opening_template()
        .replace("{difficulty}", difficulty.label())
        .replace("{difficulty_hint}", difficulty.hint())
}

/// Follow-up turn carrying the command plus clock and difficulty context.
pub fn turn_message(command: &str, remaining: u32, difficulty: Difficulty) -> String {
    prompts::turn_template()
        .replace("{command}", command.trim())
        .replace("{time}", &format_clock(remaining))
        .replace("{difficulty}", difficulty.label())
}

pub struct SessionController {
    client: Arc<dyn LlmClient>,
    model: String,
    tx: Sender<SessionEvent>,
    generation: u64,
    /// User turns and completed model turns, oldest first
    history: Vec<ChatMessage>,
}

impl SessionController {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>, tx: Sender<SessionEvent>) -> Self {
        Self { client, model: model.into(), tx, generation: 0, history: Vec::new() }
    }

    #[cfg(test)]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Begin a new conversation and request the opening status report.
    /// Returns the generation that tags its events.
    pub fn start(&mut self, difficulty: Difficulty) -> u64 {
        self.end();
        tracing::info!(generation = self.generation, difficulty = difficulty.label(), "session started");
        self.history.push(ChatMessage::user(opening_message(difficulty)));
        self.dispatch();
        self.generation
    }

    /// Send one engineer command.
    pub fn send(&mut self, command: &str, remaining: u32, difficulty: Difficulty) {
        tracing::info!(generation = self.generation, remaining, "turn sent");
        self.history.push(ChatMessage::user(turn_message(command, remaining, difficulty)));
        self.dispatch();
    }

    /// Record the full text of a completed model turn.
    pub fn complete_turn(&mut self, text: &str) {
        self.history.push(ChatMessage::assistant(text));
    }

    /// Forget the user turn that never got an answer, so a retry does not
    /// stack two user turns back to back.
    pub fn fail_turn(&mut self) {
        if self.history.last().is_some_and(|m| m.role == ChatRole::User) {
            self.history.pop();
        }
    }

    /// Drop the conversation. Events still arriving for it carry a stale generation.
    pub fn end(&mut self) {
        self.generation += 1;
        self.history.clear();
    }

    fn dispatch(&self) {
        let request = LlmRequest {
            model: self.model.clone(),
            system_prompt: prompts::preamble().to_string(),
            messages: self.history.clone(),
        };
        start_streaming(self.client.clone(), request, StreamSink::new(self.generation, self.tx.clone()));
    }
}
