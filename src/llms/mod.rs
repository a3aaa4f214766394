//! LLM provider abstraction layer.
//!
//! One operation: open a conversation under a fixed preamble and stream the
//! reply to a turn as text fragments. Providers run on a worker thread and
//! push fragments through a [`StreamSink`].

pub mod anthropic;
pub mod error;
pub mod openai_compat;
#[cfg(test)]
pub mod scripted;

use std::env;
use std::sync::Arc;
use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

pub use error::LlmError;

/// Events emitted during streaming
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Text fragment, in arrival order
    Chunk(String),
    /// Stream completed
    Done,
    /// Stream failed; no more events follow
    Error(String),
}

/// A stream event tagged with the session generation that requested it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub generation: u64,
    pub event: StreamEvent,
}

/// Sending half handed to a provider for one turn.
#[derive(Debug, Clone)]
pub struct StreamSink {
    generation: u64,
    tx: Sender<SessionEvent>,
}

impl StreamSink {
    pub fn new(generation: u64, tx: Sender<SessionEvent>) -> Self {
        Self { generation, tx }
    }

    /// Returns false once the receiving app is gone.
    pub fn send(&self, event: StreamEvent) -> bool {
        self.tx.send(SessionEvent { generation: self.generation, event }).is_ok()
    }
}

/// Available LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Anthropic,
    Grok,
    Groq,
    DeepSeek,
}

impl LlmProvider {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Some(LlmProvider::Anthropic),
            "grok" | "xai" => Some(LlmProvider::Grok),
            "groq" => Some(LlmProvider::Groq),
            "deepseek" => Some(LlmProvider::DeepSeek),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "Claude",
            LlmProvider::Grok => "Grok",
            LlmProvider::Groq => "Groq",
            LlmProvider::DeepSeek => "DeepSeek",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "claude-sonnet-4-5",
            LlmProvider::Grok => "grok-4-1-fast",
            LlmProvider::Groq => "llama-3.3-70b-versatile",
            LlmProvider::DeepSeek => "deepseek-chat",
        }
    }

    pub fn api_key_var(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
            LlmProvider::Grok => "XAI_API_KEY",
            LlmProvider::Groq => "GROQ_API_KEY",
            LlmProvider::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the conversation history sent with every turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

/// Configuration for one streamed turn
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub model: String,
    pub system_prompt: String,
    /// Full history, oldest first, ending with the user turn to answer
    pub messages: Vec<ChatMessage>,
}

/// Trait for LLM providers
pub trait LlmClient: Send + Sync {
    /// Stream the reply to `request` into `sink`, ending with [`StreamEvent::Done`].
    /// Blocks until the stream ends.
    fn stream(&self, request: &LlmRequest, sink: &StreamSink) -> Result<(), LlmError>;
}

/// Get the appropriate LLM client for the given provider
pub fn get_client(provider: LlmProvider) -> Arc<dyn LlmClient> {
    dotenvy::dotenv().ok();
    let api_key = env::var(provider.api_key_var()).ok().filter(|k| !k.trim().is_empty());
    match provider {
        LlmProvider::Anthropic => Arc::new(anthropic::AnthropicClient::new(api_key)),
        other => Arc::new(openai_compat::OpenAiCompatClient::new(other, api_key)),
    }
}

/// Stream one turn on a background thread. Failures arrive as
/// [`StreamEvent::Error`] on the sink.
pub fn start_streaming(client: Arc<dyn LlmClient>, request: LlmRequest, sink: StreamSink) {
    std::thread::spawn(move || {
        if let Err(e) = client.stream(&request, &sink) {
            tracing::error!(error = %e, model = %request.model, "model stream failed");
            sink.send(StreamEvent::Error(e.to_string()));
        }
    });
}
