//! OpenAI-compatible chat completions client.
//!
//! Grok, Groq, and DeepSeek all speak the same streaming format; only the
//! endpoint and key differ.

use std::io::{BufRead, BufReader};

use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretBox};
use serde::{Deserialize, Serialize};

use md_base::constants::MAX_RESPONSE_TOKENS;

use super::error::LlmError;
use super::{ChatRole, LlmClient, LlmProvider, LlmRequest, StreamEvent, StreamSink};

const GROK_API_ENDPOINT: &str = "https://api.x.ai/v1/chat/completions";
const GROQ_API_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEEPSEEK_API_ENDPOINT: &str = "https://api.deepseek.com/chat/completions";

/// OpenAI-compatible chat message.
#[derive(Debug, Clone, Serialize)]
pub struct OaiMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct OaiRequest {
    model: String,
    messages: Vec<OaiMessage>,
    max_tokens: u32,
    stream: bool,
}

/// Parsed SSE streaming response.
#[derive(Debug, Deserialize)]
pub struct StreamResponse {
    pub choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
pub struct StreamChoice {
    pub delta: Option<StreamDelta>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StreamDelta {
    pub content: Option<String>,
}

/// Process a single SSE line, returning parsed StreamResponse if valid.
pub fn parse_sse_line(line: &str) -> Option<StreamResponse> {
    let json_str = line.strip_prefix("data: ")?;
    if json_str == "[DONE]" {
        return None;
    }
    serde_json::from_str(json_str).ok()
}

/// System preamble first, then the conversation.
pub fn build_messages(request: &LlmRequest) -> Vec<OaiMessage> {
    let mut out = Vec::with_capacity(request.messages.len() + 1);
    out.push(OaiMessage { role: "system", content: request.system_prompt.clone() });
    out.extend(request.messages.iter().map(|m| OaiMessage {
        role: match m.role {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        },
        content: m.content.clone(),
    }));
    out
}

pub struct OpenAiCompatClient {
    provider: LlmProvider,
    api_key: Option<SecretBox<String>>,
}

impl OpenAiCompatClient {
    pub fn new(provider: LlmProvider, api_key: Option<String>) -> Self {
        Self { provider, api_key: api_key.map(|k| SecretBox::new(Box::new(k))) }
    }

    fn endpoint(&self) -> &'static str {
        match self.provider {
            LlmProvider::Groq => GROQ_API_ENDPOINT,
            LlmProvider::DeepSeek => DEEPSEEK_API_ENDPOINT,
            _ => GROK_API_ENDPOINT,
        }
    }
}

impl LlmClient for OpenAiCompatClient {
    fn stream(&self, request: &LlmRequest, sink: &StreamSink) -> Result<(), LlmError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| LlmError::Auth(format!("{} not set", self.provider.api_key_var())))?;

        let client = Client::builder().timeout(None).build()?;

        let api_request = OaiRequest {
            model: request.model.clone(),
            messages: build_messages(request),
            max_tokens: MAX_RESPONSE_TOKENS,
            stream: true,
        };

        let response = client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", api_key.expose_secret()))
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let reader = BufReader::new(response);
        for line in reader.lines() {
            let line = line.map_err(|e| LlmError::StreamRead(e.to_string()))?;
            let Some(resp) = parse_sse_line(&line) else {
                continue;
            };
            for choice in resp.choices {
                if let Some(content) = choice.delta.and_then(|d| d.content)
                    && !content.is_empty()
                    && !sink.send(StreamEvent::Chunk(content))
                {
                    return Ok(());
                }
            }
        }

        sink.send(StreamEvent::Done);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llms::ChatMessage;

    #[test]
    fn parses_content_delta() {
        let line = r#"data: {"id":"x","choices":[{"index":0,"delta":{"content":"Reactor"},"finish_reason":null}]}"#;
        let resp = parse_sse_line(line).unwrap();
        assert_eq!(resp.choices[0].delta.as_ref().unwrap().content.as_deref(), Some("Reactor"));
    }

    #[test]
    fn done_marker_and_noise_are_ignored() {
        assert!(parse_sse_line("data: [DONE]").is_none());
        assert!(parse_sse_line(": keep-alive").is_none());
        assert!(parse_sse_line("data: not json").is_none());
    }

    #[test]
    fn finish_reason_without_delta() {
        let resp = parse_sse_line(r#"data: {"choices":[{"delta":{},"finish_reason":"stop"}]}"#).unwrap();
        assert_eq!(resp.choices[0].finish_reason.as_deref(), Some("stop"));
        assert!(resp.choices[0].delta.as_ref().unwrap().content.is_none());
    }

    #[test]
    fn system_prompt_leads_messages() {
        let request = LlmRequest {
            model: "m".into(),
            system_prompt: "be the ship".into(),
            messages: vec![ChatMessage::user("report"), ChatMessage::assistant("ok")],
        };
        let msgs = build_messages(&request);
        let roles: Vec<_> = msgs.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec!["system", "user", "assistant"]);
        assert_eq!(msgs[0].content, "be the ship");
    }

    #[test]
    fn endpoint_per_provider() {
        assert_eq!(OpenAiCompatClient::new(LlmProvider::Groq, None).endpoint(), GROQ_API_ENDPOINT);
        assert_eq!(OpenAiCompatClient::new(LlmProvider::DeepSeek, None).endpoint(), DEEPSEEK_API_ENDPOINT);
        assert_eq!(OpenAiCompatClient::new(LlmProvider::Grok, None).endpoint(), GROK_API_ENDPOINT);
    }
}
