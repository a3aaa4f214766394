//! Anthropic Claude API implementation.

use std::io::{BufRead, BufReader};

use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretBox};
use serde::{Deserialize, Serialize};

use md_base::constants::{API_ENDPOINT, API_VERSION, MAX_RESPONSE_TOKENS};

use super::error::LlmError;
use super::{ChatMessage, LlmClient, LlmRequest, StreamEvent, StreamSink};

/// Anthropic Claude client
pub struct AnthropicClient {
    api_key: Option<SecretBox<String>>,
}

impl AnthropicClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key: api_key.map(|k| SecretBox::new(Box::new(k))) }
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(rename = "type")]
    delta_type: Option<String>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamMessage {
    #[serde(rename = "type")]
    event_type: String,
    delta: Option<StreamDelta>,
    error: Option<StreamError>,
}

/// What one SSE line means for the turn
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SseLine {
    Text(String),
    Stop,
    Error(String),
    Skip,
}

pub(crate) fn parse_sse_line(line: &str) -> SseLine {
    let Some(json_str) = line.strip_prefix("data: ") else {
        return SseLine::Skip;
    };
    if json_str == "[DONE]" {
        return SseLine::Stop;
    }
    let Ok(event) = serde_json::from_str::<StreamMessage>(json_str) else {
        return SseLine::Skip;
    };
    match event.event_type.as_str() {
        "content_block_delta" => match event.delta {
            Some(StreamDelta { delta_type: Some(ref t), text: Some(text) }) if t == "text_delta" && !text.is_empty() => {
                SseLine::Text(text)
            }
            _ => SseLine::Skip,
        },
        "message_stop" => SseLine::Stop,
        "error" => SseLine::Error(
            event.error.and_then(|e| e.message).unwrap_or_else(|| "unknown stream error".to_string()),
        ),
        _ => SseLine::Skip,
    }
}

impl LlmClient for AnthropicClient {
    fn stream(&self, request: &LlmRequest, sink: &StreamSink) -> Result<(), LlmError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| LlmError::Auth("ANTHROPIC_API_KEY not set".into()))?;

        // timeout(None) keeps reqwest from cutting long SSE streams.
        let client = Client::builder().timeout(None).build()?;

        let api_request = AnthropicRequest {
            model: &request.model,
            max_tokens: MAX_RESPONSE_TOKENS,
            system: &request.system_prompt,
            messages: &request.messages,
            stream: true,
        };

        let response = client
            .post(API_ENDPOINT)
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&api_request)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let mut reader = BufReader::new(response);
        let mut line_count: usize = 0;
        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => line_count += 1,
                Err(e) => {
                    return Err(LlmError::StreamRead(format!("{} after {} lines", e, line_count)));
                }
            }
            match parse_sse_line(line.trim_end_matches(['\n', '\r'])) {
                SseLine::Text(text) => {
                    if !sink.send(StreamEvent::Chunk(text)) {
                        return Ok(());
                    }
                }
                SseLine::Stop => break,
                SseLine::Error(msg) => return Err(LlmError::StreamRead(msg)),
                SseLine::Skip => {}
            }
        }

        sink.send(StreamEvent::Done);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_delta_is_a_fragment() {
        let line = r#"data: {"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hull "}}"#;
        assert_eq!(parse_sse_line(line), SseLine::Text("Hull ".into()));
    }

    #[test]
    fn non_data_lines_are_skipped() {
        assert_eq!(parse_sse_line("event: content_block_delta"), SseLine::Skip);
        assert_eq!(parse_sse_line(""), SseLine::Skip);
        assert_eq!(parse_sse_line(r#"data: {"type":"ping"}"#), SseLine::Skip);
    }

    #[test]
    fn message_stop_ends_turn() {
        assert_eq!(parse_sse_line(r#"data: {"type":"message_stop"}"#), SseLine::Stop);
    }

    #[test]
    fn error_event_carries_message() {
        let line = r#"data: {"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(parse_sse_line(line), SseLine::Error("Overloaded".into()));
    }

    #[test]
    fn request_serializes_history() {
        let messages = vec![ChatMessage::user("status?"), ChatMessage::assistant("bad")];
        let req =
            AnthropicRequest { model: "m", max_tokens: 10, system: "sys", messages: &messages, stream: true };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["messages"][1]["role"], "assistant");
        assert_eq!(json["system"], "sys");
    }
}
