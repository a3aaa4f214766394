//! Test double that replays canned turns instead of calling a provider.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::{LlmClient, LlmError, LlmRequest, StreamEvent, StreamSink};

/// One canned reply
pub enum Script {
    /// Stream these fragments, then Done
    Reply(Vec<String>),
    /// Fail the turn
    Fail(String),
}

/// Replays scripts in order and records every request it received.
#[derive(Default)]
pub struct ScriptedClient {
    scripts: Mutex<VecDeque<Script>>,
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedClient {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self { scripts: Mutex::new(scripts.into()), requests: Mutex::new(Vec::new()) }
    }

    pub fn reply(fragments: &[&str]) -> Script {
        Script::Reply(fragments.iter().map(|s| s.to_string()).collect())
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn last_request(&self) -> Option<LlmRequest> {
        self.requests.lock().ok().and_then(|r| r.last().cloned())
    }
}

impl LlmClient for ScriptedClient {
    fn stream(&self, request: &LlmRequest, sink: &StreamSink) -> Result<(), LlmError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        let script = self.scripts.lock().ok().and_then(|mut s| s.pop_front());
        match script {
            Some(Script::Reply(fragments)) => {
                for fragment in fragments {
                    sink.send(StreamEvent::Chunk(fragment));
                }
                sink.send(StreamEvent::Done);
                Ok(())
            }
            Some(Script::Fail(msg)) => Err(LlmError::Network(msg)),
            None => Err(LlmError::StreamRead("script exhausted".into())),
        }
    }
}
