//! Best-effort narration of model turns through a local speech program.
//!
//! Speech is optional: when no supported program is installed the narrator
//! reports itself unsupported and every call is a no-op. Failures are logged,
//! never surfaced.

pub mod engine;
pub mod text;

use std::fmt;

use md_base::config::{VoiceSettings, prompts};

pub use engine::{CommandSpeech, SpeechProgram, detect};
pub use text::narration_text;

#[derive(Debug)]
pub enum SpeechError {
    /// Speech program could not be started
    Spawn(String),
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::Spawn(msg) => write!(f, "Speech spawn error: {}", msg),
        }
    }
}

impl std::error::Error for SpeechError {}

/// A platform speech service
pub trait SpeechEngine: Send {
    fn name(&self) -> &str;
    /// Start speaking `text`. Returns once the utterance is started.
    fn speak(&mut self, text: &str, voice: &VoiceSettings) -> Result<(), SpeechError>;
    /// Stop the utterance in progress, if any.
    fn cancel(&mut self);
}

/// Narration state: the detected engine (if any) and the mute toggle.
pub struct Narrator {
    engine: Option<Box<dyn SpeechEngine>>,
    voice: VoiceSettings,
    muted: bool,
}

impl Narrator {
    /// Detect an installed speech program.
    pub fn detect(muted: bool) -> Self {
        let engine = detect().map(|e| Box::new(e) as Box<dyn SpeechEngine>);
        match &engine {
            Some(e) => tracing::info!(engine = e.name(), "narration available"),
            None => tracing::info!("no speech program found, narration disabled"),
        }
        Self::with_engine(engine, muted)
    }

    pub fn with_engine(engine: Option<Box<dyn SpeechEngine>>, muted: bool) -> Self {
        Self { engine, voice: prompts::voice(), muted }
    }

    /// Narrator with no engine (unsupported platform, tests)
    pub fn unsupported() -> Self {
        Self::with_engine(None, true)
    }

    pub fn is_supported(&self) -> bool {
        self.engine.is_some()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn engine_name(&self) -> Option<&str> {
        self.engine.as_ref().map(|e| e.name())
    }

    /// Flip mute. Muting silences the current utterance. No-op when unsupported.
    pub fn toggle_mute(&mut self) {
        if !self.is_supported() {
            return;
        }
        self.muted = !self.muted;
        if self.muted {
            self.silence();
        }
    }

    /// Speak a model turn, replacing whatever is being said.
    pub fn narrate(&mut self, raw: &str) {
        if self.muted {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let text = narration_text(raw);
        if text.is_empty() {
            return;
        }
        engine.cancel();
        if let Err(e) = engine.speak(&text, &self.voice) {
            tracing::warn!(error = %e, "narration failed");
        }
    }

    pub fn silence(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.cancel();
        }
    }
}
