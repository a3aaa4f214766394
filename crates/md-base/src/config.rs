//! YAML configuration loader for the game script: preamble, turn templates,
//! default subsystem statuses, difficulty hints and narration voice.
use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;

// ============================================================================
// Prompts Configuration
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PromptsConfig {
    pub preamble: String,
    pub opening: String,
    pub turn: String,
    pub link_failure: String,
    pub victory_marker: String,
    pub default_statuses: BTreeMap<String, String>,
    pub difficulties: Difficulties,
    pub narration: VoiceSettings,
}

#[derive(Debug, Deserialize)]
pub struct Difficulties {
    pub easy: DifficultyText,
    pub normal: DifficultyText,
    pub hard: DifficultyText,
}

#[derive(Debug, Deserialize)]
pub struct DifficultyText {
    pub label: String,
    pub hint: String,
}

/// Speech rate, pitch and volume. 1.0 is the engine's neutral setting for
/// rate and pitch; volume runs from 0.0 to 1.0.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct VoiceSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self { rate: 1.0, pitch: 1.0, volume: 1.0 }
    }
}

// ============================================================================
// Loading Functions
// ============================================================================

fn parse_yaml<T: for<'de> Deserialize<'de>>(name: &str, content: &str) -> T {
    serde_yaml::from_str(content).unwrap_or_else(|e| panic!("Failed to parse {}: {}", name, e))
}

// ============================================================================
// Global Configuration (embedded at compile time)
// ============================================================================

pub static PROMPTS: LazyLock<PromptsConfig> =
    LazyLock::new(|| parse_yaml("prompts.yaml", include_str!("../../../yamls/prompts.yaml")));

// =============================================================================
// PROMPTS (loaded from yamls/prompts.yaml)
// =============================================================================

pub mod prompts {
    use super::{PROMPTS, VoiceSettings};

    pub fn preamble() -> &'static str {
        &PROMPTS.preamble
    }
    pub fn opening_template() -> &'static str {
        &PROMPTS.opening
    }
    pub fn turn_template() -> &'static str {
        &PROMPTS.turn
    }
    pub fn victory_marker() -> &'static str {
        &PROMPTS.victory_marker
    }
    pub fn voice() -> VoiceSettings {
        PROMPTS.narration
    }

    /// Link-failure text shown in the transcript when a turn cannot be delivered.
    pub fn link_failure(error: &str) -> String {
        PROMPTS.link_failure.replace("{error}", error)
    }
}
