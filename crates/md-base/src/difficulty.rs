use serde::{Deserialize, Serialize};

use crate::config::{DifficultyText, PROMPTS};

/// Difficulty tier chosen on the briefing screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    fn text(&self) -> &'static DifficultyText {
        match self {
            Difficulty::Easy => &PROMPTS.difficulties.easy,
            Difficulty::Normal => &PROMPTS.difficulties.normal,
            Difficulty::Hard => &PROMPTS.difficulties.hard,
        }
    }

    /// Display name (e.g. "OFFICER")
    pub fn label(&self) -> &'static str {
        &self.text().label
    }

    /// Instruction passed to the model alongside the difficulty label
    pub fn hint(&self) -> &'static str {
        &self.text().hint
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "1" => Some(Difficulty::Easy),
            "normal" | "2" => Some(Difficulty::Normal),
            "hard" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Hard,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Easy,
            Difficulty::Normal => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_names_and_digits() {
        assert_eq!(Difficulty::parse("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse(" easy "), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("2"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::parse("nightmare"), None);
    }

    #[test]
    fn next_and_prev_saturate() {
        assert_eq!(Difficulty::Hard.next(), Difficulty::Hard);
        assert_eq!(Difficulty::Easy.prev(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.next().next(), Difficulty::Hard);
    }

    #[test]
    fn labels_are_distinct() {
        let labels: Vec<&str> = Difficulty::ALL.iter().map(|d| d.label()).collect();
        assert_eq!(labels, vec!["CADET", "OFFICER", "CAPTAIN"]);
    }
}
