use md_base::difficulty::Difficulty;

/// Ephemeral per-play state. Recreated on every start or reboot.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Matches the generation tag of events belonging to this session
    pub generation: u64,
    pub difficulty: Difficulty,
    pub over: bool,
    pub victory: bool,
    /// A model turn is in flight
    pub streaming: bool,
    /// Cumulative text of the turn in flight
    pub turn_text: String,
}

impl GameSession {
    pub fn new(generation: u64, difficulty: Difficulty) -> Self {
        Self { generation, difficulty, over: false, victory: false, streaming: true, turn_text: String::new() }
    }

    pub fn is_active(&self) -> bool {
        !self.over
    }

    /// Events from other generations, or after the game ended, are dropped.
    pub fn accepts(&self, generation: u64) -> bool {
        self.is_active() && generation == self.generation
    }

    pub fn input_enabled(&self) -> bool {
        self.is_active() && !self.streaming
    }

    /// End the session. Returns false if it had already ended.
    pub fn finish(&mut self, victory: bool) -> bool {
        if self.over {
            return false;
        }
        self.over = true;
        self.victory = victory;
        self.streaming = false;
        true
    }
}
