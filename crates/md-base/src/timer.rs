//! Session countdown.
//!
//! `Countdown` is a plain state machine (idle → running → expired, or
//! running → stopped) advanced one second per [`Countdown::tick`]. It owns no
//! thread or timer handle; the app loop asks a [`SecondTicker`] how many whole
//! seconds have passed and ticks that many times.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Expired,
    /// Cancelled while running (victory or reboot)
    Stopped,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still running with this many seconds left
    Remaining(u32),
    /// This tick ran the clock out. Reported exactly once.
    Expired,
    /// Timer was not running; nothing changed
    Inactive,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    total: u32,
    remaining: u32,
    state: TimerState,
}

impl Countdown {
    pub fn new(total_seconds: u32) -> Self {
        Self { total: total_seconds, remaining: total_seconds, state: TimerState::Idle }
    }

    /// Begin counting down from the full duration. Any previous run is discarded.
    pub fn start(&mut self) {
        self.remaining = self.total;
        self.state = TimerState::Running;
    }

    /// Cancel pending ticks. Safe to call in any state, any number of times.
    pub fn stop(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Stopped;
        }
    }

    /// Back to idle with the full duration on the clock.
    pub fn reset(&mut self) {
        self.remaining = self.total;
        self.state = TimerState::Idle;
    }

    pub fn tick(&mut self) -> Tick {
        if self.state != TimerState::Running {
            return Tick::Inactive;
        }
        if self.remaining <= 1 {
            self.remaining = 0;
            self.state = TimerState::Expired;
            return Tick::Expired;
        }
        self.remaining -= 1;
        Tick::Remaining(self.remaining)
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }
}

/// Converts wall-clock time into whole-second ticks without drift.
#[derive(Debug, Clone)]
pub struct SecondTicker {
    next_due: Instant,
}

impl SecondTicker {
    pub fn new(now: Instant) -> Self {
        Self { next_due: now + Duration::from_secs(1) }
    }

    /// Number of ticks that fell due up to `now`.
    pub fn due(&mut self, now: Instant) -> u32 {
        let mut count = 0;
        while now >= self.next_due {
            self.next_due += Duration::from_secs(1);
            count += 1;
        }
        count
    }
}

/// Seconds as `MM:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
