use std::io;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event;
use ratatui::prelude::*;

use md_base::constants::{EVENT_POLL_MS, RENDER_THROTTLE_MS, SPINNER_INTERVAL_MS};
use md_base::timer::SecondTicker;

use crate::app::actions::{ActionResult, TurnOutcome, apply_action, apply_session_event, apply_tick, begin_session, reboot};
use crate::app::events::handle_event;
use crate::app::session::SessionController;
use crate::llms::SessionEvent;
use crate::state::State;
use crate::ui;

pub struct App {
    pub state: State,
    controller: SessionController,
    /// Whole-second clock for the countdown, reset when a session starts
    ticker: SecondTicker,
    last_render: Instant,
    last_spinner: Instant,
}

impl App {
    pub fn new(state: State, controller: SessionController) -> Self {
        let now = Instant::now();
        Self { state, controller, ticker: SecondTicker::new(now), last_render: now, last_spinner: now }
    }

    pub fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        rx: Receiver<SessionEvent>,
    ) -> io::Result<()> {
        loop {
            // === INPUT FIRST: Process user input with minimal latency ===
            if event::poll(Duration::ZERO)? {
                let evt = event::read()?;
                let Some(action) = handle_event(&evt, &self.state) else {
                    self.controller.end();
                    self.state.narrator.silence();
                    break;
                };
                let result = apply_action(&mut self.state, action);
                self.handle_action_result(result);

                // Render immediately after input for instant feedback
                if self.state.dirty {
                    terminal.draw(|frame| ui::render(frame, &mut self.state))?;
                    self.state.dirty = false;
                    self.last_render = Instant::now();
                }
                continue;
            }

            self.process_stream_events(&rx);
            self.process_clock();
            self.update_spinner_animation();

            if self.state.dirty && self.last_render.elapsed() >= Duration::from_millis(RENDER_THROTTLE_MS) {
                terminal.draw(|frame| ui::render(frame, &mut self.state))?;
                self.state.dirty = false;
                self.last_render = Instant::now();
            }

            // Adaptive poll: short while streaming or dirty, longer when idle
            let poll_ms = if self.state.is_streaming() || self.state.dirty { EVENT_POLL_MS } else { 50 };
            let _ = event::poll(Duration::from_millis(poll_ms))?;
        }

        Ok(())
    }

    fn handle_action_result(&mut self, result: ActionResult) {
        match result {
            ActionResult::Nothing => {}
            ActionResult::StartSession(difficulty) => {
                let generation = self.controller.start(difficulty);
                begin_session(&mut self.state, generation, difficulty);
                self.ticker = SecondTicker::new(Instant::now());
            }
            ActionResult::SendCommand(command) => {
                let difficulty = self.state.difficulty;
                self.controller.send(&command, self.state.countdown.remaining(), difficulty);
            }
            ActionResult::Reboot => {
                self.controller.end();
                reboot(&mut self.state);
            }
        }
    }

    fn process_stream_events(&mut self, rx: &Receiver<SessionEvent>) {
        while let Ok(evt) = rx.try_recv() {
            match apply_session_event(&mut self.state, evt) {
                TurnOutcome::Completed(text) => self.controller.complete_turn(&text),
                TurnOutcome::Failed => self.controller.fail_turn(),
                TurnOutcome::Streaming | TurnOutcome::Ignored => {}
            }
        }
    }

    fn process_clock(&mut self) {
        let due = self.ticker.due(Instant::now());
        for _ in 0..due {
            if apply_tick(&mut self.state) {
                break;
            }
        }
    }

    /// Advance the spinner while a turn streams.
    fn update_spinner_animation(&mut self) {
        if !self.state.is_streaming() || self.last_spinner.elapsed() < Duration::from_millis(SPINNER_INTERVAL_MS) {
            return;
        }
        self.last_spinner = Instant::now();
        self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
        self.state.dirty = true;
    }
}
