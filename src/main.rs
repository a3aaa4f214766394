mod app;
mod infra;
mod llms;
mod state;
mod ui;

use std::io;
use std::sync::mpsc;

use crossterm::{
    ExecutableCommand,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use md_base::status::{FileKvStore, StatusStore};
use md_mod_speech::Narrator;

use app::App;
use app::session::SessionController;
use infra::cli::{CliArgs, Settings, USAGE};
use infra::telemetry::{init_tracing, write_panic_log};
use llms::{SessionEvent, get_client};
use state::State;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match CliArgs::parse(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };
    if cli.help {
        print!("{}", USAGE);
        return Ok(());
    }

    dotenvy::dotenv().ok();
    init_tracing();
    let settings = Settings::resolve(cli, |key| std::env::var(key).ok());
    tracing::info!(provider = ?settings.provider, model = %settings.model, "starting");

    // Panic hook: restore terminal state and log the panic to disk.
    // Without this a panic leaves the terminal in raw mode + alternate screen.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(DisableBracketedPaste);
        let _ = io::stdout().execute(LeaveAlternateScreen);

        let backtrace = std::backtrace::Backtrace::force_capture();
        write_panic_log(&format!("{}\n\n{}", info, backtrace));

        default_hook(info);
    }));

    let statuses = StatusStore::load(Box::new(FileKvStore::new(settings.store_dir.clone())));
    let narrator = Narrator::detect(settings.muted);
    let state = State::new(statuses, narrator, settings.difficulty)
        .with_labels(settings.provider.display_name(), &settings.model);

    let (tx, rx) = mpsc::channel::<SessionEvent>();
    let controller = SessionController::new(get_client(settings.provider), settings.model.clone(), tx);

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(state, controller);
    let result = app.run(&mut terminal, rx);

    // Cleanup
    disable_raw_mode()?;
    io::stdout().execute(DisableBracketedPaste)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    tracing::info!("shutdown");
    result
}
