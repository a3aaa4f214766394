//! File-backed structured logging. The terminal belongs to the UI, so traces
//! go to a JSON-lines file instead.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_subscriber::fmt::time::UtcTime;

use md_base::constants::STORE_DIR;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

pub const TRACE_LOG_VAR: &str = "MAYDAY_TRACE_LOG";

pub fn tracing_log_path() -> PathBuf {
    trace_path_from(env::var(TRACE_LOG_VAR).ok())
}

fn trace_path_from(override_path: Option<String>) -> PathBuf {
    override_path
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(STORE_DIR).join("logs").join("trace.jsonl"))
}

/// Install the global subscriber once. Failures leave logging disabled.
pub fn init_tracing() {
    let _ = TRACING_INIT.get_or_init(|| {
        let path = tracing_log_path();
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let file = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => file,
            Err(_) => return,
        };
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(file)
            .with_current_span(false)
            .with_span_list(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Append a panic report to `.mayday/errors/panic.log`.
pub fn write_panic_log(report: &str) {
    let error_dir = Path::new(STORE_DIR).join("errors");
    let _ = fs::create_dir_all(&error_dir);
    let ts = chrono::Utc::now().to_rfc3339();
    let msg = format!("[{}] {}\n\n---\n", ts, report);
    let _ = OpenOptions::new().create(true).append(true).open(error_dir.join("panic.log")).and_then(|mut f| {
        use std::io::Write;
        f.write_all(msg.as_bytes())
    });
}
