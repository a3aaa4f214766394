//! State types.
//!
//! - `message`: transcript entries
//! - `session`: GameSession, the per-play flags
//! - `runtime`: State struct (the main runtime state)

pub mod message;
pub mod runtime;
pub mod session;

pub use message::{Message, MessageKind, Role};
pub use runtime::State;
pub use session::GameSession;
