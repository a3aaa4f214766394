pub mod actions;
mod app;
pub mod events;
pub mod session;

pub use app::App;
