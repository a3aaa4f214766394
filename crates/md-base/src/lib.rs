pub mod applier;
pub mod config;
pub mod constants;
pub mod difficulty;
pub mod payload;
pub mod status;
pub mod timer;
