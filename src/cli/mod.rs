pub mod app;
mod commands;

pub use app::{App, RunOutcome, RunOverrides};
pub use commands::{execute_command, Args, Commands, API_KEY_ENV};
