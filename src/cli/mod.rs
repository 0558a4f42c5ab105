//! CLI module - argument parsing, interactive prompts and subcommands

mod args;
pub mod commands;
mod prompts;
pub mod wizard;

pub use args::{effective_auth, Cli, Commands};
pub use prompts::*;
