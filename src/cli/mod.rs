//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, ConfigAction, GenerateArgs};
pub use commands::{
    bind_address, build_service, handle_config_action, request_body, run_generate, run_serve,
};
pub use enums::{Mode, Motion, Ratio, Scenes};
