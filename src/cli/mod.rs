//! CLI command handling module
//!
//! Handles all CLI subcommands and headless table output.

mod commands;
mod logging;
mod render;
mod run;

pub use commands::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use render::{render_description, render_table, render_xray};
pub use run::{RunArgs, run};
