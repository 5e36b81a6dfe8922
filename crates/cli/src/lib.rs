//! Redpen CLI Library
//!
//! This crate provides the command-line interface for redpen, an audit
//! prompt workflow tracker. It handles subcommand dispatch, colored progress
//! listings, interactive prompt selection, and clipboard hand-off.
//!
//! # Key Features
//!
//! - **Subcommands**: The full `init`/`run`/`order`/`status`/... surface over
//!   the core engine
//! - **Interactive Prompt Picker**: Terminal UI for choosing a prompt when a
//!   command is invoked without an identifier
//! - **Clipboard Hand-off**: Copy prompt content, degrading to plain display
//!   when no clipboard is available
//! - **CI Integration**: `check` exits non-zero while required prompts are
//!   incomplete
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing via `clap`
//! - [`commands`]: One handler per subcommand plus the render helpers they
//!   share
//! - [`prompt_selection`]: Interactive selection UI and stdin prompts
//! - [`clipboard`]: The clipboard capability and its implementations

pub mod cli_args;
pub mod clipboard;
pub mod commands;
pub mod prompt_selection;
