//! Interactive prompt selection and user input.
//!
//! This module provides the terminal-based selection UI used when a command
//! that needs a prompt is invoked without one, plus the plain stdin prompts
//! used by the setup flow.
//!
//! # User Interface
//!
//! The picker supports:
//! - Arrow keys or vim-style (j/k) navigation
//! - Enter to select a prompt
//! - `/` to filter prompts by typing (fuzzy search)
//! - `q`, Escape or Ctrl-C to quit

// Export public items from submodules
pub mod input;
pub mod types;
pub mod ui;

// Re-exports for convenience
pub use input::{press_enter, select_option, SelectOption};
pub use types::PromptChoice;
pub use ui::prompt_for_prompt_choice;
