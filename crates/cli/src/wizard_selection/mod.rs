//! Interactive wizard selection and user input handling.
//!
//! This module provides the line-based terminal interface for rust-wiz:
//! the wizard menu, field prompts, run confirmation and result output.
//! Every function reads from a [`BufRead`](std::io::BufRead) and writes to a
//! [`Write`](std::io::Write) so the whole flow can be driven from tests.
//!
//! # User Interface
//!
//! The interface supports:
//! - A number, an ID or part of an ID to pick a wizard
//! - Enter to keep the value shown in brackets
//! - `<-` to go back to the previous field
//! - `<x` to empty the current field
//! - 'q' or end of input to quit

// Export public items from submodules
pub mod colors;
pub mod input;
pub mod output;
pub mod types;
pub mod ui;

// Re-exports for convenience
pub use input::{confirm_command_should_run, fill_field_values, read_line};
pub use output::print_execution_result;
pub use types::{RunChoice, WizardChoice, WizardOutcome};
pub use ui::{prompt_for_wizard_choice, resolve_wizard};

/// Input used to leave the wizard menu
pub const QUIT_OPTION: char = 'q';
