//! Rust Wiz CLI Library
//!
//! This crate provides the command-line interface for rust-wiz. It handles
//! user interaction: choosing a wizard, prompting for each field,
//! confirming the built command and showing the execution result.
//!
//! # Key Features
//!
//! - **Wizard Menu**: Pick a wizard by number, ID or fuzzy match
//! - **Field Prompts**: Defaults in brackets, back-navigation, re-prompting
//!   on rejected values
//! - **Command Confirmation**: Run, skip, or go back and change values
//! - **Bounded Execution**: Commands are timed out instead of hanging the
//!   session
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`wizard_selection`]: Line-based prompts and output
//! - [`run`]: The wizard, confirm and execute flow
//!
//! # Examples
//!
//! ```bash
//! # Interactive mode - shows the wizard menu
//! rw
//!
//! # Start a wizard directly, by ID or fuzzy match
//! rw curl
//! rw png
//!
//! # Show the command without running it
//! rw --dry-run dns
//!
//! # Give commands ten seconds before they are killed
//! rw --timeout 10 ping
//! ```

pub mod cli_args;
pub mod run;
pub mod wizard_selection;
