//! Rust Wiz Core Library
//!
//! This crate provides the core functionality for rust-wiz, an interactive
//! helper that walks a user through building a composite command (a URL, or
//! a full invocation line) one field at a time, and then runs it under a
//! timeout.
//!
//! # Key Features
//!
//! - **Wizard**: Ordered, navigable fields with defaults, validation and
//!   back-navigation, assembled into a single string
//! - **Executor**: Runs an external command on a worker thread and returns a
//!   classified result no later than its timeout
//! - **Typed Command Lines**: Argument tokens are kept separate and never
//!   passed through a shell
//! - **Wizard Definitions**: YAML-based wizard configurations with `leon`
//!   command templates, plus a built-in set
//! - **Error Handling**: One error type for every configuration failure mode
//!
//! # Examples
//!
//! Building a URL and running `curl` against it:
//!
//! ```no_run
//! use rust_wiz_core::command_line::CommandLine;
//! use rust_wiz_core::config::{ExecutorConfig, WizardConfig};
//! use rust_wiz_core::executor::Executor;
//! use rust_wiz_core::file_handling::{builtin_wizard_definitions, find_wizard};
//!
//! let wizards = builtin_wizard_definitions()?;
//! let mut session = find_wizard(&wizards, "url")?.start(WizardConfig::default())?;
//! for input in ["https", "", "example.com", "", ""] {
//!     session.submit(input)?;
//! }
//! let url = session.assemble()?;
//!
//! let executor = Executor::new(ExecutorConfig::default());
//! let result = executor.execute(&executor.request(CommandLine::new("curl").arg(&url)));
//! println!("{result}");
//! # Ok::<(), rust_wiz_core::error::Error>(())
//! ```

pub mod command_line;
pub mod config;
pub mod definitions;
pub mod error;
pub mod executor;
pub mod field;
pub mod file_handling;
pub mod interpolation;
pub mod wizard;
