//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure and provides
//! validation for CLI arguments using the `clap` crate.

use std::time::Duration;

use clap::Parser;
use rust_wiz_core::config::ExecutorConfig;

/// Command-line arguments for the rust-wiz CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use rust_wiz_cli::cli_args::Args;
///
/// let args = Args::parse_from(["rw", "--dry-run", "curl"]);
/// assert!(args.dry_run);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
#[allow(clippy::struct_excessive_bools)] // silence clippy's warning on this struct
pub struct Args {
    /// Path to the wizard definitions YAML.
    ///
    /// If not provided, `~/.rust-wiz/wizards.yml` is used when it exists,
    /// and the built-in wizards otherwise.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Seconds a command may run before it is timed out.
    ///
    /// Defaults to 45 seconds.
    #[arg(long, short = 't', value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Perform a dry run, which just prints out the command but does not execute it.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Run the command without first confirming if the command should be run.
    #[arg(long, short = 'f', action)]
    pub force: bool,

    /// List the available wizards and exit.
    #[arg(long, action)]
    pub list: bool,

    /// Leave a timed out command running instead of killing it.
    #[arg(long, action)]
    pub no_kill: bool,

    /// The wizard ID or 1-based index to start directly.
    ///
    /// If not provided, a menu of wizards is shown. An ID that does not match
    /// exactly is fuzzy matched against the available wizards.
    #[arg(num_args(1))]
    pub wizard: Option<String>,
}

impl Args {
    /// Builds the executor configuration from the timeout and kill flags.
    #[must_use]
    pub fn executor_config(&self) -> ExecutorConfig {
        let mut config = ExecutorConfig::default();

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(Duration::from_secs(timeout));
        }

        config.kill_on_timeout = !self.no_kill;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_wiz_core::config::DEFAULT_TIMEOUT;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["rw"]);

        assert!(args.config_path.is_none());
        assert!(args.timeout.is_none());
        assert!(!args.dry_run);
        assert!(!args.force);
        assert!(!args.list);
        assert!(!args.no_kill);
        assert!(args.wizard.is_none());
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from(["rw", "-c", "/custom/wizards.yml", "-t", "5", "-d", "-f", "dns"]);

        assert_eq!(args.config_path.as_deref(), Some("/custom/wizards.yml"));
        assert_eq!(args.timeout, Some(5));
        assert!(args.dry_run);
        assert!(args.force);
        assert_eq!(args.wizard.as_deref(), Some("dns"));
    }

    #[test]
    fn test_args_long_flags() {
        let args = Args::parse_from([
            "rw",
            "--config-path",
            "/custom/wizards.yml",
            "--timeout",
            "10",
            "--dry-run",
            "--force",
            "--list",
            "--no-kill",
        ]);

        assert_eq!(args.config_path.as_deref(), Some("/custom/wizards.yml"));
        assert_eq!(args.timeout, Some(10));
        assert!(args.dry_run);
        assert!(args.force);
        assert!(args.list);
        assert!(args.no_kill);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(Args::try_parse_from(["rw", "--timeout", "0"]).is_err());
    }

    #[test]
    fn test_executor_config_defaults() {
        let config = Args::parse_from(["rw"]).executor_config();
        assert_eq!(config.default_timeout, DEFAULT_TIMEOUT);
        assert!(config.kill_on_timeout);
    }

    #[test]
    fn test_executor_config_from_flags() {
        let config = Args::parse_from(["rw", "-t", "3", "--no-kill"]).executor_config();
        assert_eq!(config.default_timeout, Duration::from_secs(3));
        assert!(!config.kill_on_timeout);
    }
}
