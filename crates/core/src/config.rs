//! Configuration for rust-wiz.
//!
//! Holds the default paths and constants, and the explicit configuration
//! objects handed to [`WizardSession`](crate::wizard::WizardSession) and
//! [`Executor`](crate::executor::Executor) at construction time.

use std::time::Duration;

/// Default path for the wizard definitions file
pub const DEFAULT_CONFIG_PATH: &str = "~/.rust-wiz/wizards.yml";

/// Default wall-clock limit for one external command
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);

/// How long a killed worker gets to hand back partial output
pub const DEFAULT_KILL_GRACE: Duration = Duration::from_millis(250);

/// Input that moves the wizard back one field
pub const BACK_TOKEN: &str = "<-";

/// Input that empties the current field
pub const CLEAR_TOKEN: &str = "<x";

/// Resolves the wizard definitions file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use rust_wiz_core::config::get_config_path;
///
/// let default_path = get_config_path(None);
/// assert!(default_path.ends_with("wizards.yml"));
///
/// let custom_path = get_config_path(Some("/path/to/wizards.yml"));
/// assert_eq!(custom_path, "/path/to/wizards.yml");
/// ```
#[must_use]
pub fn get_config_path(config_path_arg: Option<&str>) -> String {
    let config_path = config_path_arg.unwrap_or(DEFAULT_CONFIG_PATH);

    shellexpand::tilde(config_path).to_string()
}

/// Settings for a wizard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    /// Reserved input that navigates to the previous field.
    pub back_token: String,
    /// Reserved input that stores an empty answer for the current field.
    pub clear_token: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            back_token: BACK_TOKEN.to_string(),
            clear_token: CLEAR_TOKEN.to_string(),
        }
    }
}

/// Settings for the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Timeout used by [`ExecutionRequest::new`](crate::executor::ExecutionRequest::new).
    pub default_timeout: Duration,
    /// Kill the child's process group when the deadline passes.
    ///
    /// When false the worker is abandoned and the child keeps running.
    pub kill_on_timeout: bool,
    /// Time to wait for partial output after a kill.
    pub kill_grace: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            default_timeout: DEFAULT_TIMEOUT,
            kill_on_timeout: true,
            kill_grace: DEFAULT_KILL_GRACE,
        }
    }
}

impl ExecutorConfig {
    /// Overrides the default timeout, keeping the other settings.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}
