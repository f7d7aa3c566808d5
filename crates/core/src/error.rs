use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {}", .0)]
    InvalidConfiguration(String),

    #[error("Invalid value `{}` for {}: {}", .input, .field, .reason)]
    ValidationFailure {
        field: String,
        input: String,
        reason: String,
    },

    #[error("The wizard is not complete: {} of {} fields visited.", .cursor, .total)]
    Incomplete { cursor: usize, total: usize },

    #[error("No wizard found with ID `{}`", .0)]
    WizardNotFound(String),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("No wizards were found in the wizard definition YAML. Is `{}` empty?", .path)]
    EmptyWizardDefinition { path: String },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing placeholder string: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering placeholder template string: {}", .0)]
    Render(#[from] RenderError),

    #[error("Invalid command line `{}`: {}", .0, .1)]
    CommandLine(String, String),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Found a non-unique wizard ID: `{}`", .0)]
    NonUniqueWizardId(String),

    #[error("Found a non-unique field name in wizard {}: `{}`", .0, .1)]
    NonUniqueFieldName(String, String),

    #[error("Wizard {} references `{}` in its command, which is not one of its fields", .0, .1)]
    UnknownPlaceholder(String, String),

    #[error("Invalid ID: ID may not be empty")]
    EmptyId,

    #[error("Invalid ID `{}`: ID may not contain spaces", .0)]
    IdWithSpace(String),

    #[error("Invalid ID `{}`: ID cannot be purely numeric", .0)]
    NumericId(String),
}

impl Error {
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }

    pub fn validation_failure(field: &str, input: &str, reason: impl Into<String>) -> Self {
        Self::ValidationFailure {
            field: field.to_string(),
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn empty_wizard_definition(path: String) -> Self {
        Self::EmptyWizardDefinition { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    /// Whether the caller can keep going after this error, re-prompting
    /// the same field.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ValidationFailure { .. })
    }
}
