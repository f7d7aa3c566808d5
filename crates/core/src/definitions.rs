use std::fmt::{Display, Formatter};

use serde::Deserialize;

use crate::config::WizardConfig;
use crate::error::Result;
use crate::field::FieldSpec;
use crate::wizard::WizardSession;

/// A named wizard: its fields and, optionally, the command it builds.
///
/// Each entry of `command` is one argument token and may contain `leon`
/// placeholders: `{artifact}` for the assembled string, or `{<field>}` for
/// a single field's answer.
#[derive(Deserialize, Debug, Clone)]
pub struct WizardDefinition {
    pub id: String,
    pub description: Option<String>,
    pub fields: Vec<FieldSpec>,
    pub command: Option<Vec<String>>,
}

impl WizardDefinition {
    /// Starts a fresh session over this wizard's fields.
    ///
    /// # Errors
    ///
    /// Returns an error when the field list is not a valid wizard.
    pub fn start(&self, config: WizardConfig) -> Result<WizardSession> {
        WizardSession::start(self.fields.clone(), config)
    }

    #[must_use]
    pub fn has_command(&self) -> bool {
        self.command.as_ref().is_some_and(|command| !command.is_empty())
    }
}

impl Display for WizardDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(formatter, "{} ({})", self.id, description),
            None => formatter.write_str(&self.id),
        }
    }
}
