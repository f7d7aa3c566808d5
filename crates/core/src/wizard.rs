//! Step-based construction wizard.
//!
//! A [`WizardSession`] walks an ordered list of [`FieldSpec`]s one at a time.
//! Every field starts at its default. Empty input keeps whatever the field
//! currently holds, the back token steps to the previous field, the clear
//! token empties the field, and anything else is validated, transformed and
//! stored. Once the cursor has moved past
//! the last field the answers can be assembled, in field order, into one
//! string.
//!
//! ```
//! use rust_wiz_core::config::WizardConfig;
//! use rust_wiz_core::field::{FieldSpec, Transform, Validator};
//! use rust_wiz_core::wizard::WizardSession;
//!
//! let fields = vec![
//!     FieldSpec::new("scheme", "Scheme").with_default("http"),
//!     FieldSpec::new("host", "Host")
//!         .with_validator(Validator::Host)
//!         .with_transform(Transform::prefix("://")),
//!     FieldSpec::new("port", "Port")
//!         .with_default(":80")
//!         .with_validator(Validator::Port)
//!         .with_transform(Transform::prefix(":")),
//! ];
//!
//! let mut session = WizardSession::start(fields, WizardConfig::default())?;
//! for input in ["", "example.com", ""] {
//!     session.submit(input)?;
//! }
//! assert_eq!(session.assemble()?, "http://example.com:80");
//! # Ok::<(), rust_wiz_core::error::Error>(())
//! ```

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::config::WizardConfig;
use crate::error::{Error, Result};
use crate::field::FieldSpec;

/// What a call to [`WizardSession::submit`] did to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Advanced,
    Retreated,
    /// Nothing moved: back at the first field, or input after completion.
    Stayed,
}

/// Mutable state of one run through a wizard.
#[derive(Debug, Clone)]
pub struct WizardSession {
    fields: Vec<FieldSpec>,
    answers: Vec<String>,
    cursor: usize,
    config: WizardConfig,
}

impl WizardSession {
    /// Creates a session with the cursor on the first field and every
    /// answer at its default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `fields` is empty, a
    /// navigation token is blank or both tokens are the same, [`Error::NonUniqueFieldName`] for repeated field
    /// names, and [`Error::InvalidConfiguration`] when a non-empty default
    /// fails its own validator.
    pub fn start(fields: Vec<FieldSpec>, config: WizardConfig) -> Result<Self> {
        if fields.is_empty() {
            return Err(Error::invalid_configuration(
                "a wizard needs at least one field",
            ));
        }

        if config.back_token.trim().is_empty() || config.clear_token.trim().is_empty() {
            return Err(Error::invalid_configuration(
                "the back and clear tokens may not be blank",
            ));
        }

        if config.back_token == config.clear_token {
            return Err(Error::invalid_configuration(
                "the back and clear tokens must differ",
            ));
        }

        validate_fields("wizard", &fields)?;

        let answers = fields.iter().map(|field| field.default.clone()).collect();

        Ok(Self {
            fields,
            answers,
            cursor: 0,
            config,
        })
    }

    /// The field being edited, or `None` once every field has been visited.
    #[must_use]
    pub fn current(&self) -> Option<&FieldSpec> {
        self.fields.get(self.cursor)
    }

    /// The stored answer for the field being edited.
    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        self.answers.get(self.cursor).map(String::as_str)
    }

    /// Applies one line of user input to the current field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationFailure`] when the input (or, for empty
    /// input, the value already held) is rejected by the field's validator.
    /// Clearing a field that does not accept blank input fails the same way.
    /// The session is left unchanged and the same field should be prompted
    /// again.
    pub fn submit(&mut self, raw_input: &str) -> Result<Step> {
        let input = raw_input.trim();

        if input == self.config.back_token {
            return Ok(self.retreat());
        }

        let Some(field) = self.fields.get(self.cursor) else {
            debug!("Ignoring input after the last field");
            return Ok(Step::Stayed);
        };

        if input == self.config.clear_token {
            field
                .validator
                .check("")
                .map_err(|reason| Error::validation_failure(&field.name, "", reason))?;
            debug!("Clearing field `{}`", field.name);
            self.answers[self.cursor] = String::new();
        } else if input.is_empty() {
            let held = &self.answers[self.cursor];
            // A non-empty held value was validated on the way in.
            if held.is_empty() {
                field
                    .validator
                    .check(held)
                    .map_err(|reason| Error::validation_failure(&field.name, held, reason))?;
            }
            debug!("Keeping `{}` for field `{}`", held, field.name);
        } else {
            field
                .validator
                .check(input)
                .map_err(|reason| Error::validation_failure(&field.name, input, reason))?;
            let value = field.transform.apply(input);
            debug!("Storing `{}` for field `{}`", value, field.name);
            self.answers[self.cursor] = value;
        }

        self.cursor += 1;
        Ok(Step::Advanced)
    }

    fn retreat(&mut self) -> Step {
        if self.cursor == 0 {
            return Step::Stayed;
        }

        self.cursor -= 1;
        debug!("Moved back to field {}", self.cursor);
        Step::Retreated
    }

    /// Moves back to the first field, keeping every answer.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor == self.fields.len()
    }

    /// Concatenates the answers in field order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Incomplete`] when some field has not been visited yet.
    pub fn assemble(&self) -> Result<String> {
        if !self.is_complete() {
            return Err(Error::Incomplete {
                cursor: self.cursor,
                total: self.fields.len(),
            });
        }

        Ok(self.answers.concat())
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .position(|field| field.name == name)
            .map(|index| self.answers[index].as_str())
    }

    /// Answers keyed by field name, for template rendering.
    #[must_use]
    pub fn answer_map(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .zip(&self.answers)
            .map(|(field, answer)| (field.name.clone(), answer.clone()))
            .collect()
    }

    #[must_use]
    pub fn back_token(&self) -> &str {
        &self.config.back_token
    }

    #[must_use]
    pub fn clear_token(&self) -> &str {
        &self.config.clear_token
    }
}

/// Checks a field list: unique names, and defaults that satisfy their own
/// validators.
///
/// # Errors
///
/// Returns [`Error::NonUniqueFieldName`] or [`Error::InvalidConfiguration`].
pub fn validate_fields(owner: &str, fields: &[FieldSpec]) -> Result<()> {
    let mut names = HashSet::new();

    for field in fields {
        if field.name.is_empty() {
            return Err(Error::invalid_configuration(format!(
                "{owner} has a field without a name"
            )));
        }

        if !names.insert(field.name.as_str()) {
            return Err(Error::NonUniqueFieldName(
                owner.to_string(),
                field.name.clone(),
            ));
        }

        if !field.default.is_empty() {
            if let Err(reason) = field.validator.check(&field.default) {
                return Err(Error::invalid_configuration(format!(
                    "default `{}` of field `{}` in {owner} is invalid: {reason}",
                    field.default, field.name
                )));
            }
        }
    }

    Ok(())
}
