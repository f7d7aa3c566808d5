//! Loading and validation of wizard definitions.
//!
//! Definitions come from a YAML file, or from the built-in set compiled into
//! the binary when no file exists at the default location. They are static,
//! local data only.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use log::{debug, info};

use crate::config::{get_config_path, DEFAULT_CONFIG_PATH};
use crate::definitions::WizardDefinition;
use crate::error::Error::{
    EmptyId, IdWithSpace, NonUniqueWizardId, NumericId, UnknownPlaceholder, WizardNotFound,
};
use crate::error::{Error, Result};
use crate::interpolation::{get_templates, get_tokens, ARTIFACT_KEY};
use crate::wizard::validate_fields;

const BUILTIN_WIZARDS: &str = include_str!("../assets/builtin_wizards.yml");

const BUILTIN_SOURCE: &str = "<built-in>";

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path).map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(EmptyId);
    }

    if id.contains(' ') {
        return Err(IdWithSpace(id.to_string()));
    }

    if id.chars().all(|c| c.is_numeric()) {
        return Err(NumericId(id.to_string()));
    }

    Ok(())
}

fn validate_command(wizard: &WizardDefinition) -> Result<()> {
    let Some(command) = &wizard.command else {
        return Ok(());
    };

    let templates = get_templates(command)?;
    let field_names: HashSet<&str> = wizard.fields.iter().map(|f| f.name.as_str()).collect();

    for token in get_tokens(&templates) {
        if token != ARTIFACT_KEY && !field_names.contains(token.as_str()) {
            return Err(UnknownPlaceholder(wizard.id.clone(), token));
        }
    }

    Ok(())
}

fn validate_wizards(wizards: &[WizardDefinition]) -> Result<()> {
    let mut ids = HashSet::new();

    for wizard in wizards {
        validate_id(&wizard.id)?;

        if !ids.insert(wizard.id.as_str()) {
            // Found a duplicate ID
            return Err(NonUniqueWizardId(wizard.id.clone()));
        }

        if wizard.fields.is_empty() {
            return Err(Error::invalid_configuration(format!(
                "wizard `{}` has no fields",
                wizard.id
            )));
        }

        validate_fields(&format!("wizard `{}`", wizard.id), &wizard.fields)?;
        validate_command(wizard)?;
    }

    Ok(())
}

fn check_parsed(
    parsed: serde_yaml::Result<Vec<WizardDefinition>>,
    source: &str,
) -> Result<Vec<WizardDefinition>> {
    let wizards = parsed.map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "wizard definitions".to_string(),
            source.to_string(),
            e,
        )
    })?;

    if wizards.is_empty() {
        return Err(Error::empty_wizard_definition(source.to_string()));
    }

    validate_wizards(&wizards)?;

    Ok(wizards)
}

/// Parses and validates wizard definitions from YAML text.
///
/// `source` names where the text came from, for error messages.
///
/// # Errors
///
/// Returns an error if the YAML is malformed, lists no wizards, or any
/// wizard fails validation.
pub fn parse_wizard_definitions(yaml: &str, source: &str) -> Result<Vec<WizardDefinition>> {
    check_parsed(serde_yaml::from_str(yaml), source)
}

/// Loads and validates wizard definitions from a YAML file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The YAML is malformed or doesn't match the expected structure
/// - The file lists no wizards
/// - Wizard IDs are invalid or non-unique
/// - A wizard has no fields, duplicate field names, or a default that fails
///   its own validator
/// - A command template names something other than a field or `artifact`
///
/// # Examples
///
/// ```no_run
/// use rust_wiz_core::file_handling::get_wizard_definitions;
///
/// let wizards = get_wizard_definitions("/etc/rust-wiz/wizards.yml")?;
/// println!("Loaded {} wizards", wizards.len());
/// # Ok::<(), rust_wiz_core::error::Error>(())
/// ```
pub fn get_wizard_definitions(config_path: &str) -> Result<Vec<WizardDefinition>> {
    let config_reader = get_reader("wizard definitions", config_path)?;

    check_parsed(serde_yaml::from_reader(config_reader), config_path)
}

/// The wizards bundled with rust-wiz.
///
/// # Errors
///
/// Only fails if the bundled YAML is itself invalid.
pub fn builtin_wizard_definitions() -> Result<Vec<WizardDefinition>> {
    parse_wizard_definitions(BUILTIN_WIZARDS, BUILTIN_SOURCE)
}

/// Resolves and loads the wizard definitions to use.
///
/// An explicit path must exist. Without one, the default path is used when
/// present and the built-in wizards otherwise.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be loaded.
pub fn load_wizard_definitions(config_path_arg: Option<&str>) -> Result<Vec<WizardDefinition>> {
    let config_path = get_config_path(config_path_arg);
    debug!("Config path: `{}`", config_path);

    if config_path_arg.is_none() && !Path::new(&config_path).exists() {
        info!(
            "No wizard definitions at `{}`, using the built-in wizards",
            DEFAULT_CONFIG_PATH
        );
        return builtin_wizard_definitions();
    }

    get_wizard_definitions(&config_path)
}

/// Finds a wizard by its ID.
///
/// # Errors
///
/// Returns [`Error::WizardNotFound`] if no wizard has that ID.
pub fn find_wizard<'a>(wizards: &'a [WizardDefinition], id: &str) -> Result<&'a WizardDefinition> {
    wizards
        .iter()
        .find(|wizard| wizard.id == id)
        .ok_or_else(|| WizardNotFound(id.to_string()))
}
