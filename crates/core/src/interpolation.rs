use std::collections::HashMap;

use indexmap::IndexSet;
use leon::Template;
use log::debug;

use crate::command_line::CommandLine;
use crate::definitions::WizardDefinition;
use crate::error::{Error, Result};
use crate::wizard::WizardSession;

/// Placeholder that stands for the assembled wizard output.
pub const ARTIFACT_KEY: &str = "artifact";

pub fn get_templates(command: &[String]) -> Result<Vec<Template<'_>>> {
    let mut templates: Vec<Template> = Vec::new();

    for argument in command {
        templates.push(Template::parse(argument.as_ref())?);
    }

    Ok(templates)
}

/// Find all tokens in all arguments of templates of command, in order of
/// first appearance.
pub fn get_tokens(templates: &[Template]) -> IndexSet<String> {
    let mut tokens = IndexSet::new();

    for template in templates {
        for key in template.keys() {
            let _ = tokens.insert((*key).to_string());
        }
    }

    tokens
}

/// Values available to command templates: every field's answer plus the
/// assembled artifact.
///
/// # Errors
///
/// Returns an error if the session is not complete.
pub fn build_context(session: &WizardSession) -> Result<HashMap<String, String>> {
    let mut context = session.answer_map();
    context.insert(ARTIFACT_KEY.to_string(), session.assemble()?);
    Ok(context)
}

pub fn interpolate_command(
    context: &HashMap<String, String>,
    templates: &[Template],
) -> Result<Vec<String>> {
    let mut interpolated_arguments: Vec<String> = Vec::new();

    for template in templates {
        interpolated_arguments.push(template.render(context)?);
    }

    Ok(interpolated_arguments)
}

/// Renders the definition's command for a completed session.
///
/// Returns `None` for wizards that only build an artifact. Argument tokens
/// that render to an empty string (optional fields left blank) are dropped
/// rather than passed as empty arguments. The program token is never
/// dropped, so an argument cannot take its place.
///
/// # Errors
///
/// Returns an error if the session is incomplete, a template cannot be
/// parsed or rendered, or the program renders to an empty string.
pub fn render_command(
    definition: &WizardDefinition,
    session: &WizardSession,
) -> Result<Option<CommandLine>> {
    let Some(command) = definition.command.as_ref().filter(|c| !c.is_empty()) else {
        return Ok(None);
    };

    let templates = get_templates(command)?;
    let context = build_context(session)?;

    let mut rendered = interpolate_command(&context, &templates)?.into_iter();
    let program = rendered.next().unwrap_or_default();

    if program.trim().is_empty() {
        return Err(Error::CommandLine(
            command.join(" "),
            "the program renders to an empty string".to_string(),
        ));
    }

    let tokens: Vec<String> = std::iter::once(program)
        .chain(rendered.filter(|token| !token.is_empty()))
        .collect();

    debug!("Rendered command tokens for `{}`: {:?}", definition.id, tokens);

    CommandLine::from_tokens(tokens).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WizardConfig;
    use crate::field::{FieldSpec, Transform, Validator};

    fn ping_definition() -> WizardDefinition {
        WizardDefinition {
            id: "ping".to_string(),
            description: None,
            fields: vec![
                FieldSpec::new("host", "Host").with_validator(Validator::Host),
                FieldSpec::new("count", "Count").with_default("4"),
                FieldSpec::new("extra", "Extra flags"),
            ],
            command: Some(
                ["ping", "-c", "{count}", "{extra}", "{host}"]
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            ),
        }
    }

    fn completed(definition: &WizardDefinition, inputs: &[&str]) -> WizardSession {
        let mut session = definition.start(WizardConfig::default()).unwrap();
        for input in inputs {
            session.submit(input).unwrap();
        }
        session
    }

    #[test]
    fn test_get_tokens_in_order() {
        let command = vec![
            "ssh".to_string(),
            "{user}@{host}".to_string(),
            "{host}".to_string(),
            "{port}".to_string(),
        ];
        let templates = get_templates(&command).unwrap();
        let tokens = get_tokens(&templates);
        assert_eq!(
            tokens.into_iter().collect::<Vec<_>>(),
            ["user", "host", "port"]
        );
    }

    #[test]
    fn test_get_templates_rejects_unclosed_placeholder() {
        let command = vec!["{host".to_string()];
        assert!(get_templates(&command).is_err());
    }

    #[test]
    fn test_render_drops_empty_tokens() {
        let definition = ping_definition();
        let session = completed(&definition, &["example.com", "", ""]);
        let command = render_command(&definition, &session).unwrap().unwrap();
        assert_eq!(command, CommandLine::new("ping").args(["-c", "4", "example.com"]));
    }

    #[test]
    fn test_render_keeps_values_as_single_tokens() {
        let definition = ping_definition();
        let session = completed(&definition, &["example.com", "2", "-W 5"]);
        let command = render_command(&definition, &session).unwrap().unwrap();
        assert_eq!(command.args, ["-c", "2", "-W 5", "example.com"]);
    }

    #[test]
    fn test_render_artifact() {
        let definition = WizardDefinition {
            id: "get".to_string(),
            description: None,
            fields: vec![
                FieldSpec::new("host", "Host").with_validator(Validator::Host),
                FieldSpec::new("path", "Path").with_transform(Transform::prefix("/")),
            ],
            command: Some(vec!["curl".to_string(), "{artifact}".to_string()]),
        };
        let session = completed(&definition, &["example.com", "index.html"]);
        let command = render_command(&definition, &session).unwrap().unwrap();
        assert_eq!(command.args, ["example.com/index.html"]);
    }

    #[test]
    fn test_render_rejects_empty_program() {
        let definition = WizardDefinition {
            id: "run".to_string(),
            description: None,
            fields: vec![FieldSpec::new("prog", "Program"), FieldSpec::new("arg", "Argument")],
            command: Some(vec!["{prog}".to_string(), "{arg}".to_string()]),
        };
        let session = completed(&definition, &["", "x"]);

        let result = render_command(&definition, &session);
        assert!(matches!(result, Err(Error::CommandLine(_, ref reason)) if reason.contains("program")));

        let session = completed(&definition, &["echo", "x"]);
        let command = render_command(&definition, &session).unwrap().unwrap();
        assert_eq!(command, CommandLine::new("echo").arg("x"));
    }

    #[test]
    fn test_render_without_command() {
        let mut definition = ping_definition();
        definition.command = None;
        let session = completed(&definition, &["example.com", "", ""]);
        assert!(render_command(&definition, &session).unwrap().is_none());
    }

    #[test]
    fn test_render_incomplete_session_fails() {
        let definition = ping_definition();
        let session = definition.start(WizardConfig::default()).unwrap();
        assert!(render_command(&definition, &session).is_err());
    }

    #[test]
    fn test_build_context_contains_artifact() {
        let definition = ping_definition();
        let session = completed(&definition, &["example.com", "", ""]);
        let context = build_context(&session).unwrap();
        assert_eq!(
            context.get(ARTIFACT_KEY).map(String::as_str),
            Some("example.com4")
        );
        assert_eq!(context.get("count").map(String::as_str), Some("4"));
    }
}
