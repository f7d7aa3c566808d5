use std::io::{BufRead, Write};

use log::debug;
use rust_wiz_core::error::Result;
use rust_wiz_core::field::FieldSpec;
use rust_wiz_core::wizard::WizardSession;

use super::colors;
use super::types::{RunChoice, WizardOutcome};

/// Reads one line, without its line ending. `None` at end of input.
///
/// # Errors
///
/// Returns an error if reading fails.
pub fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();

    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn write_field_prompt<W: Write>(
    output: &mut W,
    field: &FieldSpec,
    position: usize,
    total: usize,
    held_value: &str,
) -> Result<()> {
    write!(output, "[{position}/{total}] {}", colors::prompt(&field.to_string()))?;

    if let Some(example) = &field.example {
        write!(output, " {}", colors::hint(&format!("(e.g. {example})")))?;
    }

    if !held_value.is_empty() {
        write!(output, " [{held_value}]")?;
    }

    write!(output, ": ")?;
    output.flush()?;

    Ok(())
}

/// Prompts for each field until the session is complete.
///
/// Validation failures are reported and the same field is asked again.
/// Navigation is handled by the session itself.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn fill_field_values<R: BufRead, W: Write>(
    session: &mut WizardSession,
    input: &mut R,
    output: &mut W,
) -> Result<WizardOutcome> {
    writeln!(
        output,
        "{}",
        colors::hint(&format!(
            "Press enter to keep the value in brackets, `{}` to go back, `{}` to clear it.",
            session.back_token(),
            session.clear_token()
        ))
    )?;

    while let Some(field) = session.current() {
        let held_value = session.current_answer().unwrap_or_default();
        write_field_prompt(output, field, session.cursor() + 1, session.len(), held_value)?;

        let Some(line) = read_line(input)? else {
            writeln!(output)?;
            return Ok(WizardOutcome::Aborted);
        };

        match session.submit(&line) {
            Ok(step) => debug!("{step:?}, now at field {}", session.cursor()),
            Err(e) if e.is_recoverable() => {
                writeln!(output, "{}", colors::warning(&e.to_string()))?;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(WizardOutcome::Completed)
}

/// Confirms with the user whether the command should be run.
///
/// End of input counts as "no".
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn confirm_command_should_run<R: BufRead, W: Write>(
    has_fields: bool,
    input: &mut R,
    output: &mut W,
) -> Result<RunChoice> {
    loop {
        let prompt_change_values = if has_fields { "/[c]hange values" } else { "" };

        write!(
            output,
            "{}",
            colors::prompt(&format!(
                "Are you sure you want to run? ([Y]es/[n]o{prompt_change_values}): "
            ))
        )?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            writeln!(output)?;
            return Ok(RunChoice::No);
        };

        let lowercase_input = line.trim().to_lowercase();

        if lowercase_input.as_str() == "y" || lowercase_input.is_empty() {
            return Ok(RunChoice::Yes);
        }

        if lowercase_input.as_str() == "n" {
            return Ok(RunChoice::No);
        }

        if has_fields && lowercase_input.as_str() == "c" {
            return Ok(RunChoice::ChangeValues);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_wiz_core::config::WizardConfig;
    use rust_wiz_core::field::{Transform, Validator};
    use std::io::Cursor;

    fn session() -> WizardSession {
        let fields = vec![
            FieldSpec::new("scheme", "Scheme").with_default("http"),
            FieldSpec::new("host", "Host")
                .with_example("example.com")
                .with_validator(Validator::Host)
                .with_transform(Transform::prefix("://")),
            FieldSpec::new("port", "Port")
                .with_default(":80")
                .with_validator(Validator::Port)
                .with_transform(Transform::prefix(":")),
        ];
        WizardSession::start(fields, WizardConfig::default()).unwrap()
    }

    fn run(session: &mut WizardSession, text: &str) -> (WizardOutcome, String) {
        let mut input = Cursor::new(text.as_bytes().to_vec());
        let mut output = Vec::new();
        let outcome = fill_field_values(session, &mut input, &mut output).unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_read_line_strips_line_ending() {
        let mut input = Cursor::new(b"value\r\nnext\n".to_vec());
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("value"));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("next"));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_fill_with_defaults() {
        let mut session = session();
        let (outcome, output) = run(&mut session, "\nexample.com\n\n");

        assert_eq!(outcome, WizardOutcome::Completed);
        assert_eq!(session.assemble().unwrap(), "http://example.com:80");
        assert!(output.contains("[1/3]"));
        assert!(output.contains("[3/3]"));
        assert!(output.contains("[http]"));
        assert!(output.contains("(e.g. example.com)"));
    }

    #[test]
    fn test_fill_reprompts_after_validation_failure() {
        let mut session = session();
        let (outcome, output) = run(&mut session, "\n\nexample.com\nport\n443\n");

        assert_eq!(outcome, WizardOutcome::Completed);
        assert!(output.contains("a host name or address is required"));
        assert!(output.contains("expected a port number"));
        assert_eq!(session.assemble().unwrap(), "http://example.com:443");
    }

    #[test]
    fn test_fill_with_back_navigation() {
        let mut session = session();
        let (outcome, output) = run(&mut session, "https\n<-\n\nexample.com\n\n");

        assert_eq!(outcome, WizardOutcome::Completed);
        // The scheme prompt is shown again with the typed value.
        assert!(output.contains("[https]"));
        assert_eq!(session.assemble().unwrap(), "https://example.com:80");
    }

    #[test]
    fn test_fill_aborts_at_end_of_input() {
        let mut session = session();
        let (outcome, _) = run(&mut session, "\n");

        assert_eq!(outcome, WizardOutcome::Aborted);
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn test_fill_after_rewind_shows_previous_answers() {
        let mut session = session();
        run(&mut session, "\nexample.com\n\n");
        session.rewind();

        let (outcome, output) = run(&mut session, "\n\n8080\n");
        assert_eq!(outcome, WizardOutcome::Completed);
        assert!(output.contains("[://example.com]"));
        assert_eq!(session.assemble().unwrap(), "http://example.com:8080");
    }

    #[test]
    fn test_fill_after_rewind_can_clear_optional_value() {
        let fields = vec![
            FieldSpec::new("host", "Host").with_validator(Validator::Host),
            FieldSpec::new("path", "Path").with_transform(Transform::prefix("/")),
        ];
        let mut session = WizardSession::start(fields, WizardConfig::default()).unwrap();
        let (_, output) = run(&mut session, "example.com
index.html
");
        assert!(output.contains("`<x` to clear it"));
        assert_eq!(session.assemble().unwrap(), "example.com/index.html");

        session.rewind();
        let (outcome, output) = run(&mut session, "
<x
");
        assert_eq!(outcome, WizardOutcome::Completed);
        assert!(output.contains("[/index.html]"));
        assert_eq!(session.assemble().unwrap(), "example.com");
    }

    fn confirm(has_fields: bool, text: &str) -> RunChoice {
        let mut input = Cursor::new(text.as_bytes().to_vec());
        let mut output = Vec::new();
        confirm_command_should_run(has_fields, &mut input, &mut output).unwrap()
    }

    #[test]
    fn test_confirm_choices() {
        assert_eq!(confirm(true, "\n"), RunChoice::Yes);
        assert_eq!(confirm(true, "Y\n"), RunChoice::Yes);
        assert_eq!(confirm(true, "n\n"), RunChoice::No);
        assert_eq!(confirm(true, "c\n"), RunChoice::ChangeValues);
    }

    #[test]
    fn test_confirm_ignores_change_without_fields() {
        assert_eq!(confirm(false, "c\nn\n"), RunChoice::No);
    }

    #[test]
    fn test_confirm_end_of_input_is_no() {
        assert_eq!(confirm(true, ""), RunChoice::No);
    }
}
