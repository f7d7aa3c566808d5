//! Typed command lines.
//!
//! A [`CommandLine`] is a program plus a list of discrete argument tokens.
//! It is handed to the operating system as an argv vector, never through a
//! shell, so assembled values cannot merge with or escape from neighbouring
//! arguments.

use std::fmt::{Display, Formatter};
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    #[must_use]
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_string()));
        self
    }

    /// Builds a command line from already separated tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandLine`] when there are no tokens or the
    /// program token is blank.
    pub fn from_tokens(tokens: Vec<String>) -> Result<Self> {
        let mut tokens = tokens.into_iter();
        let program = tokens.next().unwrap_or_default();

        if program.trim().is_empty() {
            return Err(Error::CommandLine(
                program,
                "no program to run".to_string(),
            ));
        }

        Ok(Self {
            program,
            args: tokens.collect(),
        })
    }

    /// Splits `text` into tokens using POSIX shell quoting rules.
    ///
    /// Only the quoting rules are borrowed: no expansion, globbing or
    /// redirection takes place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandLine`] for unbalanced quotes or empty input.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_wiz_core::command_line::CommandLine;
    ///
    /// let command = CommandLine::parse("curl -H 'Accept: text/html' example.com")?;
    /// assert_eq!(command.program, "curl");
    /// assert_eq!(command.args, ["-H", "Accept: text/html", "example.com"]);
    /// # Ok::<(), rust_wiz_core::error::Error>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let tokens = shlex::split(text).ok_or_else(|| {
            Error::CommandLine(text.to_string(), "unbalanced quotes".to_string())
        })?;

        Self::from_tokens(tokens).map_err(|_| {
            Error::CommandLine(text.to_string(), "no program to run".to_string())
        })
    }

    /// Creates the [`Command`] for this line. Stdio is left to the caller.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl Display for CommandLine {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let tokens = std::iter::once(&self.program).chain(&self.args);

        for (i, token) in tokens.enumerate() {
            if i > 0 {
                formatter.write_str(" ")?;
            }
            // Tokens with a nul byte cannot be quoted; show them raw.
            match shlex::try_quote(token) {
                Ok(quoted) => formatter.write_str(&quoted)?,
                Err(_) => formatter.write_str(token)?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let command = CommandLine::parse("echo hello").unwrap();
        assert_eq!(command, CommandLine::new("echo").arg("hello"));
    }

    #[test]
    fn test_parse_keeps_quoted_token_together() {
        let command = CommandLine::parse(r#"ffuf -H "Host: FUZZ.example.com""#).unwrap();
        assert_eq!(command.args, ["-H", "Host: FUZZ.example.com"]);
    }

    #[test]
    fn test_parse_unbalanced_quotes() {
        let result = CommandLine::parse("echo 'oops");
        assert!(matches!(result, Err(Error::CommandLine(_, reason)) if reason == "unbalanced quotes"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(CommandLine::parse("").is_err());
        assert!(CommandLine::parse("   ").is_err());
    }

    #[test]
    fn test_from_tokens_rejects_blank_program() {
        assert!(CommandLine::from_tokens(vec![]).is_err());
        assert!(CommandLine::from_tokens(vec![String::new(), "x".to_string()]).is_err());
    }

    #[test]
    fn test_display_quotes_tokens() {
        let command = CommandLine::new("curl")
            .arg("-H")
            .arg("Accept: */*")
            .arg("http://example.com");
        let rendered = command.to_string();
        assert!(rendered.starts_with("curl -H "));
        // The header must stay one token when pasted back into a shell.
        assert_eq!(shlex::split(&rendered).unwrap().len(), 4);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let command = CommandLine::new("echo").args(["it's", "two words", ""]);
        let reparsed = CommandLine::parse(&command.to_string()).unwrap();
        assert_eq!(reparsed, command);
    }

    #[test]
    fn test_to_command() {
        let command = CommandLine::new("dig").arg("example.com").to_command();
        assert_eq!(command.get_program(), "dig");
        assert_eq!(command.get_args().collect::<Vec<_>>(), ["example.com"]);
    }
}
