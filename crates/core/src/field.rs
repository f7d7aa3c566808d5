//! Field descriptors for the wizard.
//!
//! A [`FieldSpec`] is static data: what to ask, what to fall back to, how to
//! check the answer and how to shape it before assembly. Fields are usually
//! loaded from the wizard definitions YAML, but can also be built in code.

use std::fmt::{Debug, Display, Formatter};

use serde::Deserialize;

/// Checks raw input for one field.
#[derive(Deserialize, Clone, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    /// Accepts anything, including nothing.
    #[default]
    Any,
    /// Rejects blank input.
    NonEmpty,
    /// Rejects input containing whitespace.
    NoWhitespace,
    /// Accepts one of a fixed set of values.
    OneOf { options: Vec<String> },
    /// A TCP/UDP port, `1..=65535`, with or without a leading `:`.
    Port,
    /// A host name or address: non-empty, no leading `-`, no whitespace,
    /// `/` or `@`.
    Host,
    /// A whole number within `min..=max`.
    Range { min: u64, max: u64 },
    /// Accepts blank input, otherwise defers to `inner`.
    Optional { inner: Box<Validator> },
    /// A predicate supplied in code.
    #[serde(skip)]
    Predicate {
        check: fn(&str) -> bool,
        message: String,
    },
}

impl Debug for Validator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::NonEmpty => f.write_str("NonEmpty"),
            Self::NoWhitespace => f.write_str("NoWhitespace"),
            Self::OneOf { options } => f.debug_struct("OneOf").field("options", options).finish(),
            Self::Port => f.write_str("Port"),
            Self::Host => f.write_str("Host"),
            Self::Range { min, max } => f
                .debug_struct("Range")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::Optional { inner } => f.debug_struct("Optional").field("inner", inner).finish(),
            Self::Predicate { message, .. } => f
                .debug_struct("Predicate")
                .field("message", message)
                .finish_non_exhaustive(),
        }
    }
}

impl Validator {
    /// Validates `input`, returning the reason it was rejected.
    ///
    /// # Errors
    ///
    /// Returns a human readable reason when the input is not acceptable.
    pub fn check(&self, input: &str) -> std::result::Result<(), String> {
        match self {
            Self::Any => Ok(()),
            Self::NonEmpty => {
                if input.trim().is_empty() {
                    Err("a value is required".to_string())
                } else {
                    Ok(())
                }
            }
            Self::NoWhitespace => {
                if input.chars().any(char::is_whitespace) {
                    Err("whitespace is not allowed".to_string())
                } else {
                    Ok(())
                }
            }
            Self::OneOf { options } => {
                if options.iter().any(|option| option == input) {
                    Ok(())
                } else {
                    Err(format!("expected one of: {}", options.join(", ")))
                }
            }
            Self::Port => {
                let digits = input.strip_prefix(':').unwrap_or(input);
                match parse_digits::<u16>(digits) {
                    Some(port) if port > 0 => Ok(()),
                    _ => Err("expected a port number between 1 and 65535".to_string()),
                }
            }
            Self::Host => {
                if input.is_empty() {
                    Err("a host name or address is required".to_string())
                } else if input.starts_with('-') {
                    Err("a host may not start with `-`".to_string())
                } else if input
                    .chars()
                    .any(|c| c.is_whitespace() || c == '/' || c == '@')
                {
                    Err("a host may not contain whitespace, `/` or `@`".to_string())
                } else {
                    Ok(())
                }
            }
            Self::Range { min, max } => match parse_digits::<u64>(input) {
                Some(value) if (*min..=*max).contains(&value) => Ok(()),
                _ => Err(format!("expected a number between {min} and {max}")),
            },
            Self::Optional { inner } => {
                if input.is_empty() {
                    Ok(())
                } else {
                    inner.check(input)
                }
            }
            Self::Predicate { check, message } => {
                if check(input) {
                    Ok(())
                } else {
                    Err(message.clone())
                }
            }
        }
    }
}

/// Parses plain ASCII digits. `str::parse` alone would also take a sign.
fn parse_digits<T: std::str::FromStr>(input: &str) -> Option<T> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    input.parse().ok()
}

/// Shapes an accepted value before it is stored.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    #[default]
    Identity,
    /// Surrounds the value, unless it already carries the prefix/suffix.
    Wrap {
        #[serde(default)]
        prefix: String,
        #[serde(default)]
        suffix: String,
    },
}

impl Transform {
    #[must_use]
    pub fn prefix(prefix: &str) -> Self {
        Self::Wrap {
            prefix: prefix.to_string(),
            suffix: String::new(),
        }
    }

    #[must_use]
    pub fn suffix(suffix: &str) -> Self {
        Self::Wrap {
            prefix: String::new(),
            suffix: suffix.to_string(),
        }
    }

    #[must_use]
    pub fn apply(&self, value: &str) -> String {
        match self {
            Self::Identity => value.to_string(),
            Self::Wrap { prefix, suffix } => {
                let mut wrapped = String::with_capacity(prefix.len() + value.len() + suffix.len());
                if !value.starts_with(prefix.as_str()) {
                    wrapped.push_str(prefix);
                }
                wrapped.push_str(value);
                if !value.ends_with(suffix.as_str()) {
                    wrapped.push_str(suffix);
                }
                wrapped
            }
        }
    }
}

/// One step of a wizard.
///
/// `default` is held in its final, assembled form. An empty default marks
/// the field optional (contributes nothing) unless the validator rejects
/// blank input, in which case the user must type something.
#[derive(Deserialize, Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default)]
    pub prompt: String,
    pub example: Option<String>,
    #[serde(default)]
    pub default: String,
    #[serde(default)]
    pub validator: Validator,
    #[serde(default)]
    pub transform: Transform,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: &str, prompt: &str) -> Self {
        Self {
            name: name.to_string(),
            prompt: prompt.to_string(),
            example: None,
            default: String::new(),
            validator: Validator::Any,
            transform: Transform::Identity,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: &str) -> Self {
        self.default = default.to_string();
        self
    }

    #[must_use]
    pub fn with_example(mut self, example: &str) -> Self {
        self.example = Some(example.to_string());
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// True when pressing enter on an untouched field cannot advance.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_empty() && self.validator.check("").is_err()
    }
}

impl Display for FieldSpec {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.prompt.is_empty() {
            write!(formatter, "`{}`", self.name)
        } else {
            formatter.write_str(&self.prompt)
        }
    }
}
