use crossterm::style::{StyledContent, Stylize};

/// Headings, such as the menu title.
pub fn heading(text: &str) -> StyledContent<&str> {
    text.cyan().bold()
}

/// The question part of a prompt.
pub fn prompt(text: &str) -> StyledContent<&str> {
    text.yellow()
}

/// Secondary information: examples, defaults, hints.
pub fn hint(text: &str) -> StyledContent<&str> {
    text.dark_grey()
}

pub fn success(text: &str) -> StyledContent<&str> {
    text.green().bold()
}

pub fn warning(text: &str) -> StyledContent<&str> {
    text.dark_yellow()
}
