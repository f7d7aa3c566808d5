//! Type definitions for wizard selection and the run flow.

/// Represents the user's wizard selection choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardChoice {
    Index(usize),
    Quit,
}

/// Represents the user's choice when confirming a command run.
///
/// After the wizard is complete and the command is shown, the user
/// is prompted to confirm execution with these options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunChoice {
    Yes,
    No,
    ChangeValues,
}

/// How a pass through the wizard's fields ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOutcome {
    Completed,
    /// Input ran out before the last field.
    Aborted,
}
