//! The interactive run flow.
//!
//! One pass is: fill in the wizard, show what it built, confirm, execute and
//! print the result. Whatever happens inside a pass (rejected values, a
//! failing or hung command) the flow comes back to the caller in a stable
//! state, ready for the next pass.

use std::io::{BufRead, Write};

use log::info;
use rust_wiz_core::command_line::CommandLine;
use rust_wiz_core::config::WizardConfig;
use rust_wiz_core::definitions::WizardDefinition;
use rust_wiz_core::error::Result;
use rust_wiz_core::executor::{ExecutionResult, Executor};
use rust_wiz_core::interpolation::render_command;

use crate::wizard_selection::{
    colors, confirm_command_should_run, fill_field_values, print_execution_result,
    prompt_for_wizard_choice, RunChoice, WizardChoice, WizardOutcome,
};

/// Flags that change how a pass ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Show the command but do not run it.
    pub dry_run: bool,
    /// Run without asking for confirmation.
    pub force: bool,
}

/// What the caller should do after a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// The wizard only built an artifact.
    Built(String),
    /// The command was shown but not run.
    Skipped(CommandLine),
    Executed(CommandLine, ExecutionResult),
    /// Input ended; stop prompting.
    Quit,
}

/// Runs one pass of `definition`.
///
/// # Errors
///
/// Returns an error if the definition is not a valid wizard, its command
/// cannot be rendered, or terminal I/O fails. Execution problems are not
/// errors: they are part of [`Flow::Executed`].
pub fn run_definition<R: BufRead, W: Write>(
    definition: &WizardDefinition,
    executor: &Executor,
    options: RunOptions,
    input: &mut R,
    output: &mut W,
) -> Result<Flow> {
    let mut session = definition.start(WizardConfig::default())?;

    writeln!(output, "\n{}", colors::heading(&definition.to_string()))?;

    let command = loop {
        if fill_field_values(&mut session, input, output)? == WizardOutcome::Aborted {
            return Ok(Flow::Quit);
        }

        let artifact = session.assemble()?;

        let Some(command) = render_command(definition, &session)? else {
            writeln!(output, "Result:\n{}", colors::success(&artifact))?;
            return Ok(Flow::Built(artifact));
        };

        writeln!(output, "Command:\n{}", colors::success(&command.to_string()))?;

        if options.dry_run {
            writeln!(output, "Dry run is specified, not executing.")?;
            return Ok(Flow::Skipped(command));
        }

        if options.force {
            break command;
        }

        match confirm_command_should_run(!session.is_empty(), input, output)? {
            RunChoice::Yes => break command,
            RunChoice::No => {
                writeln!(output, "Execution skipped.")?;
                return Ok(Flow::Skipped(command));
            }
            RunChoice::ChangeValues => session.rewind(),
        }
    };

    let request = executor.request(command.clone());
    info!("Running wizard `{}`: {}", definition.id, command);
    writeln!(
        output,
        "{}",
        colors::hint(&format!(
            "Executing (timeout {}s)...",
            request.timeout.as_secs()
        ))
    )?;
    output.flush()?;

    let result = executor.execute(&request);
    print_execution_result(&result, output)?;

    Ok(Flow::Executed(command, result))
}

/// Shows the wizard menu and runs the chosen wizards until the user quits.
///
/// # Errors
///
/// Returns an error on terminal I/O failure or an invalid wizard.
pub fn run_menu<R: BufRead, W: Write>(
    wizards: &[WizardDefinition],
    executor: &Executor,
    options: RunOptions,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        let index = match prompt_for_wizard_choice(wizards, input, output)? {
            WizardChoice::Index(index) => index,
            WizardChoice::Quit => return Ok(()),
        };

        if run_definition(&wizards[index], executor, options, input, output)? == Flow::Quit {
            return Ok(());
        }
    }
}
