use std::io::{BufRead, Write};

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use log::debug;
use rust_wiz_core::definitions::WizardDefinition;
use rust_wiz_core::error::Result;

use super::colors;
use super::input::read_line;
use super::types::WizardChoice;
use super::QUIT_OPTION;

fn pad_to_width_of(value: usize, max_number: usize) -> String {
    let width = max_number.to_string().len();
    format!("{value:>width$}")
}

/// Writes the numbered list of wizards.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_wizard_list<W: Write>(wizards: &[WizardDefinition], output: &mut W) -> Result<()> {
    for (i, wizard) in wizards.iter().enumerate() {
        writeln!(output, "[{}] {wizard}", pad_to_width_of(i + 1, wizards.len()))?;
    }

    Ok(())
}

/// Finds the wizard a user meant by `query`.
///
/// Tries, in order: an exact ID, a 1-based index, and the best fuzzy match
/// against each wizard's ID and description.
#[must_use]
pub fn resolve_wizard(wizards: &[WizardDefinition], query: &str) -> Option<usize> {
    let query = query.trim();

    if query.is_empty() {
        return None;
    }

    if let Some(index) = wizards.iter().position(|wizard| wizard.id == query) {
        return Some(index);
    }

    if let Ok(number) = query.parse::<usize>() {
        return (1..=wizards.len()).contains(&number).then(|| number - 1);
    }

    let matcher = SkimMatcherV2::default();

    let best = wizards
        .iter()
        .enumerate()
        .filter_map(|(i, wizard)| {
            matcher
                .fuzzy_match(&wizard.to_string(), query)
                .map(|score| (score, i))
        })
        // Highest score wins; on a tie the earlier wizard does.
        .max_by(|(s1, i1), (s2, i2)| s1.cmp(s2).then(i2.cmp(i1)));

    debug!("Fuzzy match for `{query}`: {best:?}");

    best.map(|(_, i)| i)
}

/// Shows the wizard menu until the user picks a wizard or quits.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn prompt_for_wizard_choice<R: BufRead, W: Write>(
    wizards: &[WizardDefinition],
    input: &mut R,
    output: &mut W,
) -> Result<WizardChoice> {
    loop {
        writeln!(output, "\n{}", colors::heading("Available wizards:"))?;
        print_wizard_list(wizards, output)?;
        writeln!(output, "[{QUIT_OPTION}] Quit")?;
        write!(output, "{}", colors::prompt("Choose a wizard: "))?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            writeln!(output)?;
            return Ok(WizardChoice::Quit);
        };

        let choice = line.trim();

        if choice.eq_ignore_ascii_case(&QUIT_OPTION.to_string()) {
            return Ok(WizardChoice::Quit);
        }

        match resolve_wizard(wizards, choice) {
            Some(index) => return Ok(WizardChoice::Index(index)),
            None => writeln!(
                output,
                "{}",
                colors::warning(&format!("No wizard matches `{choice}`."))
            )?,
        }
    }
}
