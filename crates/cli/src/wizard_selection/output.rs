use std::io::Write;

use rust_wiz_core::error::Result;
use rust_wiz_core::executor::ExecutionResult;

use super::colors;

fn print_stream<W: Write>(output: &mut W, name: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }

    writeln!(output, "{}", colors::hint(&format!("--- {name} ---")))?;
    write!(output, "{text}")?;
    if !text.ends_with('\n') {
        writeln!(output)?;
    }

    Ok(())
}

/// Writes the status line and any captured output of an execution.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_execution_result<W: Write>(result: &ExecutionResult, output: &mut W) -> Result<()> {
    let status = result.to_string();

    if result.is_success() {
        writeln!(output, "{}", colors::success(&status))?;
    } else {
        writeln!(output, "{}", colors::warning(&status))?;
    }

    print_stream(output, "stdout", result.stdout())?;
    print_stream(output, "stderr", result.stderr())?;

    if result.is_timeout() && result.stdout().is_empty() && result.stderr().is_empty() {
        writeln!(output, "{}", colors::hint("(no output captured)"))?;
    }

    output.flush()?;
    Ok(())
}
