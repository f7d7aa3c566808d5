use std::io::{stdin, stdout, Write};
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use rust_wiz_core::error::{Error, Result};
use rust_wiz_core::executor::Executor;
use rust_wiz_core::file_handling;

use rust_wiz_cli::cli_args::Args;
use rust_wiz_cli::run::{run_definition, run_menu, RunOptions};
use rust_wiz_cli::wizard_selection::resolve_wizard;
use rust_wiz_cli::wizard_selection::ui::print_wizard_list;

fn execute() -> Result<()> {
    let args = Args::parse();

    let wizards = file_handling::load_wizard_definitions(args.config_path.as_deref())?;
    debug!("Loaded {} wizards", wizards.len());

    let mut stdout = stdout().lock();

    if args.list {
        print_wizard_list(&wizards, &mut stdout)?;
        stdout.flush()?;
        return Ok(());
    }

    let executor = Executor::new(args.executor_config());
    let options = RunOptions {
        dry_run: args.dry_run,
        force: args.force,
    };
    let mut stdin = stdin().lock();

    match &args.wizard {
        Some(query) => {
            let index = resolve_wizard(&wizards, query)
                .ok_or_else(|| Error::WizardNotFound(query.clone()))?;
            run_definition(&wizards[index], &executor, options, &mut stdin, &mut stdout)?;
            Ok(())
        }
        None => run_menu(&wizards, &executor, options, &mut stdin, &mut stdout),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
