//! `staffdb` entry point.

mod cli;
mod commands;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::Cli;
use staffdb_core::{init_logging, EmployeeStore, LogLevel, StoreOptions};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_exit module=cli status=error error={err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    if let Some(log_dir) = &cli.log_dir {
        let level = match &cli.log_level {
            Some(raw) => raw.parse::<LogLevel>().map_err(|err| anyhow!(err))?,
            None => LogLevel::build_default(),
        };
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let options = StoreOptions::default().with_foreign_keys(!cli.no_foreign_keys);
    let mut store = EmployeeStore::open_with(&cli.db, &options)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;

    let outcome = commands::dispatch(&store, cli);
    let closed = store.close().context("failed to close database");
    outcome?;
    closed
}
