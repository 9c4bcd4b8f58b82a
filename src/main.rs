use clap::Parser;

mod cli;
mod commands;
mod domain;
mod error;
mod services;

use cli::Cli;
use commands::{
    handle_catalog_commands, handle_lookup_commands, handle_report_commands,
    handle_runtime_commands,
};
use error::error_code;
use services::catalog::WardCatalog;
use services::config::load_settings;
use services::history::HistoryStore;
use services::logging::init_tracing;
use services::output::print_error;
use services::storage::CsvHistoryFile;

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        tracing::debug!(error = ?err, "command failed");
        print_error(cli.json, error_code(&err), &format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = load_settings(cli)?;

    if handle_lookup_commands(cli)? {
        return Ok(());
    }

    let catalog = WardCatalog::load(&settings.data.wards)?;
    if handle_catalog_commands(cli, &catalog)? {
        return Ok(());
    }

    let storage = CsvHistoryFile::new(&settings.data.history);
    let mut store = HistoryStore::initialize(storage, &catalog.ward_numbers())?;

    if handle_runtime_commands(cli, &settings, &catalog, &mut store)? {
        return Ok(());
    }
    handle_report_commands(cli, &settings, &catalog, &mut store)?;
    Ok(())
}
