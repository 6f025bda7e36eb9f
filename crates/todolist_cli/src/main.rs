//! `todolist` command-line entry point.
//!
//! # Responsibility
//! - Resolve process config, bootstrap logging and the record store.
//! - Map one command to one service call and print a JSON envelope.

mod commands;
mod config;
mod envelope;

use clap::error::ErrorKind;
use clap::Parser;
use config::Cli;
use envelope::{Response, EXIT_FAILURE, EXIT_INVALID_INPUT};
use log::info;
use std::ffi::OsString;
use todolist_core::db::open_db;
use todolist_core::{
    default_log_level, init_logging, ListService, ScanListRepository, SqliteRecordStore,
};

fn main() {
    let response = parse_and_run(std::env::args_os());
    println!("{}", response.body);
    std::process::exit(response.exit_code);
}

/// Parses `args` and runs the command; parse failures become error envelopes.
fn parse_and_run<I, T>(args: I) -> Response
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => run(cli),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),
            _ => Response::failure(err.to_string().trim_end(), EXIT_INVALID_INPUT),
        },
    }
}

fn run(cli: Cli) -> Response {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            return Response::failure(err.to_string(), EXIT_INVALID_INPUT);
        }
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        todolist_core::core_version()
    );

    let conn = match open_db(&cli.db) {
        Ok(conn) => conn,
        Err(err) => return Response::failure(err.to_string(), EXIT_FAILURE),
    };
    let store = match SqliteRecordStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => return Response::failure(err.to_string(), EXIT_FAILURE),
    };

    let service = ListService::new(ScanListRepository::new(store));
    commands::execute(&service, cli.command)
}
