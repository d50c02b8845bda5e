//! Command-line client for the customer store.
//!
//! # Responsibility
//! - Print a customer detail or picker search result as JSON.
//! - Keep a `ping` command to validate `custdesk_core` linkage.
//!
//! # Usage
//! - `custdesk_cli ping`
//! - `custdesk_cli <db-path> customer <id>`
//! - `custdesk_cli <db-path> search <term>...`
//!
//! `CUSTDESK_LOG_DIR` (absolute path) enables file logging;
//! `CUSTDESK_LOG_LEVEL` overrides the build-mode default level.

use custdesk_core::db::open_db;
use custdesk_core::{CustomerId, CustomerService, SqliteCustomerRepository};
use std::error::Error;
use std::process::ExitCode;

const USAGE: &str = "usage: custdesk_cli ping | <db-path> customer <id> | <db-path> search <term>...";

enum Command {
    Ping,
    Customer { db_path: String, id: CustomerId },
    Search { db_path: String, term: String },
}

fn main() -> ExitCode {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let Some(command) = parse_args(&args) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    if let Err(err) = init_logging_from_env() {
        eprintln!("logging disabled: {err}");
    }

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Option<Command> {
    match args {
        [ping] if ping == "ping" => Some(Command::Ping),
        [db_path, command, id] if command == "customer" => Some(Command::Customer {
            db_path: db_path.clone(),
            id: id.trim().parse().ok()?,
        }),
        [db_path, command, term @ ..] if command == "search" && !term.is_empty() => {
            Some(Command::Search {
                db_path: db_path.clone(),
                term: term.join(" "),
            })
        }
        _ => None,
    }
}

fn init_logging_from_env() -> Result<(), Box<dyn Error>> {
    let Ok(log_dir) = std::env::var("CUSTDESK_LOG_DIR") else {
        return Ok(());
    };
    let level = std::env::var("CUSTDESK_LOG_LEVEL")
        .unwrap_or_else(|_| custdesk_core::default_log_level().to_string());
    custdesk_core::init_logging(&level, &log_dir)?;
    Ok(())
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Ping => {
            println!("custdesk_core ping={}", custdesk_core::ping());
            println!("custdesk_core version={}", custdesk_core::core_version());
        }
        Command::Customer { db_path, id } => {
            let conn = open_db(&db_path)?;
            let service = CustomerService::new(SqliteCustomerRepository::new(&conn));
            let detail = service.customer_detail(id)?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Command::Search { db_path, term } => {
            let conn = open_db(&db_path)?;
            let service = CustomerService::new(SqliteCustomerRepository::new(&conn));
            let hits = service.search_customers(&term)?;
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
    }
    Ok(())
}
