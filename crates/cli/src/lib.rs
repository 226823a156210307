pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use staffdesk_core::config::{AppConfig, LoadOptions};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "staffdesk",
    about = "Staffdesk employee change-request CLI",
    long_about = "Detect field change requests in free-text employee questions and record them as pending change requests.",
    after_help = "Examples:\n  staffdesk migrate\n  staffdesk seed\n  staffdesk ask EMP001 \"please update my email to me@example.com\"\n  staffdesk requests EMP001"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the deterministic demo employee directory")]
    Seed,
    #[command(about = "Classify a request for one employee and log a pending change if needed")]
    Ask {
        #[arg(help = "Employee code, e.g. EMP001")]
        emp_code: String,
        #[arg(help = "Free-text request from or about the employee")]
        question: String,
    },
    #[command(about = "List recorded change requests for one employee")]
    Requests {
        #[arg(help = "Employee code, e.g. EMP001")]
        emp_code: String,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, DB connectivity, and schema readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        if let Err(error) = logging::init_logging(&config) {
            eprintln!("{error}");
        }
    }

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Ask { emp_code, question } => commands::ask::run(&emp_code, &question),
        Command::Requests { emp_code } => commands::requests::run(&emp_code),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
