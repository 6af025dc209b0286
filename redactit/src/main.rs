// redactit/src/main.rs
//! redactit entry point.

use anyhow::Result;
use clap::Parser;
use log::debug;

use redactit::cli::{Cli, Commands};
use redactit::commands::{demo, filters, redact};
use redactit::logger;
use redactit::ui::theme::error_msg;

fn main() {
    if let Err(e) = run() {
        error_msg(format!("Error: {:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Cli::parse();
    logger::init_logger(logger::level_from_flags(args.quiet, args.debug));
    debug!("Parsed arguments: {:?}", args);

    match &args.command {
        Commands::Redact(cmd) => redact::run_redact(cmd),
        Commands::Filters(cmd) => filters::run_filters(cmd),
        Commands::Demo => demo::run_demo(),
    }
}
