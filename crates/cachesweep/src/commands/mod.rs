use clap::ArgMatches;
use tracing::error;

use cachesweep_core::events;

pub mod helpers;

mod analyze;
mod clean;
mod list;
mod logs;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("list", sub_matches)) => list::handle_list_command(sub_matches),
        Some(("analyze", sub_matches)) => analyze::handle_analyze_command(sub_matches),
        Some(("clean", sub_matches)) => clean::handle_clean_command(sub_matches),
        Some(("logs", sub_matches)) => logs::handle_logs_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
