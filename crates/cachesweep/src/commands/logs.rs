use clap::ArgMatches;
use tracing::{error, info};

use cachesweep_core::events;
use cachesweep_core::journal::list_logs;

use super::helpers::{load_config, resolve_log_dir};
use crate::table::TableFormatter;

pub(crate) fn handle_logs_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    let config = load_config()?;
    let log_dir = resolve_log_dir(matches, &config);

    info!(event = "cli.logs_started", dir = %log_dir.display());

    let logs = match list_logs(&log_dir) {
        Ok(logs) => logs,
        Err(e) => {
            eprintln!("Failed to read log directory {}: {}", log_dir.display(), e);
            error!(event = "cli.logs_failed", dir = %log_dir.display(), error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&logs)?);
    } else if logs.is_empty() {
        println!("No cleanup logs found in {}", log_dir.display());
    } else {
        let mut table = TableFormatter::new(&["Log", "Modified", "Status", "Freed"], 60);
        for log in &logs {
            let name = log
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            table.add_row(vec![
                name,
                log.modified.format("%Y-%m-%d %H:%M").to_string(),
                if log.complete { "complete" } else { "incomplete" }.to_string(),
                log.space_freed.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        table.print_table();
    }

    info!(event = "cli.logs_completed", count = logs.len());
    Ok(())
}
