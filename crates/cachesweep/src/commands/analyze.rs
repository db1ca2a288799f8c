use clap::ArgMatches;
use tracing::info;

use cachesweep_core::{Analyzer, format_size};

use super::helpers::{load_catalog, load_config, select_operations};
use crate::table::TableFormatter;

pub(crate) fn handle_analyze_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    let config = load_config()?;
    let catalog = load_catalog(matches, &config)?;
    let selected = select_operations(matches, &catalog)?;

    info!(
        event = "cli.analyze_started",
        operations = selected.len(),
        json_output = json_output
    );

    let roots = config.root_map();
    let report = Analyzer::new(&roots).analyze_all(&selected);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let mut table = TableFormatter::new(
            &["Operation", "Kind", "Locations", "Files", "Dirs", "Size"],
            40,
        );
        for row in &report.operations {
            table.add_row(vec![
                row.name.clone(),
                row.kind.to_string(),
                row.locations.to_string(),
                row.analysis.total_files.to_string(),
                row.analysis.total_dirs.to_string(),
                format_size(row.analysis.total_bytes),
            ]);
        }
        table.print_table();
        println!(
            "Total: {} in {} files and {} directories",
            format_size(report.total.total_bytes),
            report.total.total_files,
            report.total.total_dirs
        );
    }

    info!(
        event = "cli.analyze_completed",
        operations = report.operations.len(),
        total_bytes = report.total.total_bytes
    );
    Ok(())
}
