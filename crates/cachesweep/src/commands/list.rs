use clap::ArgMatches;
use tracing::info;

use super::helpers::{load_catalog, load_config};
use crate::table::TableFormatter;

pub(crate) fn handle_list_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.list_started", json_output = json_output);

    let config = load_config()?;
    let catalog = load_catalog(matches, &config)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(catalog.operations())?);
    } else if catalog.is_empty() {
        println!("The catalog has no operations.");
    } else {
        let mut table = TableFormatter::new(&["Operation", "Kind", "Targets", "Description"], 50);
        for op in catalog.operations() {
            let targets = match op.targets().len() {
                0 => "-".to_string(),
                n => n.to_string(),
            };
            table.add_row(vec![
                op.name.clone(),
                op.kind.label().to_string(),
                targets,
                op.description.clone().unwrap_or_default(),
            ]);
        }
        table.print_table();
    }

    info!(event = "cli.list_completed", count = catalog.len());
    Ok(())
}
