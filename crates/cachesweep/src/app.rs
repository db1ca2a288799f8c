use clap::{Arg, ArgAction, ArgGroup, Command};

pub fn build_cli() -> Command {
    Command::new("cachesweep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Clean system and application caches from an operation catalog")
        .long_about("cachesweep deletes the contents of well-known cache and temporary locations. Each cleanup operation is described in a catalog; every run writes a timestamped log with per-item results and a summary of the space freed.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .help("Operation catalog to use instead of the built-in one")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("log-dir")
                .long("log-dir")
                .help("Directory for cleanup logs (overrides config)")
                .value_name("DIR")
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .about("List the operations in the catalog")
                .arg(json_arg()),
        )
        .subcommand(
            selection(
                Command::new("analyze")
                    .about("Show how much the selected operations would remove"),
            )
            .arg(json_arg()),
        )
        .subcommand(
            selection(Command::new("clean").about("Run the selected cleanup operations"))
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .help("Skip the confirmation prompt")
                        .action(ArgAction::SetTrue),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("logs")
                .about("List logs from previous runs, newest first")
                .arg(json_arg()),
        )
}

/// Operation names or `--all`, exactly one of the two.
fn selection(command: Command) -> Command {
    command
        .arg(
            Arg::new("operations")
                .help("Operation names as shown by 'cachesweep list' (case-insensitive)")
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .help("Select every operation in the catalog")
                .action(ArgAction::SetTrue),
        )
        .group(
            ArgGroup::new("selection")
                .args(["operations", "all"])
                .required(true),
        )
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "cachesweep");
        app.debug_assert();
    }

    #[test]
    fn test_cli_list_json_flag() {
        let matches = build_cli()
            .try_get_matches_from(vec!["cachesweep", "list", "--json"])
            .unwrap();
        let list_matches = matches.subcommand_matches("list").unwrap();
        assert!(list_matches.get_flag("json"));
    }

    #[test]
    fn test_cli_clean_names() {
        let matches = build_cli()
            .try_get_matches_from(vec![
                "cachesweep",
                "clean",
                "User Temp Files",
                "Crash Dumps",
                "--yes",
            ])
            .unwrap();
        let clean_matches = matches.subcommand_matches("clean").unwrap();
        let names: Vec<&String> = clean_matches
            .get_many::<String>("operations")
            .unwrap()
            .collect();
        assert_eq!(names, ["User Temp Files", "Crash Dumps"]);
        assert!(clean_matches.get_flag("yes"));
        assert!(!clean_matches.get_flag("all"));
    }

    #[test]
    fn test_cli_clean_requires_selection() {
        let matches = build_cli().try_get_matches_from(vec!["cachesweep", "clean", "--yes"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_cli_all_conflicts_with_names() {
        let matches =
            build_cli().try_get_matches_from(vec!["cachesweep", "analyze", "--all", "Icon Cache"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_cli_global_args_reach_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(vec![
                "cachesweep",
                "analyze",
                "--all",
                "--catalog",
                "/tmp/catalog.toml",
                "--log-dir",
                "/tmp/logs",
            ])
            .unwrap();
        let analyze_matches = matches.subcommand_matches("analyze").unwrap();
        assert_eq!(
            analyze_matches.get_one::<String>("catalog").unwrap(),
            "/tmp/catalog.toml"
        );
        assert_eq!(
            analyze_matches.get_one::<String>("log-dir").unwrap(),
            "/tmp/logs"
        );
    }

    #[test]
    fn test_cli_verbose_flag() {
        let matches = build_cli()
            .try_get_matches_from(vec!["cachesweep", "-v", "logs"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }
}
