use std::io::{self, BufRead, Write};

use clap::ArgMatches;
use tracing::{error, info, warn};

use cachesweep_core::events;
use cachesweep_core::{LogHeader, OperationSpec, RunSummary, Worker, WorkerEvent, format_size};

use super::helpers::{build_engine, load_catalog, load_config, resolve_log_dir, select_operations};

pub(crate) fn handle_clean_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let assume_yes = matches.get_flag("yes");

    let config = load_config()?;
    let catalog = load_catalog(matches, &config)?;
    let selected = select_operations(matches, &catalog)?;
    let engine = build_engine(&config)?;
    let log_dir = resolve_log_dir(matches, &config);

    info!(
        event = "cli.clean_started",
        operations = selected.len(),
        log_dir = %log_dir.display(),
        assume_yes = assume_yes
    );

    if !assume_yes && !confirm(&selected, &mut io::stdin().lock())? {
        eprintln!("Cleanup aborted.");
        info!(event = "cli.clean_declined");
        return Ok(());
    }

    let total = selected.len();
    let worker = Worker::new(selected, config.root_map(), &log_dir)
        .with_engine(engine)
        .with_header(LogHeader::new(config.app_name()));

    // Ctrl-C stops the run before its next item, so the log still gets
    // its summary footer.
    let cancel = worker.cancellation_token();
    if let Err(e) = ctrlc::set_handler(move || {
        info!(event = "cli.clean_interrupted");
        cancel.cancel();
    }) {
        warn!(event = "cli.clean_signal_handler_failed", error = %e);
    }

    let (tx, rx) = crossbeam_channel::unbounded();
    let handle = worker.spawn(tx)?;

    let mut printer = EventPrinter::new(total);
    for event in rx {
        if !json_output {
            printer.print(&event);
        }
    }

    let summary = match handle.join() {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Cleanup failed: {}", e);
            error!(event = "cli.clean_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    info!(
        event = "cli.clean_completed",
        outcome = %summary.outcome,
        operations_performed = summary.operations_performed,
        total_failed = summary.total_failed,
        bytes_freed = summary.total_bytes_freed
    );
    Ok(())
}

/// Ask on stderr so stdout stays machine-readable under `--json`.
fn confirm(selected: &[OperationSpec], input: &mut dyn BufRead) -> io::Result<bool> {
    let mut stderr = io::stderr();
    writeln!(stderr, "The following operations will delete files:")?;
    for op in selected {
        writeln!(stderr, "  - {}", op.name)?;
    }
    write!(stderr, "Continue? [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        warn!(event = "cli.clean_confirmation_eof");
        return Ok(false);
    }
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

struct EventPrinter {
    started: usize,
    total: usize,
}

impl EventPrinter {
    fn new(total: usize) -> Self {
        Self { started: 0, total }
    }

    fn print(&mut self, event: &WorkerEvent) {
        match event {
            WorkerEvent::OperationStarted(name) => {
                self.started += 1;
                println!("[{}/{}] {}", self.started, self.total, name);
            }
            WorkerEvent::Status(message) => println!("      {}", message),
            WorkerEvent::OperationCompleted {
                success_count,
                failed_count,
                bytes_freed,
                ..
            } => println!(
                "      Success: {}, Failed: {}, Freed: {}",
                success_count,
                failed_count,
                format_size(*bytes_freed)
            ),
            WorkerEvent::Error(message) => eprintln!("      Error: {}", message),
            WorkerEvent::Progress(_) | WorkerEvent::RunCompleted(_) => {}
        }
    }
}

fn print_summary(summary: &RunSummary) {
    println!();
    if summary.was_cancelled() {
        println!("Cleanup cancelled after {:.1}s", summary.elapsed_secs());
    } else {
        println!("Cleanup completed in {:.1}s", summary.elapsed_secs());
    }
    println!("  Operations performed: {}", summary.operations_performed);
    println!("  Items deleted:        {}", summary.total_success);
    println!("  Items failed:         {}", summary.total_failed);
    println!("  Space freed:          {}", format_size(summary.total_bytes_freed));
    match &summary.log_path {
        Some(path) => println!("  Log file:             {}", path.display()),
        None => println!("  Log file:             (not written)"),
    }
}
