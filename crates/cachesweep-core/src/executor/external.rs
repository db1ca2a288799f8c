//! External maintenance tools (e.g. DISM) run with fixed arguments.
//!
//! The tool's exit status is the only measurement available: success is one
//! symbolic unit, anything else one failure. No bytes are ever reported.

use std::io;
use std::process::{Command, Output, Stdio};

use tracing::{error, info, warn};

use crate::deletion::TargetResult;
use crate::journal::RunLog;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

pub fn run_tool(program: &str, args: &[String], log: &mut RunLog) -> io::Result<TargetResult> {
    let resolved = match which::which(program) {
        Ok(path) => path,
        Err(e) => {
            warn!(event = "core.executor.tool_not_found", program = program, error = %e);
            log.failure(format!("{program} operation"), format!("{program} not found: {e}"))?;
            return Ok(TargetResult::failure());
        }
    };

    info!(
        event = "core.executor.tool_started",
        program = %resolved.display(),
        args = ?args
    );

    let mut command = Command::new(&resolved);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    hide_console(&mut command);

    let output = match command.output() {
        Ok(output) => output,
        Err(e) => {
            error!(event = "core.executor.tool_launch_failed", program = program, error = %e);
            log.failure(format!("{program} operation"), &e)?;
            return Ok(TargetResult::failure());
        }
    };

    if output.status.success() {
        log_lines(log, &format!("{program} output:"), &output.stdout)?;
        log.success(format!("{program} completed successfully"))?;
        info!(event = "core.executor.tool_completed", program = program);
        return Ok(TargetResult::success(0));
    }

    let reason = exit_reason(&output);
    warn!(event = "core.executor.tool_failed", program = program, reason = %reason);
    log.failure(format!("{program} operation"), &reason)?;
    log_lines(log, &format!("{program} error output:"), &output.stderr)?;
    Ok(TargetResult::failure())
}

fn exit_reason(output: &Output) -> String {
    match output.status.code() {
        Some(code) => format!("Process returned error code: {code}"),
        None => "Process was terminated by a signal".to_string(),
    }
}

/// Write captured output as indented INFO lines under a heading. Blank
/// output writes nothing.
fn log_lines(log: &mut RunLog, heading: &str, bytes: &[u8]) -> io::Result<()> {
    let text = String::from_utf8_lossy(bytes);
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty()).peekable();
    if lines.peek().is_none() {
        return Ok(());
    }
    log.info(heading)?;
    for line in lines {
        log.info(format!("  {line}"))?;
    }
    Ok(())
}

#[cfg(windows)]
fn hide_console(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    command.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console(_command: &mut Command) {}
