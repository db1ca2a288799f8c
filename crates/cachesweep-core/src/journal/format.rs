use chrono::{DateTime, Local};

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable size in 1024 steps with two decimals, e.g. `4.20 GB`.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} PB")
}

/// Log file name for a run started at `at`: minute granularity.
pub fn log_file_name(at: &DateTime<Local>, attempt: u32) -> String {
    let stamp = at.format("%Y-%m-%d_%H-%M");
    if attempt <= 1 {
        format!("cleanup_log_{stamp}.txt")
    } else {
        format!("cleanup_log_{stamp}-{attempt}.txt")
    }
}

pub fn is_log_file_name(name: &str) -> bool {
    name.starts_with("cleanup_log_") && name.ends_with(".txt")
}
