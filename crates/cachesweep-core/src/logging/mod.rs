use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize diagnostic logging on stderr.
///
/// When `quiet` is true, only error-level events are emitted.
/// When `quiet` is false, info-level and above events are emitted.
///
/// This is the structured diagnostic stream. The per-run audit log written
/// to the log directory is handled by [`crate::journal`].
pub fn init_logging(quiet: bool) {
    // Target matching is by prefix, so this also covers `cachesweep_core`.
    let directive = if quiet {
        "cachesweep=error"
    } else {
        "cachesweep=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("Invalid log directive")),
        )
        .init();
}
