use std::io;
use tracing::{Level, Subscriber};
use tracing_subscriber::{filter, fmt, prelude::*, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Info and debug on stdout, warnings and errors on stderr. For binaries
/// whose stdout carries no data.
pub fn start_tracing_subscriber() {
    let stdout_log = fmt::layer();
    let stderr_log = fmt::layer().with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(env_filter())
                .with_filter(filter::filter_fn(|metadata| {
                    *metadata.level() >= Level::INFO
                })),
        )
        .with(stderr_log.with_filter(filter::LevelFilter::WARN))
        .init()
}

/// Every event on stderr, leaving stdout to the table being written.
pub fn stderr_subscriber() -> impl Subscriber + Send + Sync {
    tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(io::stderr)
            .with_filter(env_filter()),
    )
}

pub fn start_stderr_tracing_subscriber() {
    stderr_subscriber().init()
}
