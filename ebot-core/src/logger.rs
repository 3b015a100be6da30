//! Tracing initialization: console always, optional log file via the same fmt layer.

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Initializes the global tracing subscriber.
/// Console and the optional append-mode log file share the fmt layer's full format
/// (level, target, span, all fields), so both outputs match.
/// The level comes from RUST_LOG (e.g. info, debug, trace); unset defaults to info.
/// Load .env (e.g. dotenvy::dotenv()) before calling, or RUST_LOG is not picked up.
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file = Arc::new(file);

            use tracing_subscriber::fmt::writer::MakeWriterExt;
            let writer = io::stdout.and(file);

            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_file(false)
                .with_line_number(false);

            Registry::default()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;
        }
        None => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_file(false)
                .with_line_number(false);

            Registry::default()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;
        }
    }

    Ok(())
}
