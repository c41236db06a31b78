//! Logging configuration and setup
//!
//! This module provides tracing initialization for the splitmate ledger
//! core. Log output goes both to stdout and to a daily-rolling file.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned [`WorkerGuard`] must be kept alive by the caller for the
/// lifetime of the process; dropping it stops the background writer and
/// loses buffered log lines.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, "splitmate.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    tracing::info!(level = %config.level, "Logging initialized");
    Ok(guard)
}

/// Log a ledger mutation with structured context.
///
/// Used by the services for every state-changing operation so the audit
/// trail has one consistent shape.
pub fn log_ledger_mutation(operation: &str, group_id: i64, actor_id: i64, amount: Option<&str>) {
    tracing::info!(
        operation = operation,
        group_id = group_id,
        actor_id = actor_id,
        amount = amount,
        "Ledger mutation applied"
    );
}
