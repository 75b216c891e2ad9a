/// File logging for hosts embedding the report builders.
///
/// Logs go to `{log_dir}/chat-stats.log`; each session appends to the file
/// after a separator line.
use anyhow::{Context, Result};
use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "chat-stats.log";

/// Installs the global `tracing` subscriber writing to `log_dir`.
///
/// Uses `RUST_LOG` when set, `info,chat_stats=debug` otherwise. If a global
/// subscriber is already installed the call only writes the separator.
///
/// # Arguments
///
/// * `log_dir` - Directory for the log file, created if missing
/// * `session_label` - Free-form label written into the separator (e.g. the chat name)
pub fn init_logging(log_dir: &Path, session_label: &str) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,chat_stats=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .ok(); // Ignore error if already initialized

    let separator = format!(
        "\n{sep}\n[{ts}] New stats session: {label}\n{sep}\n",
        sep = "=".repeat(80),
        ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        label = session_label
    );

    use std::io::Write;
    let log_path = log_dir.join(LOG_FILE_NAME);
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;
    writeln!(file, "{}", separator)
        .with_context(|| format!("Failed to write log file: {}", log_path.display()))?;

    tracing::info!("Logging initialized for session: {}", session_label);

    Ok(())
}
