//! Tracing setup.

use tracing_subscriber::filter::EnvFilter;

/// Filter variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "RAGELANG_LOG";

/// Append logs to this file instead of stderr.
pub const LOG_PATH_ENV: &str = "RAGELANG_LOG_PATH";

/// Initialize logging, writing to `RAGELANG_LOG_PATH` if set, otherwise stderr.
///
/// Never writes to stdout: the bridge uses it for protocol frames.
pub fn init() {
    let env_var = if std::env::var_os(LOG_ENV).is_some() {
        LOG_ENV
    } else {
        EnvFilter::DEFAULT_ENV
    };
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .with_env_var(env_var)
        .from_env_lossy();

    if let Ok(path) = std::env::var(LOG_PATH_ENV)
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
