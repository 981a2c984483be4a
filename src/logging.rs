use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "ROLLCALL_LOG";
const DEFAULT_LEVEL: &str = "warn";

/// Installs a stderr subscriber filtered by `ROLLCALL_LOG`.
///
/// Rendered output goes to stdout, so diagnostics must never share it.
/// Returns `false` if a global subscriber was already set.
pub fn init_logging() -> bool {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(false),
        )
        .try_init()
        .is_ok()
}
