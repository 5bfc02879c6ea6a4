use tracing_subscriber::{fmt, EnvFilter};

/// Env var that switches log output to JSON when set to `1`.
pub const LOG_JSON_ENV: &str = "ANVIL_LOG_JSON";

/// Install the global subscriber. Later calls are no-ops.
///
/// Filtering follows `RUST_LOG` and defaults to `info`. Output goes to stderr.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let use_json = std::env::var(LOG_JSON_ENV)
        .map(|value| value == "1")
        .unwrap_or(false);

    if use_json {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .json()
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
