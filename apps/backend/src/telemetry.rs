use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Environment;

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(env: Environment) -> &'static str {
    if env.is_debug() {
        "debug,actix_web=info,h2=info,hyper=info,tower=info,sqlx=warn,sea_orm=warn"
    } else {
        "info,actix_web=info,sqlx=warn,sea_orm=warn"
    }
}

/// Install the global JSON subscriber. Call once, at startup.
pub fn init_tracing(env: Environment) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(env)));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
