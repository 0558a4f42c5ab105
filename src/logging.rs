//! Tracing subscriber setup
//!
//! Logs go to stderr so they never interleave with prompts on stdout.
//! `RUST_LOG` takes precedence over the `-v` count.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Base filter for a given `-v` count
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
pub fn init_logging(verbosity: u8) -> Result<()> {
    // Base filter suppresses noisy libraries, RUST_LOG layers on top
    let base = "ureq=warn,rustls=warn";
    let filter = match std::env::var("RUST_LOG") {
        Ok(env) => EnvFilter::new(format!("{base},{env}")),
        Err(_) => EnvFilter::new(format!("{base},{}", level_for_verbosity(verbosity))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    Ok(())
}
