use std::io::IsTerminal;

use tracing_subscriber::{fmt, EnvFilter};

/// Maps a `-v` repetition count to a default filter directive.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the verbosity-derived
/// default; HTTP internals stay at `warn` unless asked for explicitly.
pub fn init_logging(verbosity: u8) {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let default_directive = format!(
        "{},hyper=warn,reqwest=warn,rustls=warn",
        level_for_verbosity(verbosity)
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
