//! Tracing setup for the command-line binary

use std::sync::Once;

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Level for this crate's own events, from the number of `-v` flags
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global tracing subscriber
///
/// `RUST_LOG` is honoured; verbosity only raises the `spendscope` target.
/// Output goes to stderr so it never mixes with report output. Calling this
/// more than once is harmless.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let directive = format!("spendscope={}", level_for_verbosity(verbosity))
            .parse::<Directive>()
            .unwrap_or_else(|_| LevelFilter::WARN.into());

        let filter = EnvFilter::from_default_env().add_directive(directive);

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
