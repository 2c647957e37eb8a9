//! Log output for the stdio process.
//!
//! Stdout carries the JSON-lines protocol, so every log line goes to stderr.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "hovercraft_search=info";

static INIT: Once = Once::new();

/// The `RUST_LOG` filter, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global stderr subscriber. Later calls do nothing.
pub fn init() {
    INIT.call_once(|| {
        let result = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init();

        if let Err(e) = result {
            eprintln!("Failed to initialize logging: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_init_is_repeatable() {
        init();
        init();
        check!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn test_default_filter_parses() {
        check!(DEFAULT_FILTER.parse::<EnvFilter>().is_ok());
    }
}
