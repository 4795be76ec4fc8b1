//! Tracing subscriber setup for the command-line binary.
//!
//! The library only emits events; installing a subscriber is left to the
//! application.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter directive for a `-v`/`-q` combination.
///
/// Quiet wins over verbose; each `-v` raises the level one step.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr subscriber. `RUST_LOG` takes precedence over the flags.
///
/// Calling this more than once keeps the first subscriber.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0, false), "warn");
        assert_eq!(default_directive(1, false), "info");
        assert_eq!(default_directive(2, false), "debug");
        assert_eq!(default_directive(7, false), "trace");
        assert_eq!(default_directive(3, true), "error");
    }
}
