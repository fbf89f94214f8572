//! Diagnostic logging
//!
//! Events go to stderr so that command output on stdout stays parseable.
//! The filter is read from `KPKG_LOG` using the usual `tracing` directive
//! syntax, e.g. `KPKG_LOG=kpkg::store=debug`.

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the log filter
pub const ENV_LOG: &str = "KPKG_LOG";

/// Install the global subscriber
///
/// Without `KPKG_LOG`, only warnings are shown, or everything down to
/// `debug` when `verbose` is set. Calling this twice is harmless.
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_env(ENV_LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(verbose)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "debug");
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
    }
}
