//! Subscriber setup for bridge diagnostics
//!
//! The bridge crates only emit `tracing` events. Applications that want to
//! see them call [`init`] once at startup, or install their own subscriber.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "fmbridge=debug,info"
    } else {
        "fmbridge=info,warn"
    }
}

/// Install a compact fmt subscriber filtered by `RUST_LOG` or the defaults.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(verbose: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init()
        .is_ok()
}
