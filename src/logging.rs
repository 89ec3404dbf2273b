//! Logging setup

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `debug` selects between the
/// `debug` and `info` levels for this crate. Calling it twice is harmless.
pub fn init(debug: bool) -> bool {
    let default = if debug {
        "search_adapters=debug"
    } else {
        "search_adapters=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
