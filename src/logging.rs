//! Logging setup for the geotag binary.
//!
//! Logs go to stderr so stdout stays clean JSON. Verbosity comes from
//! `RUST_LOG` (default `info`); `--verbose` raises the crate to `debug`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "geotag=debug,info" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed (e.g. by an embedding host).
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}
