//! Tracing initialisation for the binary and demos.
//!
//! - `LOG_LEVEL` sets the filter (e.g. "debug" or "warn,basel_drill=debug").
//! - `LOG_FORMAT` selects "pretty" (default) or "json".
//!
//! Logs go to stderr so they never interleave with view output on stdout.

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
