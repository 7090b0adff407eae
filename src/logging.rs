use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::error::Error;

/// Install the log subscriber.  The filter comes from `RUST_LOG` and
/// defaults to `info`; output goes to stderr so that stdout carries only
/// the answers.
pub fn init() -> Result<(), Error> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| Error::LogFilter(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    Ok(())
}
