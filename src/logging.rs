use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr subscriber for the binary.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at `info`, or `warn`
/// when `quiet` is requested. Stdout stays reserved for data and summaries.
pub fn init_logging(quiet: bool) {
    let default_directive = if quiet { "reelprep=warn" } else { "reelprep=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
