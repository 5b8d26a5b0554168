use anyhow::Result;
use std::io;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber: timestamped lines on stdout
///
/// `RUST_LOG` takes precedence over the default level.
pub fn init(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stdout)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn default_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}
