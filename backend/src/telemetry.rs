//! Tracing bootstrap for binaries and test harnesses.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the JSON tracing subscriber filtered by `RUST_LOG`.
///
/// Initialisation is best-effort: a second call (common under test runners)
/// leaves the existing subscriber in place and logs a warning.
pub fn init() {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }
}
