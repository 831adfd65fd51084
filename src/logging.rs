use tracing_subscriber::EnvFilter;

use crate::error::{AttendanceError, Result};

/// Default filter when neither `RUST_LOG` nor an explicit level is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Installs the global stderr subscriber.
///
/// An explicit `level` wins over `RUST_LOG`; otherwise `RUST_LOG` is used and
/// [`DEFAULT_LOG_LEVEL`] is the fallback.
pub fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|err| AttendanceError::Logging(err.to_string()))?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| AttendanceError::Logging(err.to_string()))
}
