//! Process-wide tracing setup.
//!
//! The core never installs a subscriber on its own; the embedding shell
//! decides when. Call [`init`] once at startup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Failure to install the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("a global tracing subscriber is already installed")]
    SubscriberAlreadySet,
}

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set and defaults to `info`.
/// Output goes to stderr so shells owning stdout stay clean.
pub fn init() -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_existing_subscriber() {
        let _ = init();
        assert!(matches!(init(), Err(LoggingError::SubscriberAlreadySet)));
    }
}
