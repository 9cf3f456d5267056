use thiserror::Error;

/// Failures the translation service can produce.
///
/// Both classes degrade the same way: the attempt is retired and the last
/// accepted result stays on screen. A stale response is not represented
/// here at all; discarding it is routine, not a failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    Parse(String),
}
