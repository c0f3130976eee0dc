use thiserror::Error;

/// Failures a slot refresh can run into.
///
/// An error never mutates the time control: whatever options were on
/// display before the failed refresh stay on display.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Availability request failed: {0}")]
    Request(#[from] eyre::Report),

    #[error("Availability endpoint returned status {0}")]
    Endpoint(u16),

    #[error("Malformed availability response: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type SyncResult<T> = Result<T, SyncError>;
