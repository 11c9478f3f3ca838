use thiserror::Error;

/// Errors that can occur while moving bytes over a connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The connection was closed by either side
    #[error("Connection is closed. No further messages can be sent or received")]
    Closed,

    /// The underlying channel failed
    #[error("Transport failure: {reason}")]
    Io {
        reason: String,
    },
}
