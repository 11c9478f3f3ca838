use thiserror::Error;

use recoil_shared::SimulationError;

/// Errors surfaced by the [`Server`](crate::Server)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    /// An authoritative frame failed. The session cannot continue
    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    /// A client tried to join a session that cannot take it
    #[error("Connection rejected: {reason}")]
    ConnectionRejected {
        reason: &'static str,
    },
}
