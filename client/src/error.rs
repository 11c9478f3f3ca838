use thiserror::Error;

use recoil_shared::{SimulationError, TransportError};

/// Errors that stop the client's update loop
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The simulation hit an invariant violation while predicting or
    /// replaying a frame
    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    /// The connection to the server failed or was closed by the server
    #[error("Connection to server lost: {0}")]
    Transport(#[from] TransportError),
}
