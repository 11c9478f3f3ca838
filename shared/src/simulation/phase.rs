/// Why a frame is being simulated. Systems behave identically in every
/// phase; the tag only feeds diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimulationPhase {
    /// Authoritative frame on the server
    ServerTick,
    /// First, speculative simulation of a frame on a client
    ClientPrediction,
    /// Speculative frame re-simulated after a rollback
    ClientReprediction,
    /// Frame re-simulated on a client with confirmed inputs
    ClientAuthoritative,
}

impl SimulationPhase {
    /// RGBA tint for debug overlays.
    pub fn debug_color(self) -> [f32; 4] {
        match self {
            SimulationPhase::ServerTick => [0.0, 0.0, 0.0, 0.0],
            SimulationPhase::ClientPrediction => [1.0, 0.0, 0.8, 1.0],
            SimulationPhase::ClientReprediction => [0.8, 0.8, 0.0, 1.0],
            SimulationPhase::ClientAuthoritative => [0.2, 1.0, 0.2, 1.0],
        }
    }
}
