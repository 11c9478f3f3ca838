use recoil_shared::constants::{CLIENT_INPUT_DELAY, QUADTREE_MAX_ITEMS, SIMULATION_PERIOD_S};

/// Contains Config properties which will be used by the Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Seconds of wall-clock time per simulated frame
    pub simulation_period: f32,
    /// How many frames ahead of the current local frame input is stamped.
    /// Gives the input time to reach the server before it simulates that
    /// frame.
    pub input_delay: u32,
    /// How far the local frame may run past the last confirmed frame before
    /// prediction pauses
    pub max_prediction_frames: u32,
    /// Once this many confirmed frames pile up on top of the checkpoint
    /// without a divergence, the client rewinds anyway to move the
    /// checkpoint forward
    pub rebase_interval: u32,
    /// Leaf capacity of the spatial index
    pub quadtree_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            simulation_period: SIMULATION_PERIOD_S,
            input_delay: CLIENT_INPUT_DELAY,
            max_prediction_frames: 20,
            rebase_interval: 30,
            quadtree_capacity: QUADTREE_MAX_ITEMS,
        }
    }
}
