use std::default::Default;

use recoil_shared::constants::{QUADTREE_MAX_ITEMS, SIMULATION_PERIOD_S};

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Number of clients the session waits for before starting
    pub player_count: usize,
    /// Seconds of wall-clock time per simulated frame
    pub simulation_period: f32,
    /// Leaf capacity of the registry's spatial index
    pub quadtree_capacity: usize,
    /// Furthest a client's input may run ahead of the next simulated frame,
    /// in frames. Input beyond this is discarded and not relayed
    pub max_input_lead: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            simulation_period: SIMULATION_PERIOD_S,
            quadtree_capacity: QUADTREE_MAX_ITEMS,
            max_input_lead: 120,
        }
    }
}
