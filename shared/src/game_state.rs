use serde::{Deserialize, Serialize};

/// Session lifecycle as seen by either peer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Waiting for every seat to be taken
    #[default]
    Connecting,
    Running,
    /// The local player's tank was destroyed; the simulation keeps running
    YouDied,
    /// No enemy-team entity remains
    LevelComplete,
}
