use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuilderMode {
    Harvest,
    BuildWall,
    BuildTurret,
}

/// A drone that travels from its host to `destination`, does its job there
/// and flies back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Builder {
    pub mode: BuilderMode,
    pub host: EntityId,
    pub destination: Vec2,
    pub returning: bool,
    /// Resources picked up on the outbound trip, credited on return
    pub carrying: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    pub wood: u32,
}
