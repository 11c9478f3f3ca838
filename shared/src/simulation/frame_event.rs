use glam::Vec2;

use crate::{components::EntityType, EntityId};

/// Something noteworthy that happened during one frame, for renderers and
/// audio. Events are never fed back into the simulation.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    TankShoot {
        entity: EntityId,
        orientation: f32,
    },
    TankHit {
        entity: EntityId,
    },
    BulletHit {
        position: Vec2,
    },
    EntityDestroyed {
        entity: EntityId,
        entity_type: Option<EntityType>,
        position: Vec2,
    },
}
