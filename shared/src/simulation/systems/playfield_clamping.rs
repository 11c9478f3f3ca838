use glam::Vec2;

use crate::simulation::{FrameState, SimulationError};

/// Keeps clamped entities, hitbox included, inside the playfield.
pub fn update(frame_state: &mut FrameState<'_>) -> Result<(), SimulationError> {
    let state_db = &mut *frame_state.state_db;
    let world = state_db.world_bounds();

    for id in state_db.tables.playfield_clamped.ids() {
        let bounds = state_db
            .entity_bounds(&id)
            .ok_or(SimulationError::MissingComponent {
                table: state_db.tables.transforms.name(),
                entity: id,
            })?;

        let mut shift = Vec2::ZERO;
        if bounds.min.x < world.min.x {
            shift.x = world.min.x - bounds.min.x;
        } else if bounds.max.x > world.max.x {
            shift.x = world.max.x - bounds.max.x;
        }
        if bounds.min.y < world.min.y {
            shift.y = world.min.y - bounds.min.y;
        } else if bounds.max.y > world.max.y {
            shift.y = world.max.y - bounds.max.y;
        }

        if shift != Vec2::ZERO {
            state_db
                .tables
                .transforms
                .update(&id, |transform| transform.position += shift)?;
        }
    }

    Ok(())
}
