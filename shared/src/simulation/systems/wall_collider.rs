use glam::Vec2;

use crate::{
    quadtree::Aabb2,
    simulation::{FrameState, SimulationError},
};

/// Pushes moveable entities out of walls along the axis of least
/// penetration.
pub fn update(frame_state: &mut FrameState<'_>) -> Result<(), SimulationError> {
    let state_db = &mut *frame_state.state_db;

    for id in state_db.tables.moveables.ids() {
        let mut bounds = state_db
            .entity_bounds(&id)
            .ok_or(SimulationError::MissingComponent {
                table: state_db.tables.transforms.name(),
                entity: id,
            })?;
        let mut total = Vec2::ZERO;

        for wall in state_db.query_by_world_pos(&bounds) {
            if wall == id || !state_db.tables.walls.has(&wall) {
                continue;
            }
            let Some(wall_bounds) = state_db.entity_bounds(&wall) else {
                continue;
            };
            // touching edges is fine, only strict overlap is a collision
            if !bounds.min_bias_overlaps(&wall_bounds) {
                continue;
            }

            let push = separation(&bounds, &wall_bounds);
            bounds = Aabb2::new(bounds.min + push, bounds.max + push);
            total += push;
        }

        if total != Vec2::ZERO {
            state_db
                .tables
                .transforms
                .update(&id, |transform| transform.position += total)?;
        }
    }

    Ok(())
}

// Smallest translation of `mover` that ends its overlap with `wall`.
fn separation(mover: &Aabb2, wall: &Aabb2) -> Vec2 {
    let candidates = [
        Vec2::new(wall.min.x - mover.max.x, 0.0),
        Vec2::new(wall.max.x - mover.min.x, 0.0),
        Vec2::new(0.0, wall.min.y - mover.max.y),
        Vec2::new(0.0, wall.max.y - mover.min.y),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.length_squared() < best.length_squared() {
            best = *candidate;
        }
    }
    best
}
