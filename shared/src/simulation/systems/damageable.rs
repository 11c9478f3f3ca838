use crate::simulation::{FrameEvent, FrameState, SimulationError};

/// Removes every entity whose health ran out.
pub fn update(frame_state: &mut FrameState<'_>) -> Result<(), SimulationError> {
    let state_db = &mut *frame_state.state_db;
    let mut destroyed = Vec::new();

    for (id, damageable) in state_db.tables.damageables.iter() {
        if damageable.health > 0.0 || state_db.is_marked_for_deletion(&id) {
            continue;
        }

        let position = state_db.tables.transforms.require(&id)?.position;
        frame_state.frame_events.push(FrameEvent::EntityDestroyed {
            entity: id,
            entity_type: state_db.tables.entity_types.get(&id).copied(),
            position,
        });
        destroyed.push(id);
    }

    for id in destroyed {
        state_db.mark_for_deletion(id);
    }

    Ok(())
}
