use crate::simulation::{FrameEvent, FrameState, SimulationError};

/// Applies damage wherever a damager's area touches a damageable.
///
/// A plain damager hits the first damageable it touches (lowest id) and is
/// removed with its entity. A splash damager hits everything it touches once,
/// then loses its damager component while the entity lives on.
pub fn update(frame_state: &mut FrameState<'_>) -> Result<(), SimulationError> {
    let state_db = &mut *frame_state.state_db;

    for id in state_db.tables.damagers.ids() {
        if state_db.is_marked_for_deletion(&id) {
            continue;
        }

        let damager = state_db.tables.damagers.require(&id)?.clone();
        let position = state_db.tables.transforms.require(&id)?.position;

        let mut hits = Vec::new();
        for target in state_db.query_by_world_pos(&damager.area.aabb(position)) {
            if target == id || damager.immune_list.contains(&target) {
                continue;
            }
            let (Some(damageable), Some(transform)) = (
                state_db.tables.damageables.get(&target),
                state_db.tables.transforms.get(&target),
            ) else {
                continue;
            };
            if damager.area.overlaps(position, &damageable.aabb(transform.position)) {
                hits.push(target);
                if !damager.splash {
                    break;
                }
            }
        }

        if hits.is_empty() {
            continue;
        }

        for target in hits {
            state_db
                .tables
                .damageables
                .update(&target, |damageable| damageable.health -= damager.damage_value)?;
            if state_db.tables.player_numbers.has(&target) {
                frame_state
                    .frame_events
                    .push(FrameEvent::TankHit { entity: target });
            }
        }
        frame_state
            .frame_events
            .push(FrameEvent::BulletHit { position });

        if damager.splash {
            state_db.tables.damagers.delete(&id);
        } else {
            state_db.mark_for_deletion(id);
        }
    }

    Ok(())
}
