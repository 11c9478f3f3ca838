use crate::simulation::{FrameState, SimulationError};

/// An obscurable entity is hidden while it overlaps any obscuring one.
pub fn update(frame_state: &mut FrameState<'_>) -> Result<(), SimulationError> {
    let state_db = &mut *frame_state.state_db;

    for id in state_db.tables.obscurables.ids() {
        let bounds = state_db
            .entity_bounds(&id)
            .ok_or(SimulationError::MissingComponent {
                table: state_db.tables.transforms.name(),
                entity: id,
            })?;

        let hidden = state_db
            .query_by_world_pos(&bounds)
            .into_iter()
            .filter(|other| *other != id && state_db.tables.obscurings.has(other))
            .any(|other| {
                state_db
                    .entity_bounds(&other)
                    .is_some_and(|other_bounds| other_bounds.overlaps(&bounds))
            });

        let obscurable = state_db.tables.obscurables.require(&id)?;
        if obscurable.hidden != hidden {
            state_db
                .tables
                .obscurables
                .update(&id, |obscurable| obscurable.hidden = hidden)?;
        }
    }

    Ok(())
}
