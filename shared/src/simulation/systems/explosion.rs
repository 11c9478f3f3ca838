use crate::simulation::{FrameState, SimulationError};

/// Counts down explosions and removes the ones that burned out.
pub fn update(frame_state: &mut FrameState<'_>) -> Result<(), SimulationError> {
    let state_db = &mut *frame_state.state_db;

    for id in state_db.tables.explosions.ids() {
        let frames_left = state_db.tables.explosions.require(&id)?.frames_left;
        if frames_left <= 1 {
            state_db.mark_for_deletion(id);
        } else {
            state_db
                .tables
                .explosions
                .update(&id, |explosion| explosion.frames_left = frames_left - 1)?;
        }
    }

    Ok(())
}
