use crate::simulation::{FrameState, SimulationError};

/// Records where every entity starts the frame.
pub fn update(frame_state: &mut FrameState<'_>) -> Result<(), SimulationError> {
    let transforms = &mut frame_state.state_db.tables.transforms;

    for id in transforms.ids() {
        let moved = transforms
            .get(&id)
            .is_some_and(|transform| transform.previous_position != transform.position);
        if moved {
            transforms.update(&id, |transform| {
                transform.previous_position = transform.position;
            })?;
        }
    }

    Ok(())
}
