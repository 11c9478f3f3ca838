use crate::simulation::{FrameState, SimulationError};

/// Ages emitters and detaches the ones that ran out.
pub fn update(frame_state: &mut FrameState<'_>) -> Result<(), SimulationError> {
    let dt = frame_state.dt;
    let emitters = &mut frame_state.state_db.tables.emitters;

    for id in emitters.ids() {
        let ttl = emitters.require(&id)?.ttl - dt;
        if ttl <= 0.0 {
            emitters.delete(&id);
        } else {
            emitters.update(&id, |emitter| emitter.ttl = ttl)?;
        }
    }

    Ok(())
}
