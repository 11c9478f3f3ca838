use crate::{
    constants::{TANK_ROT_SPEED, TANK_SPEED},
    math::{radial_translate2, rotate_until},
    simulation::{FrameState, SimulationError},
};

/// Turns each steered tank toward its input direction and drives it along
/// that direction.
pub fn update(frame_state: &mut FrameState<'_>) -> Result<(), SimulationError> {
    let messages = frame_state.messages;
    let dt = frame_state.dt;
    let state_db = &mut *frame_state.state_db;

    for message in messages {
        let Some(direction) = message.player_input().and_then(|input| input.movement) else {
            continue;
        };
        // a dead player's inputs still arrive
        let Some(id) = state_db.get_player_id(message.player_number) else {
            continue;
        };

        let heading = direction.angle();
        state_db.tables.transforms.update(&id, |transform| {
            transform.orientation = rotate_until(transform.orientation, heading, TANK_ROT_SPEED * dt);
            transform.position = radial_translate2(transform.position, heading, TANK_SPEED * dt);
        })?;
    }

    Ok(())
}
