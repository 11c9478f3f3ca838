use crate::{
    components::WeaponType,
    constants::{BULLET_SPAWN_OFFSET, MORTAR_RANGE, SHOOTER_COOLDOWN_FRAMES},
    entities::make_bullet,
    math::{get_angle, radial_translate2},
    simulation::{FrameEvent, FrameState, SimulationError},
};

/// Applies each player's weapon input: weapon cycling, aiming and firing.
pub fn update(frame_state: &mut FrameState<'_>) -> Result<(), SimulationError> {
    let messages = frame_state.messages;
    let frame = frame_state.frame;
    let state_db = &mut *frame_state.state_db;

    for message in messages {
        let Some(input) = message.player_input() else {
            continue;
        };
        let Some(id) = state_db.get_player_id(message.player_number) else {
            continue;
        };

        if input.change_weapon {
            state_db
                .tables
                .shooters
                .update(&id, |shooter| shooter.weapon = shooter.weapon.next())?;
        }

        let Some(attack) = input.attack else {
            continue;
        };

        let shooter = *state_db.tables.shooters.require(&id)?;
        let position = state_db.tables.transforms.require(&id)?.position;
        let angle = get_angle(position, attack.target);

        if !attack.firing || shooter.is_cooling_down(frame, SHOOTER_COOLDOWN_FRAMES) {
            if shooter.orientation != angle {
                state_db
                    .tables
                    .shooters
                    .update(&id, |shooter| shooter.orientation = angle)?;
            }
            continue;
        }

        state_db.tables.shooters.update(&id, |shooter| {
            shooter.last_fired_frame = Some(frame);
            shooter.orientation = angle;
        })?;

        frame_state.frame_events.push(FrameEvent::TankShoot {
            entity: id,
            orientation: angle,
        });

        let target = match shooter.weapon {
            WeaponType::Mortar => {
                let offset = attack.target - position;
                Some(position + offset.clamp_length_max(MORTAR_RANGE))
            }
            _ => None,
        };
        state_db.register(make_bullet(
            radial_translate2(position, angle, BULLET_SPAWN_OFFSET),
            angle,
            shooter.weapon,
            id,
            target,
        ))?;
    }

    Ok(())
}
