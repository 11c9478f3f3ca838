use glam::Vec2;

use crate::{
    components::{Emitter, EmitterKind, WeaponType},
    constants::{
        ROCKET_BOOST_ACCELERATION, ROCKET_BOOST_TIME, ROCKET_EXHAUST_TTL,
        ROCKET_LAUNCH_ACCELERATION, ROCKET_RANGE, STANDARD_BULLET_RANGE,
    },
    entities::make_explosion,
    math::radial_translate2,
    simulation::{FrameState, SimulationError},
};

/// Moves projectiles and retires them at the end of their range. Mortar
/// shells fly straight to their target and explode there.
pub fn update(frame_state: &mut FrameState<'_>) -> Result<(), SimulationError> {
    let dt = frame_state.dt;
    let state_db = &mut *frame_state.state_db;

    for id in state_db.tables.bullets.ids() {
        let bullet = *state_db.tables.bullets.require(&id)?;
        let transform = *state_db.tables.transforms.require(&id)?;
        let lifetime = bullet.lifetime + dt;
        let mut speed = bullet.current_speed;

        let position = match bullet.weapon {
            WeaponType::Standard => {
                radial_translate2(transform.position, transform.orientation, speed * dt)
            }
            WeaponType::Rocket => {
                if bullet.lifetime < ROCKET_BOOST_TIME && ROCKET_BOOST_TIME <= lifetime {
                    state_db.tables.emitters.upsert(
                        id,
                        Emitter::new(
                            EmitterKind::RocketExhaust,
                            Vec2::new(0.0, -0.25),
                            std::f32::consts::PI,
                            ROCKET_EXHAUST_TTL,
                        ),
                    )?;
                }

                let acceleration = if bullet.lifetime > ROCKET_BOOST_TIME {
                    ROCKET_BOOST_ACCELERATION
                } else {
                    ROCKET_LAUNCH_ACCELERATION
                };
                let distance = speed * dt + 0.5 * acceleration * dt * dt;
                speed += acceleration * dt;
                radial_translate2(transform.position, transform.orientation, distance)
            }
            WeaponType::Mortar => {
                let target = bullet.target.unwrap_or(bullet.origin);
                let offset = target - transform.position;
                if offset.length() <= speed * dt {
                    state_db.mark_for_deletion(id);
                    state_db.register(make_explosion(target))?;
                    continue;
                }
                transform.position + offset.normalize() * speed * dt
            }
        };

        state_db
            .tables
            .transforms
            .update(&id, |transform| transform.position = position)?;
        state_db.tables.bullets.update(&id, |bullet| {
            bullet.lifetime = lifetime;
            bullet.current_speed = speed;
        })?;

        let range = match bullet.weapon {
            WeaponType::Standard => STANDARD_BULLET_RANGE,
            WeaponType::Rocket => ROCKET_RANGE,
            WeaponType::Mortar => continue,
        };
        if position.distance(bullet.origin) >= range {
            state_db.mark_for_deletion(id);
        }
    }

    Ok(())
}
