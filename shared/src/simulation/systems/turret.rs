use glam::Vec2;

use crate::{
    components::{Team, WeaponType},
    constants::{
        BULLET_SPAWN_OFFSET, TURRET_COOLDOWN_S, TURRET_FIRING_ARC, TURRET_RANGE, TURRET_ROT_SPEED,
    },
    entities::make_bullet,
    math::{get_angle, normalize_angle, radial_translate2, rotate_until},
    quadtree::Aabb2,
    simulation::{FrameState, SimulationError},
    state::StateDb,
    EntityId,
};

/// Turret AI: track the nearest hostile target in range and fire at it
/// whenever the gun is aimed and loaded.
pub fn update(frame_state: &mut FrameState<'_>) -> Result<(), SimulationError> {
    let dt = frame_state.dt;
    let state_db = &mut *frame_state.state_db;

    for id in state_db.tables.turrets.ids() {
        let mut turret = *state_db.tables.turrets.require(&id)?;
        let position = state_db.tables.transforms.require(&id)?.position;
        let team = state_db.tables.teams.get(&id).copied().unwrap_or_default();

        turret.cooldown = (turret.cooldown - dt).max(0.0);

        if let Some(target) = nearest_target(state_db, id, position, team) {
            let angle = get_angle(position, target);
            turret.orientation = rotate_until(turret.orientation, angle, TURRET_ROT_SPEED * dt);

            let aim_error = normalize_angle(normalize_angle(angle) - normalize_angle(turret.orientation));
            if aim_error.abs() <= TURRET_FIRING_ARC && turret.cooldown <= 0.0 {
                turret.cooldown = TURRET_COOLDOWN_S;
                state_db.register(make_bullet(
                    radial_translate2(position, turret.orientation, BULLET_SPAWN_OFFSET),
                    turret.orientation,
                    WeaponType::Standard,
                    id,
                    None,
                ))?;
            }
        }

        state_db.tables.turrets.update(&id, |current| *current = turret)?;
    }

    Ok(())
}

fn nearest_target(state_db: &StateDb, turret: EntityId, position: Vec2, team: Team) -> Option<Vec2> {
    let region = Aabb2::new(
        position - Vec2::splat(TURRET_RANGE),
        position + Vec2::splat(TURRET_RANGE),
    );

    let mut nearest: Option<(f32, Vec2)> = None;
    for candidate in state_db.query_by_world_pos(&region) {
        if candidate == turret || !state_db.tables.targetables.has(&candidate) {
            continue;
        }
        let candidate_team = state_db.tables.teams.get(&candidate).copied().unwrap_or_default();
        if !team.is_hostile_to(candidate_team) {
            continue;
        }
        let Some(transform) = state_db.tables.transforms.get(&candidate) else {
            continue;
        };

        let distance = position.distance(transform.position);
        if distance > TURRET_RANGE {
            continue;
        }
        // ids arrive in ascending order, so ties go to the oldest entity
        if nearest.map_or(true, |(best, _)| distance < best) {
            nearest = Some((distance, transform.position));
        }
    }

    nearest.map(|(_, target)| target)
}
