use glam::Vec2;

use crate::{
    components::{Builder, BuilderMode},
    constants::{
        BUILDER_ARRIVAL_RADIUS, BUILDER_SPEED, HARVEST_DAMAGE, TILE_SIZE, TURRET_COST, WALL_COST,
    },
    entities::{make_builder, make_turret, make_wall},
    math::get_angle,
    quadtree::Aabb2,
    simulation::{FrameState, SimulationError},
    state::StateDb,
    EntityId,
};

/// Launches builder drones on request and flies them through their
/// outbound and return trips.
pub fn update(frame_state: &mut FrameState<'_>) -> Result<(), SimulationError> {
    let messages = frame_state.messages;
    let dt = frame_state.dt;
    let state_db = &mut *frame_state.state_db;

    for message in messages {
        let Some(command) = message.player_input().and_then(|input| input.build) else {
            continue;
        };
        let Some(host) = state_db.get_player_id(message.player_number) else {
            continue;
        };
        // one drone per host at a time
        if state_db.tables.builders.iter().any(|(_, builder)| builder.host == host) {
            continue;
        }

        let host_position = state_db.tables.transforms.require(&host)?.position;
        let team = state_db.tables.teams.get(&host).copied().unwrap_or_default();
        let world = state_db.world_bounds();
        let half_tile = Vec2::splat(TILE_SIZE * 0.5);
        let destination =
            tile_center(command.destination).clamp(world.min + half_tile, world.max - half_tile);
        state_db.register(make_builder(host, host_position, team, command.mode, destination))?;
    }

    for id in state_db.tables.builders.ids() {
        let builder = *state_db.tables.builders.require(&id)?;
        let position = state_db.tables.transforms.require(&id)?.position;

        let target = if builder.returning {
            match state_db.tables.transforms.get(&builder.host) {
                Some(host) => host.position,
                None => {
                    // nowhere to return to
                    state_db.mark_for_deletion(id);
                    continue;
                }
            }
        } else {
            builder.destination
        };

        let step = BUILDER_SPEED * dt;
        let offset = target - position;
        if offset.length() > step.max(BUILDER_ARRIVAL_RADIUS) {
            let next = position + offset.normalize() * step;
            state_db.tables.transforms.update(&id, |transform| {
                transform.position = next;
                transform.orientation = get_angle(position, target);
            })?;
            continue;
        }

        if builder.returning {
            if state_db.tables.inventories.has(&builder.host) {
                state_db
                    .tables
                    .inventories
                    .update(&builder.host, |inventory| inventory.wood += builder.carrying)?;
            }
            state_db.mark_for_deletion(id);
            continue;
        }

        let carrying = builder.carrying + arrive(state_db, id, &builder)?;
        state_db.tables.transforms.update(&id, |transform| {
            transform.position = target;
        })?;
        state_db.tables.builders.update(&id, |builder| {
            builder.returning = true;
            builder.carrying = carrying;
        })?;
    }

    Ok(())
}

// Does the job at the destination. Returns the wood picked up.
fn arrive(state_db: &mut StateDb, id: EntityId, builder: &Builder) -> Result<u32, SimulationError> {
    let site = Aabb2::from_center(builder.destination, Vec2::splat(TILE_SIZE * 0.5));
    let occupants = state_db.query_by_world_pos(&site);

    match builder.mode {
        BuilderMode::Harvest => {
            let tree = occupants.into_iter().find(|occupant| {
                state_db.tables.harvestables.has(occupant)
                    && state_db.tables.damageables.has(occupant)
            });
            match tree {
                Some(tree) => {
                    state_db
                        .tables
                        .damageables
                        .update(&tree, |damageable| damageable.health -= HARVEST_DAMAGE)?;
                    Ok(1)
                }
                None => Ok(0),
            }
        }
        BuilderMode::BuildWall | BuilderMode::BuildTurret => {
            let blocked = occupants.into_iter().any(|occupant| {
                occupant != id
                    && (state_db.tables.hitboxes.has(&occupant)
                        || state_db.tables.walls.has(&occupant))
            });
            let cost = match builder.mode {
                BuilderMode::BuildTurret => TURRET_COST,
                _ => WALL_COST,
            };
            let affordable = state_db
                .tables
                .inventories
                .get(&builder.host)
                .is_some_and(|inventory| inventory.wood >= cost);
            if blocked || !affordable {
                return Ok(0);
            }

            state_db
                .tables
                .inventories
                .update(&builder.host, |inventory| inventory.wood -= cost)?;
            let team = state_db.tables.teams.get(&id).copied().unwrap_or_default();
            let structure = match builder.mode {
                BuilderMode::BuildTurret => make_turret(builder.destination, team),
                _ => make_wall(builder.destination),
            };
            state_db.register(structure)?;
            Ok(0)
        }
    }
}

fn tile_center(position: Vec2) -> Vec2 {
    ((position / TILE_SIZE).floor() + Vec2::splat(0.5)) * TILE_SIZE
}
