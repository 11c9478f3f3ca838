//! Component bundles for every kind of entity the game spawns.

use glam::Vec2;

use crate::{
    components::{
        Builder, BuilderMode, Bullet, DamageArea, Damageable, Damager, Emitter, EmitterKind,
        EntityType, Explosion, Hitbox, Inventory, Obscurable, Shooter, Team, Transform, Turret,
        WeaponType,
    },
    constants::{
        BULLET_DAMAGE, EXPLOSION_DAMAGE, EXPLOSION_EMITTER_TTL, EXPLOSION_FRAMES,
        EXPLOSION_RADIUS, MORTAR_SPEED, PLAYER_HEALTH, ROCKET_INITIAL_SPEED,
        STANDARD_BULLET_SPEED, TILE_SIZE, TREE_HEALTH, TURRET_HEALTH, WALL_HEALTH,
    },
    math::get_angle,
    state::EntityComponents,
    types::PlayerNumber,
    EntityId,
};

fn tile_hitbox() -> Hitbox {
    Hitbox::centered(Vec2::splat(TILE_SIZE))
}

pub fn make_player(position: Vec2, player_number: PlayerNumber) -> EntityComponents {
    let hitbox = Hitbox::new(
        Vec2::new(-0.3, -0.5) * TILE_SIZE,
        Vec2::new(0.6, 1.0) * TILE_SIZE,
    );

    EntityComponents {
        entity_type: Some(EntityType::Player),
        transform: Some(Transform::at(position)),
        hitbox: Some(hitbox),
        damageable: Some(Damageable::new(PLAYER_HEALTH, hitbox)),
        shooter: Some(Shooter::default()),
        inventory: Some(Inventory::default()),
        player_number: Some(player_number),
        team: Some(Team::Friendly),
        obscurable: Some(Obscurable::default()),
        moveable: true,
        playfield_clamped: true,
        targetable: true,
        ..Default::default()
    }
}

pub fn make_tree(position: Vec2) -> EntityComponents {
    EntityComponents {
        entity_type: Some(EntityType::Tree),
        transform: Some(Transform::at(position)),
        hitbox: Some(tile_hitbox()),
        damageable: Some(Damageable::new(TREE_HEALTH, tile_hitbox())),
        team: Some(Team::Neutral),
        obscuring: true,
        harvestable: true,
        ..Default::default()
    }
}

pub fn make_wall(position: Vec2) -> EntityComponents {
    EntityComponents {
        entity_type: Some(EntityType::Wall),
        transform: Some(Transform::at(position)),
        hitbox: Some(tile_hitbox()),
        damageable: Some(Damageable::new(WALL_HEALTH, tile_hitbox())),
        team: Some(Team::Neutral),
        wall: true,
        ..Default::default()
    }
}

pub fn make_turret(position: Vec2, team: Team) -> EntityComponents {
    EntityComponents {
        entity_type: Some(EntityType::Turret),
        transform: Some(Transform::at(position)),
        hitbox: Some(tile_hitbox()),
        damageable: Some(Damageable::new(TURRET_HEALTH, tile_hitbox())),
        turret: Some(Turret::default()),
        team: Some(team),
        wall: true,
        targetable: true,
        ..Default::default()
    }
}

/// A projectile fired by `owner`. Mortar shells carry no damager of their
/// own; they explode on landing at `target`.
pub fn make_bullet(
    position: Vec2,
    orientation: f32,
    weapon: WeaponType,
    owner: EntityId,
    target: Option<Vec2>,
) -> EntityComponents {
    let (current_speed, damager) = match weapon {
        WeaponType::Standard => (STANDARD_BULLET_SPEED, Some(bullet_damager(owner))),
        WeaponType::Rocket => (ROCKET_INITIAL_SPEED, Some(bullet_damager(owner))),
        WeaponType::Mortar => (MORTAR_SPEED, None),
    };

    EntityComponents {
        entity_type: Some(EntityType::Bullet),
        transform: Some(Transform::at(position).with_orientation(orientation)),
        bullet: Some(Bullet {
            weapon,
            origin: position,
            lifetime: 0.0,
            current_speed,
            target: match weapon {
                WeaponType::Mortar => target,
                _ => None,
            },
        }),
        damager,
        ..Default::default()
    }
}

fn bullet_damager(owner: EntityId) -> Damager {
    Damager {
        damage_value: BULLET_DAMAGE,
        area: DamageArea::Point,
        splash: false,
        immune_list: vec![owner],
    }
}

pub fn make_explosion(position: Vec2) -> EntityComponents {
    EntityComponents {
        entity_type: Some(EntityType::Explosion),
        transform: Some(Transform::at(position)),
        explosion: Some(Explosion {
            frames_left: EXPLOSION_FRAMES,
        }),
        damager: Some(Damager {
            damage_value: EXPLOSION_DAMAGE,
            area: DamageArea::Circle {
                radius: EXPLOSION_RADIUS,
            },
            splash: true,
            immune_list: Vec::new(),
        }),
        emitter: Some(Emitter::new(
            EmitterKind::Explosion,
            Vec2::ZERO,
            0.0,
            EXPLOSION_EMITTER_TTL,
        )),
        ..Default::default()
    }
}

/// A builder drone leaving `host`, which sits at `host_position`.
pub fn make_builder(
    host: EntityId,
    host_position: Vec2,
    team: Team,
    mode: BuilderMode,
    destination: Vec2,
) -> EntityComponents {
    EntityComponents {
        entity_type: Some(EntityType::Builder),
        transform: Some(
            Transform::at(host_position).with_orientation(get_angle(host_position, destination)),
        ),
        builder: Some(Builder {
            mode,
            host,
            destination,
            returning: false,
            carrying: 0,
        }),
        team: Some(team),
        ..Default::default()
    }
}
