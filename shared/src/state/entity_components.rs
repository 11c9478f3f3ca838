use crate::{
    components::{
        Builder, Bullet, Damageable, Damager, Emitter, EntityType, Explosion, Hitbox, Inventory,
        Obscurable, Shooter, Team, Transform, Turret,
    },
    types::PlayerNumber,
};

/// Initial components of an entity that has not been registered yet. Entity
/// factories build these; [`StateDb::register`](super::StateDb::register)
/// files each present component into its table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityComponents {
    pub entity_type: Option<EntityType>,
    pub transform: Option<Transform>,
    pub hitbox: Option<Hitbox>,
    pub damageable: Option<Damageable>,
    pub damager: Option<Damager>,
    pub shooter: Option<Shooter>,
    pub bullet: Option<Bullet>,
    pub turret: Option<Turret>,
    pub explosion: Option<Explosion>,
    pub emitter: Option<Emitter>,
    pub builder: Option<Builder>,
    pub inventory: Option<Inventory>,
    pub player_number: Option<PlayerNumber>,
    pub team: Option<Team>,
    pub obscurable: Option<Obscurable>,
    pub wall: bool,
    pub moveable: bool,
    pub playfield_clamped: bool,
    pub obscuring: bool,
    pub targetable: bool,
    pub harvestable: bool,
}
