//! Plain-data component values. Tables in the state registry own them; the
//! simulation systems are the only writers.

mod builder;
mod damage;
mod emitter;
mod hitbox;
mod markers;
mod transform;
mod weapon;

pub use builder::{Builder, BuilderMode, Inventory};
pub use damage::{DamageArea, Damageable, Damager, POINT_EXTENT};
pub use emitter::{Emitter, EmitterKind};
pub use hitbox::Hitbox;
pub use markers::{EntityType, Obscurable, Team};
pub use transform::Transform;
pub use weapon::{Bullet, Explosion, Shooter, Turret, WeaponType};
