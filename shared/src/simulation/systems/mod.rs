pub mod builder;
pub mod bullet;
pub mod damageable;
pub mod damager;
pub mod emitter;
pub mod explosion;
pub mod hiding;
pub mod playfield_clamping;
pub mod shooter;
pub mod tank_mover;
pub mod transform_init;
pub mod turret;
pub mod wall_collider;
