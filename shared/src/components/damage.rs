use glam::Vec2;

use crate::{components::hitbox::Hitbox, quadtree::Aabb2, EntityId};

/// Half-extent of the box used to index and query point-sized things
pub const POINT_EXTENT: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Damageable {
    pub health: f32,
    pub hitbox: Hitbox,
}

impl Damageable {
    pub fn new(health: f32, hitbox: Hitbox) -> Self {
        Self { health, hitbox }
    }

    pub fn aabb(&self, position: Vec2) -> Aabb2 {
        self.hitbox.aabb(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DamageArea {
    Circle { radius: f32 },
    Hitbox(Hitbox),
    Point,
}

impl DamageArea {
    /// Box guaranteed to contain the area, used for spatial queries.
    pub fn aabb(&self, position: Vec2) -> Aabb2 {
        match self {
            DamageArea::Circle { radius } => Aabb2::new(
                position - Vec2::splat(*radius),
                position + Vec2::splat(*radius),
            ),
            DamageArea::Hitbox(hitbox) => hitbox.aabb(position),
            DamageArea::Point => Aabb2::new(
                position - Vec2::splat(POINT_EXTENT),
                position + Vec2::splat(POINT_EXTENT),
            ),
        }
    }

    /// Whether the area, centered at `position`, touches `target`.
    pub fn overlaps(&self, position: Vec2, target: &Aabb2) -> bool {
        match self {
            DamageArea::Circle { radius } => {
                let nearest = target.clamp(position);
                position.distance_squared(nearest) <= radius * radius
            }
            DamageArea::Hitbox(hitbox) => hitbox.aabb(position).overlaps(target),
            DamageArea::Point => target.contains(position),
        }
    }
}

/// Deals damage to the first (or, with `splash`, every) damageable its area
/// touches, then removes its own entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Damager {
    pub damage_value: f32,
    pub area: DamageArea,
    pub splash: bool,
    pub immune_list: Vec<EntityId>,
}
