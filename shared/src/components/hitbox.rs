use glam::Vec2;

use crate::quadtree::Aabb2;

/// Rectangle relative to an entity's position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox {
    pub offset: Vec2,
    pub dimensions: Vec2,
}

impl Hitbox {
    pub fn new(offset: Vec2, dimensions: Vec2) -> Self {
        Self { offset, dimensions }
    }

    /// Hitbox of the given size centered on the entity's position.
    pub fn centered(dimensions: Vec2) -> Self {
        Self::new(dimensions * -0.5, dimensions)
    }

    pub fn aabb(&self, position: Vec2) -> Aabb2 {
        let min = position + self.offset;
        Aabb2::new(min, min + self.dimensions)
    }
}
