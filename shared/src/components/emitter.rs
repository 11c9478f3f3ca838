use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmitterKind {
    RocketExhaust,
    Explosion,
}

/// Marks an entity as a particle source for renderers. The simulation only
/// ages it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emitter {
    pub kind: EmitterKind,
    pub offset: Vec2,
    pub orientation: f32,
    /// Seconds left; the component is removed when this runs out
    pub ttl: f32,
}

impl Emitter {
    pub fn new(kind: EmitterKind, offset: Vec2, orientation: f32, ttl: f32) -> Self {
        Self {
            kind,
            offset,
            orientation,
            ttl,
        }
    }
}
