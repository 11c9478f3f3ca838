use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Clockwise radians from north
    pub orientation: f32,
    /// Position at the start of the current frame, recorded before any
    /// system moves the entity
    pub previous_position: Vec2,
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            orientation: 0.0,
            previous_position: position,
        }
    }

    pub fn with_orientation(mut self, orientation: f32) -> Self {
        self.orientation = orientation;
        self
    }
}
