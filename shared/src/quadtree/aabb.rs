use glam::Vec2;

/// Axis-aligned bounding box. `min` is the north-west corner, `max` the
/// south-east corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb2 {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_extents(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self::new(Vec2::new(min_x, min_y), Vec2::new(max_x, max_y))
    }

    /// Box of the given size centered on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Inclusive on both edges.
    pub fn contains(&self, point: Vec2) -> bool {
        self.min.x <= point.x
            && point.x <= self.max.x
            && self.min.y <= point.y
            && point.y <= self.max.y
    }

    /// Inclusive on both edges.
    pub fn overlaps(&self, other: &Aabb2) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Containment with an inclusive minimum edge and an exclusive maximum
    /// edge, so a point on a shared edge belongs to exactly one of two
    /// adjacent boxes.
    pub fn min_bias_contains(&self, point: Vec2) -> bool {
        self.min.x <= point.x
            && point.x < self.max.x
            && self.min.y <= point.y
            && point.y < self.max.y
    }

    /// Overlap of two half-open boxes: touching edges do not overlap.
    pub fn min_bias_overlaps(&self, other: &Aabb2) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Splits the box at its center into NW, NE, SW and SE quadrants.
    pub fn quadrants(&self) -> [Aabb2; 4] {
        let mid = self.center();
        [
            Aabb2::from_extents(self.min.x, self.min.y, mid.x, mid.y),
            Aabb2::from_extents(mid.x, self.min.y, self.max.x, mid.y),
            Aabb2::from_extents(self.min.x, mid.y, mid.x, self.max.y),
            Aabb2::from_extents(mid.x, mid.y, self.max.x, self.max.y),
        ]
    }

    /// Whether splitting this box would produce quadrants strictly smaller
    /// than itself. Fails once floating point precision runs out.
    pub fn is_divisible(&self) -> bool {
        let mid = self.center();
        self.min.x < mid.x && mid.x < self.max.x && self.min.y < mid.y && mid.y < self.max.y
    }

    /// Clamps a point into the box (inclusive).
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}
