use std::f32::consts::PI;

use glam::Vec2;

/// Unit vector pointing north. North is negative Y.
pub const NORTH: Vec2 = Vec2::new(0.0, -1.0);

/// Translates `start` by `amount` in the direction indicated by
/// `orientation`, which is measured in clockwise radians from north.
pub fn radial_translate2(start: Vec2, orientation: f32, amount: f32) -> Vec2 {
    Vec2::new(
        start.x + amount * orientation.sin(),
        start.y - amount * orientation.cos(),
    )
}

/// Returns the orientation (clockwise radians from north) of the vector from
/// `from` to `to`.
pub fn get_angle(from: Vec2, to: Vec2) -> f32 {
    let offset = to - from;
    NORTH.perp_dot(offset).atan2(NORTH.dot(offset))
}

/// Wraps an angle that is at most one turn out of range back into
/// `[-PI, PI]`.
pub fn normalize_angle(theta: f32) -> f32 {
    if theta > PI {
        theta - 2.0 * PI
    } else if theta < -PI {
        theta + 2.0 * PI
    } else {
        theta
    }
}

/// Rotates `from` toward `to` by at most `amount` radians, taking the short
/// way around.
pub fn rotate_until(from: f32, to: f32, amount: f32) -> f32 {
    let diff = normalize_angle(normalize_angle(to) - normalize_angle(from));
    let step = if amount >= diff.abs() {
        diff
    } else {
        diff.signum() * amount
    };

    normalize_angle(from + step)
}
