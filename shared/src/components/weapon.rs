use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::Frame;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    #[default]
    Standard,
    Rocket,
    Mortar,
}

impl WeaponType {
    /// The weapon selected by one "change weapon" press.
    pub fn next(self) -> Self {
        match self {
            WeaponType::Standard => WeaponType::Rocket,
            WeaponType::Rocket => WeaponType::Mortar,
            WeaponType::Mortar => WeaponType::Standard,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shooter {
    pub last_fired_frame: Option<Frame>,
    /// Aim direction, independent of the hull orientation
    pub orientation: f32,
    pub weapon: WeaponType,
}

impl Shooter {
    pub fn is_cooling_down(&self, frame: Frame, cooldown_frames: Frame) -> bool {
        match self.last_fired_frame {
            Some(last) => frame.saturating_sub(last) < cooldown_frames,
            None => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    pub weapon: WeaponType,
    pub origin: Vec2,
    /// Seconds since the bullet was fired
    pub lifetime: f32,
    pub current_speed: f32,
    /// Landing point, only used by mortar shells
    pub target: Option<Vec2>,
}

/// Automated gun emplacement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Turret {
    pub orientation: f32,
    /// Seconds until the turret may fire again
    pub cooldown: f32,
}

/// Frames left before an explosion entity disappears.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Explosion {
    pub frames_left: u32,
}
