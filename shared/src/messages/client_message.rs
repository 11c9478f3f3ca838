use std::f32::consts::FRAC_PI_4;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{
    components::BuilderMode,
    types::{Frame, PlayerNumber},
};

/// One of the eight compass directions a tank can be steered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Clockwise radians from north.
    pub fn angle(self) -> f32 {
        let index = Self::ALL
            .iter()
            .position(|direction| *direction == self)
            .unwrap_or(0);
        index as f32 * FRAC_PI_4
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    /// World position the turret is aimed at
    pub target: Vec2,
    pub firing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildCommand {
    pub mode: BuilderMode,
    pub destination: Vec2,
}

/// Everything a player can do in one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub movement: Option<Direction>,
    pub attack: Option<Attack>,
    pub change_weapon: bool,
    pub build: Option<BuildCommand>,
}

impl PlayerInput {
    /// An idle input changes nothing and need not be sent.
    pub fn is_idle(&self) -> bool {
        self.movement.is_none()
            && self.attack.is_none()
            && !self.change_weapon
            && self.build.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClientMessageKind {
    /// Input to apply when simulating `frame`
    Input(PlayerInput),
    /// The sender has finished simulating `frame`
    FrameEnd,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientMessage {
    pub frame: Frame,
    pub player_number: PlayerNumber,
    pub kind: ClientMessageKind,
}

impl ClientMessage {
    pub fn input(frame: Frame, player_number: PlayerNumber, input: PlayerInput) -> Self {
        Self {
            frame,
            player_number,
            kind: ClientMessageKind::Input(input),
        }
    }

    pub fn frame_end(frame: Frame, player_number: PlayerNumber) -> Self {
        Self {
            frame,
            player_number,
            kind: ClientMessageKind::FrameEnd,
        }
    }

    pub fn player_input(&self) -> Option<&PlayerInput> {
        match &self.kind {
            ClientMessageKind::Input(input) => Some(input),
            ClientMessageKind::FrameEnd => None,
        }
    }
}

/// Sorts a frame's messages into the order every peer simulates them in.
pub fn sort_canonical(messages: &mut [ClientMessage]) {
    messages.sort_by_key(|message| message.player_number);
}
