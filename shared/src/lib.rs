//! # Recoil Shared
//! The deterministic simulation core shared by recoil-server and
//! recoil-client: transactional component storage, the entity registry, the
//! spatial index, the frame pipeline and the wire protocol.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

mod backends;
mod game_state;
mod running_average;
mod types;

pub mod component_table;
pub mod components;
pub mod constants;
pub mod entities;
pub mod level;
pub mod math;
pub mod messages;
pub mod quadtree;
pub mod simulation;
pub mod state;
pub mod transport;

pub use backends::Stopwatch;
pub use component_table::{ComponentTable, ComponentTableError};
pub use game_state::GameState;
pub use level::{init_map, LevelError, LevelMap, MapEntity};
pub use messages::{
    ClientMessage, ClientMessageKind, CodecError, Direction, PlayerInput, ServerMessage,
};
pub use quadtree::{Aabb2, Quadtree, QuadtreeConfig, QuadtreeItem};
pub use running_average::RunningAverage;
pub use simulation::{simulate, FrameEvent, FrameState, SimulationError, SimulationPhase};
pub use state::{ComponentKind, EntityComponents, StateDb};
pub use transport::{MessageConnection, Transport, TransportError};
pub use types::{EntityId, Frame, PlayerNumber};

pub use glam::Vec2;
