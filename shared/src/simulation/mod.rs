//! The fixed-step frame pipeline.
//!
//! `simulate` runs every system in one canonical order, then performs the
//! registry's end-of-frame bookkeeping. Given the same registry state and the
//! same messages, every peer produces the same result.

mod error;
mod frame_event;
mod phase;
mod systems;

pub use error::SimulationError;
pub use frame_event::FrameEvent;
pub use phase::SimulationPhase;

use log::trace;

use crate::{messages::ClientMessage, state::StateDb, types::Frame};

/// Everything one frame of simulation reads and writes.
pub struct FrameState<'a> {
    pub state_db: &'a mut StateDb,
    /// Inputs for this frame, in canonical order
    pub messages: &'a [ClientMessage],
    pub frame_events: Vec<FrameEvent>,
    pub frame: Frame,
    pub phase: SimulationPhase,
    /// Seconds per frame
    pub dt: f32,
}

impl<'a> FrameState<'a> {
    pub fn new(
        state_db: &'a mut StateDb,
        messages: &'a [ClientMessage],
        frame: Frame,
        phase: SimulationPhase,
        dt: f32,
    ) -> Self {
        Self {
            state_db,
            messages,
            frame_events: Vec::new(),
            frame,
            phase,
            dt,
        }
    }
}

pub fn simulate(frame_state: &mut FrameState<'_>) -> Result<(), SimulationError> {
    trace!(
        "simulating frame {} ({:?}, {} messages)",
        frame_state.frame,
        frame_state.phase,
        frame_state.messages.len()
    );

    systems::transform_init::update(frame_state)?;
    systems::hiding::update(frame_state)?;
    systems::builder::update(frame_state)?;
    systems::shooter::update(frame_state)?;
    systems::turret::update(frame_state)?;
    systems::bullet::update(frame_state)?;
    systems::explosion::update(frame_state)?;
    systems::damager::update(frame_state)?;
    systems::tank_mover::update(frame_state)?;
    systems::wall_collider::update(frame_state)?;
    systems::playfield_clamping::update(frame_state)?;
    systems::damageable::update(frame_state)?;
    systems::emitter::update(frame_state)?;

    frame_state.state_db.post_frame_update();
    Ok(())
}
