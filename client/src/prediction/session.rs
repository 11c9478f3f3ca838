use log::{debug, trace};

use recoil_shared::{
    components::Team, init_map, simulate, ClientMessage, Frame, FrameEvent, FrameState, LevelMap, PlayerNumber,
    SimulationError, SimulationPhase, StateDb,
};

use crate::{prediction::InputLog, ClientConfig};

/// A running game as one client sees it.
///
/// The committed state of `state_db` always sits at `checkpoint_frame`:
/// every frame before it is confirmed and was simulated with authoritative
/// input. Frames from the checkpoint up to `local_frame` are predictions
/// that a rewind may throw away. `player_alive` and `enemies_remain` are
/// read from the committed state only, so a prediction can never end the
/// game on its own.
pub(crate) struct Session {
    pub player_number: PlayerNumber,
    pub state_db: StateDb,
    pub inputs: InputLog,
    /// Next frame to predict
    pub local_frame: Frame,
    pub checkpoint_frame: Frame,
    pub player_alive: bool,
    pub enemies_remain: bool,
}

impl Session {
    pub fn start(
        config: &ClientConfig,
        player_number: PlayerNumber,
        level: &LevelMap,
    ) -> Result<Self, SimulationError> {
        let mut state_db = StateDb::new(level.world_bounds(), config.quadtree_capacity);
        init_map(&mut state_db, level)?;

        let mut session = Self {
            player_number,
            state_db,
            inputs: InputLog::new(),
            local_frame: 0,
            checkpoint_frame: 0,
            player_alive: true,
            enemies_remain: true,
        };
        session.observe_checkpoint();
        Ok(session)
    }

    /// Simulates `local_frame` with the best input known for it and moves on
    /// to the next frame.
    pub fn predict(&mut self, dt: f32) -> Result<Vec<FrameEvent>, SimulationError> {
        let frame = self.local_frame;
        let batch = self.inputs.best_known(frame);
        let events = run_frame(
            &mut self.state_db,
            &batch,
            frame,
            SimulationPhase::ClientPrediction,
            dt,
        )?;
        self.inputs.record_prediction(frame, batch);
        self.local_frame += 1;
        Ok(events)
    }

    /// Compares predictions against confirmed input and moves the checkpoint
    /// forward. Returns whether a misprediction forced a rewind.
    pub fn reconcile(&mut self, config: &ClientConfig) -> Result<bool, SimulationError> {
        let confirmed_end = self.inputs.next_confirmed().min(self.local_frame);
        if confirmed_end <= self.checkpoint_frame {
            return Ok(false);
        }

        if let Some(frame) = self
            .inputs
            .first_divergence(self.checkpoint_frame, confirmed_end)
        {
            debug!(
                "player {}: frame {} was mispredicted, rewinding to frame {}",
                self.player_number, frame, self.checkpoint_frame
            );
            self.rewind(confirmed_end, config.simulation_period)?;
            return Ok(true);
        }

        if confirmed_end == self.local_frame {
            // the prediction used exactly the confirmed input
            self.state_db.commit_prediction();
            self.checkpoint_frame = confirmed_end;
            self.inputs.discard_before(confirmed_end);
            self.observe_checkpoint();
        } else if confirmed_end - self.checkpoint_frame >= config.rebase_interval {
            trace!(
                "player {}: moving checkpoint from frame {} to {}",
                self.player_number,
                self.checkpoint_frame,
                confirmed_end
            );
            self.rewind(confirmed_end, config.simulation_period)?;
        }

        Ok(false)
    }

    // Rolls back to the checkpoint, replays every confirmed frame up to
    // `confirmed_end` with authoritative input, then re-predicts the rest.
    fn rewind(&mut self, confirmed_end: Frame, dt: f32) -> Result<(), SimulationError> {
        self.state_db.rollback_prediction();

        for frame in self.checkpoint_frame..confirmed_end {
            let batch = self.inputs.authoritative(frame);
            run_frame(
                &mut self.state_db,
                &batch,
                frame,
                SimulationPhase::ClientAuthoritative,
                dt,
            )?;
            self.state_db.commit_prediction();
        }
        self.checkpoint_frame = confirmed_end;
        self.inputs.discard_before(confirmed_end);
        self.observe_checkpoint();

        for frame in confirmed_end..self.local_frame {
            let batch = self.inputs.best_known(frame);
            run_frame(
                &mut self.state_db,
                &batch,
                frame,
                SimulationPhase::ClientReprediction,
                dt,
            )?;
            self.inputs.record_prediction(frame, batch);
        }

        Ok(())
    }

    // Must run while the working state equals the committed state.
    fn observe_checkpoint(&mut self) {
        self.player_alive = self.state_db.get_player_id(self.player_number).is_some();
        self.enemies_remain = self.state_db.has_team_members(Team::Enemy);
    }
}

fn run_frame(
    state_db: &mut StateDb,
    inputs: &[ClientMessage],
    frame: Frame,
    phase: SimulationPhase,
    dt: f32,
) -> Result<Vec<FrameEvent>, SimulationError> {
    let mut frame_state = FrameState::new(state_db, inputs, frame, phase, dt);
    simulate(&mut frame_state)?;
    Ok(frame_state.frame_events)
}
