use log::{debug, info, trace, warn};

use recoil_shared::{
    constants::DIAGNOSTIC_WINDOW, ClientMessage, ClientMessageKind, Frame, FrameEvent, GameState,
    MessageConnection, PlayerNumber, RunningAverage, ServerMessage, StateDb, Stopwatch, Transport,
};

use crate::{prediction::Session, ClientConfig, ClientError, InputSource};

/// Client can send input to a Server, predicts the simulation ahead of it,
/// and reconciles its prediction with the inputs the Server actually used.
pub struct Client {
    config: ClientConfig,
    connection: MessageConnection<ClientMessage, ServerMessage>,
    input_source: Box<dyn InputSource>,
    state: GameState,
    session: Option<Session>,
    accumulated_time: f32,
    frame_events: Vec<FrameEvent>,
    rewinds: u64,
    simulation_duration: RunningAverage,
    server_update_frame_duration_avg: f64,
    server_simulation_duration_avg: f64,
}

impl Client {
    /// Create a new Client talking to the server over `transport`. Nothing is
    /// simulated until the server starts the game.
    pub fn new(
        config: ClientConfig,
        transport: Box<dyn Transport>,
        input_source: Box<dyn InputSource>,
    ) -> Self {
        Self {
            config,
            connection: MessageConnection::new(transport),
            input_source,
            state: GameState::Connecting,
            session: None,
            accumulated_time: 0.0,
            frame_events: Vec::new(),
            rewinds: 0,
            simulation_duration: RunningAverage::new(DIAGNOSTIC_WINDOW),
            server_update_frame_duration_avg: 0.0,
            server_simulation_duration_avg: 0.0,
        }
    }

    /// Must be called regularly with the wall-clock seconds since the last
    /// call. Applies everything the server sent, reconciles the prediction
    /// with it, then predicts as many frames as the elapsed time allows.
    pub fn update(&mut self, elapsed: f32) -> Result<(), ClientError> {
        self.frame_events.clear();

        for message in self.connection.consume()? {
            self.receive_message(message)?;
        }

        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        if session.reconcile(&self.config)? {
            self.rewinds += 1;
        }

        self.accumulated_time += elapsed;
        while self.accumulated_time >= self.config.simulation_period {
            let horizon = session.inputs.next_confirmed() + self.config.max_prediction_frames;
            if session.local_frame >= horizon {
                trace!(
                    "player {}: prediction paused at frame {}, server confirmed up to {}",
                    session.player_number,
                    session.local_frame,
                    session.inputs.next_confirmed()
                );
                self.accumulated_time = 0.0;
                break;
            }
            self.accumulated_time -= self.config.simulation_period;

            let frame = session.local_frame;
            let input = self
                .input_source
                .poll(frame)
                .filter(|input| !input.is_idle());
            if let Some(input) = input {
                let message = ClientMessage::input(
                    frame + self.config.input_delay,
                    session.player_number,
                    input,
                );
                self.connection.send(&message)?;
                session.inputs.record(message);
            }

            let stopwatch = Stopwatch::start();
            let events = session.predict(self.config.simulation_period)?;
            self.simulation_duration.sample(stopwatch.elapsed_ms());
            self.frame_events.extend(events);

            self.connection
                .send(&ClientMessage::frame_end(frame, session.player_number))?;
        }

        self.refresh_game_state();
        Ok(())
    }

    /// Closes the connection to the server.
    pub fn disconnect(&mut self) {
        self.connection.close();
    }

    // Accessors

    pub fn game_state(&self) -> GameState {
        self.state
    }

    /// Seat assigned by the server, once the game has started.
    pub fn player_number(&self) -> Option<PlayerNumber> {
        self.session.as_ref().map(|session| session.player_number)
    }

    /// The predicted world, once the game has started.
    pub fn state_db(&self) -> Option<&StateDb> {
        self.session.as_ref().map(|session| &session.state_db)
    }

    /// Next frame the client will predict.
    pub fn local_frame(&self) -> Frame {
        self.session
            .as_ref()
            .map_or(0, |session| session.local_frame)
    }

    /// First frame the server has not confirmed yet.
    pub fn confirmed_frame(&self) -> Frame {
        self.session
            .as_ref()
            .map_or(0, |session| session.inputs.next_confirmed())
    }

    /// Frame the committed state sits at. A rewind never goes further back.
    pub fn checkpoint_frame(&self) -> Frame {
        self.session
            .as_ref()
            .map_or(0, |session| session.checkpoint_frame)
    }

    /// Number of rewinds caused by mispredicted input.
    pub fn rewinds(&self) -> u64 {
        self.rewinds
    }

    /// Events of the frames first predicted during the last `update`. Frames
    /// replayed by a rewind do not report their events again.
    pub fn frame_events(&self) -> &[FrameEvent] {
        &self.frame_events
    }

    /// Milliseconds this client spends predicting one frame, on average.
    pub fn simulation_duration_avg(&self) -> f64 {
        self.simulation_duration.average()
    }

    /// Server-side averages reported with the last frame update, in
    /// milliseconds: `(update_frame, simulation)`.
    pub fn server_diagnostics(&self) -> (f64, f64) {
        (
            self.server_update_frame_duration_avg,
            self.server_simulation_duration_avg,
        )
    }

    // Private

    fn receive_message(&mut self, message: ServerMessage) -> Result<(), ClientError> {
        match message {
            ServerMessage::StartGame {
                player_number,
                level,
            } => {
                if self.session.is_some() {
                    warn!("server started the game twice, ignoring");
                    return Ok(());
                }
                self.session = Some(Session::start(&self.config, player_number, &level)?);
                self.state = GameState::Running;
                info!(
                    "game started as player {} on a {}x{} level",
                    player_number, level.dimensions.x, level.dimensions.y
                );
            }
            ServerMessage::RemoteClientMessage(remote) => {
                let Some(session) = self.session.as_mut() else {
                    warn!("relayed input before the game started, discarding");
                    return Ok(());
                };
                if remote.player_number == session.player_number {
                    warn!("server relayed our own input back, discarding");
                } else if !matches!(remote.kind, ClientMessageKind::Input(_)) {
                    warn!("server relayed a non-input message, discarding");
                } else if remote.frame < session.checkpoint_frame {
                    debug!(
                        "relayed input for confirmed frame {} from player {}, discarding",
                        remote.frame, remote.player_number
                    );
                } else {
                    session.inputs.record(remote);
                }
            }
            ServerMessage::FrameUpdate {
                frame,
                inputs,
                update_frame_duration_avg,
                simulation_duration_avg,
            } => {
                let Some(session) = self.session.as_mut() else {
                    warn!("frame update before the game started, discarding");
                    return Ok(());
                };
                session.inputs.confirm(frame, inputs);
                self.server_update_frame_duration_avg = update_frame_duration_avg;
                self.server_simulation_duration_avg = simulation_duration_avg;
            }
        }

        Ok(())
    }

    fn refresh_game_state(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        if self.state == GameState::Running && !session.player_alive {
            self.state = GameState::YouDied;
            info!("player {} was destroyed", session.player_number);
        }

        if matches!(self.state, GameState::Running | GameState::YouDied) && !session.enemies_remain {
            self.state = GameState::LevelComplete;
            info!("level complete at frame {}", session.checkpoint_frame);
        }
    }
}
