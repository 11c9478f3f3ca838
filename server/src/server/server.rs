use log::{debug, info, trace, warn};

use recoil_shared::{
    components::Team,
    constants::DIAGNOSTIC_WINDOW,
    init_map,
    messages::sort_canonical,
    simulate, ClientMessage, ClientMessageKind, Frame, FrameEvent, FrameState, GameState,
    LevelMap, PlayerNumber, RunningAverage, ServerMessage, SimulationPhase, StateDb, Stopwatch,
    Transport,
};

use crate::{
    connection::ClientConnection,
    server::{FrameBuffer, ServerConfig},
    ServerError,
};

/// The authoritative peer. Collects per-frame input from every client,
/// advances the simulation only once every client has caught up to the
/// next frame, and broadcasts the inputs each frame consumed.
pub struct Server {
    config: ServerConfig,
    level: LevelMap,
    state: GameState,
    state_db: StateDb,
    connections: Vec<ClientConnection>,
    frame_buffer: FrameBuffer,
    /// Next frame to simulate
    simulation_frame: Frame,
    accumulated_time: f32,
    shutting_down: bool,
    frame_events: Vec<FrameEvent>,
    update_frame_duration: RunningAverage,
    simulation_duration: RunningAverage,
}

impl Server {
    /// Create a new Server that will host `level`
    pub fn new(config: ServerConfig, level: LevelMap) -> Self {
        let state_db = StateDb::new(level.world_bounds(), config.quadtree_capacity);

        Self {
            config,
            level,
            state: GameState::Connecting,
            state_db,
            connections: Vec::new(),
            frame_buffer: FrameBuffer::new(),
            simulation_frame: 0,
            accumulated_time: 0.0,
            shutting_down: false,
            frame_events: Vec::new(),
            update_frame_duration: RunningAverage::new(DIAGNOSTIC_WINDOW),
            simulation_duration: RunningAverage::new(DIAGNOSTIC_WINDOW),
        }
    }

    // Connections

    /// Seats a new client and returns its player number. Refused (and the
    /// transport closed) once the session is full, running or shutting down.
    pub fn connect_client(
        &mut self,
        mut transport: Box<dyn Transport>,
    ) -> Result<PlayerNumber, ServerError> {
        let refusal = if self.shutting_down {
            Some("server is shutting down")
        } else if self.state != GameState::Connecting {
            Some("game already started")
        } else if self.connections.len() >= self.config.player_count {
            Some("session is full")
        } else {
            None
        };

        if let Some(reason) = refusal {
            warn!("refusing client connection: {}", reason);
            transport.close();
            return Err(ServerError::ConnectionRejected { reason });
        }

        let player_number = PlayerNumber::try_from(self.connections.len() + 1).map_err(|_| {
            ServerError::ConnectionRejected {
                reason: "too many players",
            }
        })?;
        self.connections
            .push(ClientConnection::new(player_number, transport));
        info!(
            "client connected as player {} ({}/{})",
            player_number,
            self.connections.len(),
            self.config.player_count
        );

        Ok(player_number)
    }

    /// Closes every connection and refuses new ones.
    pub fn shutdown(&mut self) {
        if self.shutting_down {
            return;
        }
        self.shutting_down = true;
        for connection in &mut self.connections {
            connection.close();
        }
        info!("server shut down at frame {}", self.simulation_frame);
    }

    // Update

    /// Must be called regularly with the wall-clock seconds since the last
    /// call. Drains every connection, then simulates as many frames as the
    /// elapsed time and the slowest client allow.
    pub fn update(&mut self, dt: f32) -> Result<(), ServerError> {
        if self.shutting_down {
            return Ok(());
        }

        let stopwatch = Stopwatch::start();
        self.frame_events.clear();
        self.receive_messages();

        if self.state == GameState::Connecting {
            if self.connections.len() < self.config.player_count {
                return Ok(());
            }
            self.start_game()?;
        }

        self.accumulated_time += dt;
        while self.accumulated_time >= self.config.simulation_period {
            if !self.all_clients_reached(self.simulation_frame) {
                debug!(
                    "stalling at frame {}: waiting for {:?}",
                    self.simulation_frame,
                    self.lagging_players()
                );
                // don't build up a backlog while stalled
                self.accumulated_time = 0.0;
                break;
            }

            self.accumulated_time -= self.config.simulation_period;
            self.simulate_frame()?;
        }

        self.update_frame_duration.sample(stopwatch.elapsed_ms());
        Ok(())
    }

    // Accessors

    pub fn game_state(&self) -> GameState {
        self.state
    }

    /// Next frame the server will simulate.
    pub fn simulation_frame(&self) -> Frame {
        self.simulation_frame
    }

    pub fn state_db(&self) -> &StateDb {
        &self.state_db
    }

    pub fn connected_clients(&self) -> usize {
        self.connections.len()
    }

    /// Events produced by the frames simulated during the last `update`.
    pub fn frame_events(&self) -> &[FrameEvent] {
        &self.frame_events
    }

    /// Number of future frames holding buffered input.
    pub fn buffered_frames(&self) -> usize {
        self.frame_buffer.len()
    }

    // Private

    fn receive_messages(&mut self) {
        let mut relays: Vec<(PlayerNumber, ClientMessage)> = Vec::new();

        for connection in &mut self.connections {
            if connection.is_closed() {
                continue;
            }
            let messages = match connection.receive() {
                Ok(messages) => messages,
                Err(err) => {
                    warn!("player {}: {}", connection.player_number, err);
                    connection.close();
                    continue;
                }
            };

            for message in messages {
                if message.player_number != connection.player_number {
                    warn!(
                        "player {} sent a message for player {}, discarding",
                        connection.player_number, message.player_number
                    );
                    continue;
                }
                if self.state == GameState::Connecting {
                    warn!(
                        "player {} sent a message before the game started, discarding",
                        connection.player_number
                    );
                    continue;
                }

                match message.kind {
                    ClientMessageKind::FrameEnd => connection.report_frame_end(message.frame),
                    ClientMessageKind::Input(_) => {
                        if message.frame < self.simulation_frame {
                            warn!(
                                "player {} sent input for frame {} but frame {} is next, discarding",
                                connection.player_number, message.frame, self.simulation_frame
                            );
                            continue;
                        }
                        let lead = message.frame - self.simulation_frame;
                        if lead > self.config.max_input_lead {
                            warn!(
                                "player {} sent input for frame {}, {} frames ahead of the simulation, discarding",
                                connection.player_number, message.frame, lead
                            );
                            continue;
                        }

                        let offset = lead as usize;
                        self.frame_buffer.file(offset, message.clone());
                        relays.push((connection.player_number, message));
                    }
                }
            }
        }

        for (sender, message) in relays {
            let relayed = ServerMessage::RemoteClientMessage(message);
            for connection in &mut self.connections {
                if connection.player_number == sender || connection.is_closed() {
                    continue;
                }
                if let Err(err) = connection.send(&relayed) {
                    warn!("relay to player {} failed: {}", connection.player_number, err);
                }
            }
        }
    }

    fn start_game(&mut self) -> Result<(), ServerError> {
        init_map(&mut self.state_db, &self.level)?;

        for connection in &mut self.connections {
            let message = ServerMessage::StartGame {
                player_number: connection.player_number,
                level: self.level.clone(),
            };
            if let Err(err) = connection.send(&message) {
                warn!("start message to player {} failed: {}", connection.player_number, err);
            }
        }

        self.state = GameState::Running;
        info!("all {} players connected, game started", self.connections.len());
        Ok(())
    }

    fn all_clients_reached(&self, frame: Frame) -> bool {
        self.connections
            .iter()
            .all(|connection| connection.has_reached(frame))
    }

    fn lagging_players(&self) -> Vec<(PlayerNumber, Option<Frame>)> {
        self.connections
            .iter()
            .filter(|connection| !connection.has_reached(self.simulation_frame))
            .map(|connection| (connection.player_number, connection.last_frame_end()))
            .collect()
    }

    fn simulate_frame(&mut self) -> Result<(), ServerError> {
        let mut inputs = self.frame_buffer.pop_next();
        sort_canonical(&mut inputs);

        let stopwatch = Stopwatch::start();
        let mut frame_state = FrameState::new(
            &mut self.state_db,
            &inputs,
            self.simulation_frame,
            SimulationPhase::ServerTick,
            self.config.simulation_period,
        );
        simulate(&mut frame_state)?;
        let events = frame_state.frame_events;
        self.simulation_duration.sample(stopwatch.elapsed_ms());
        self.frame_events.extend(events);

        let update = ServerMessage::FrameUpdate {
            frame: self.simulation_frame,
            inputs,
            update_frame_duration_avg: self.update_frame_duration.average(),
            simulation_duration_avg: self.simulation_duration.average(),
        };
        for connection in &mut self.connections {
            if connection.is_closed() {
                continue;
            }
            if let Err(err) = connection.send(&update) {
                warn!("frame update to player {} failed: {}", connection.player_number, err);
            }
        }

        self.state_db.commit_prediction();
        self.simulation_frame += 1;

        if self.state == GameState::Running && !self.state_db.has_team_members(Team::Enemy) {
            self.state = GameState::LevelComplete;
            info!("level complete at frame {}", self.simulation_frame - 1);
        }
        trace!("simulated frame {}", self.simulation_frame - 1);

        Ok(())
    }
}
