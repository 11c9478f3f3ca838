mod scripted_input;

pub use scripted_input::ScriptedInput;

use recoil_client::{Client, ClientConfig, InputSource};
use recoil_server::{Server, ServerConfig};
use recoil_shared::{constants::SIMULATION_PERIOD_S, LevelMap, StateDb};

use crate::LocalTransportPair;

/// A server and its clients wired together with in-memory transports.
/// Nothing moves unless a test steps it, so every interleaving is explicit.
pub struct Harness {
    pub server: Server,
    pub clients: Vec<Client>,
    period: f32,
}

impl Harness {
    /// Seats one client per input source, in order, and runs the handshake
    /// so every client has received its player number and the level.
    pub fn start(layout: &str, inputs: Vec<Box<dyn InputSource>>) -> Self {
        Self::start_with(layout, ClientConfig::default(), inputs)
    }

    pub fn start_with(
        layout: &str,
        client_config: ClientConfig,
        inputs: Vec<Box<dyn InputSource>>,
    ) -> Self {
        let level = LevelMap::from_ascii(layout).expect("test level should parse");
        let server_config = ServerConfig {
            player_count: inputs.len(),
            ..Default::default()
        };
        let mut server = Server::new(server_config, level);

        let mut clients = Vec::new();
        for input in inputs {
            let (server_end, client_end) = LocalTransportPair::new().split();
            server
                .connect_client(server_end)
                .expect("server should seat the client");
            clients.push(Client::new(client_config.clone(), client_end, input));
        }

        let mut harness = Self {
            server,
            clients,
            period: SIMULATION_PERIOD_S,
        };
        harness.server.update(0.0).expect("server should start the game");
        harness.sync_all();
        harness
    }

    /// Advances client `index` by one frame of wall-clock time.
    pub fn step_client(&mut self, index: usize) {
        self.clients[index]
            .update(self.period)
            .expect("client update failed");
    }

    /// Lets client `index` take in what the server sent without predicting.
    pub fn sync_client(&mut self, index: usize) {
        self.clients[index].update(0.0).expect("client update failed");
    }

    pub fn sync_all(&mut self) {
        for index in 0..self.clients.len() {
            self.sync_client(index);
        }
    }

    /// Advances the server by one frame of wall-clock time.
    pub fn step_server(&mut self) {
        self.server
            .update(self.period)
            .expect("server update failed");
    }

    /// Steps every client and then the server, `frames` times.
    pub fn lockstep(&mut self, frames: usize) {
        for _ in 0..frames {
            for index in 0..self.clients.len() {
                self.step_client(index);
            }
            self.step_server();
        }
    }

    pub fn client_state(&self, index: usize) -> &StateDb {
        self.clients[index]
            .state_db()
            .expect("client should have started")
    }

    /// Whether client `index` holds exactly the server's world.
    pub fn client_matches_server(&self, index: usize) -> bool {
        self.client_state(index).tables() == self.server.state_db().tables()
    }
}
