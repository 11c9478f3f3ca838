use serde::{Deserialize, Serialize};

use crate::{
    level::LevelMap,
    messages::ClientMessage,
    types::{Frame, PlayerNumber},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// Sent once every seat is taken. The receiver controls
    /// `player_number` on `level`.
    StartGame {
        player_number: PlayerNumber,
        level: LevelMap,
    },
    /// Authoritative inputs of `frame`, in canonical order, plus server
    /// timing diagnostics in milliseconds.
    FrameUpdate {
        frame: Frame,
        inputs: Vec<ClientMessage>,
        update_frame_duration_avg: f64,
        simulation_duration_avg: f64,
    },
    /// Input another client sent, relayed as soon as it arrived so the
    /// receiver can predict with it.
    RemoteClientMessage(ClientMessage),
}
