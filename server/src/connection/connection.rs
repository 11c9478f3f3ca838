use recoil_shared::{
    ClientMessage, Frame, MessageConnection, PlayerNumber, ServerMessage, Transport,
    TransportError,
};

/// Server side of one client's connection.
pub(crate) struct ClientConnection {
    pub player_number: PlayerNumber,
    connection: MessageConnection<ServerMessage, ClientMessage>,
    /// Last frame the client reported as simulated
    last_frame_end: Option<Frame>,
}

impl ClientConnection {
    pub fn new(player_number: PlayerNumber, transport: Box<dyn Transport>) -> Self {
        Self {
            player_number,
            connection: MessageConnection::new(transport),
            last_frame_end: None,
        }
    }

    pub fn send(&mut self, message: &ServerMessage) -> Result<(), TransportError> {
        self.connection.send(message)
    }

    pub fn receive(&mut self) -> Result<Vec<ClientMessage>, TransportError> {
        self.connection.consume()
    }

    /// Records a frame-end report. Reports never move backwards.
    pub fn report_frame_end(&mut self, frame: Frame) {
        self.last_frame_end = Some(self.last_frame_end.map_or(frame, |last| last.max(frame)));
    }

    /// Whether the client has finished simulating `frame`.
    pub fn has_reached(&self, frame: Frame) -> bool {
        self.last_frame_end.is_some_and(|last| last >= frame)
    }

    pub fn last_frame_end(&self) -> Option<Frame> {
        self.last_frame_end
    }

    pub fn close(&mut self) {
        self.connection.close();
    }

    pub fn is_closed(&self) -> bool {
        self.connection.is_closed()
    }
}
