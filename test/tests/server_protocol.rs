/// Tests for the server's side of the protocol, driven by raw peers
/// Covers the stale and far-future input rules, relaying, seating and shutdown

use recoil_client::{Client, ClientConfig, ClientError, IdleInput};
use recoil_server::{Server, ServerConfig, ServerError};
use recoil_shared::{
    ClientMessage, Direction, Frame, GameState, LevelMap, MessageConnection, PlayerInput,
    ServerMessage, TransportError,
};
use recoil_test::{levels::OPEN_FIELD, LocalTransportPair};

type Peer = MessageConnection<ClientMessage, ServerMessage>;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn server(player_count: usize) -> Server {
    let config = ServerConfig {
        player_count,
        ..Default::default()
    };
    Server::new(config, LevelMap::from_ascii(OPEN_FIELD).unwrap())
}

fn connect(server: &mut Server) -> Peer {
    let (server_end, client_end) = LocalTransportPair::new().split();
    server.connect_client(server_end).unwrap();
    MessageConnection::new(client_end)
}

fn north(frame: Frame, player_number: u8) -> ClientMessage {
    ClientMessage::input(
        frame,
        player_number,
        PlayerInput {
            movement: Some(Direction::North),
            ..Default::default()
        },
    )
}

fn relayed_frames(peer: &mut Peer) -> Vec<Frame> {
    peer.consume()
        .unwrap()
        .into_iter()
        .filter_map(|message| match message {
            ServerMessage::RemoteClientMessage(remote) => Some(remote.frame),
            _ => None,
        })
        .collect()
}

/// Both peers report frames 0..5, then the server runs those five frames
fn started_session() -> (Server, Peer, Peer) {
    let mut server = server(2);
    let mut first = connect(&mut server);
    let mut second = connect(&mut server);
    server.update(0.0).unwrap();
    assert_eq!(server.game_state(), GameState::Running);

    for frame in 0..5 {
        first.send(&ClientMessage::frame_end(frame, 1)).unwrap();
        second.send(&ClientMessage::frame_end(frame, 2)).unwrap();
    }
    for _ in 0..5 {
        server.update(1.0 / 60.0).unwrap();
    }
    assert_eq!(server.simulation_frame(), 5);

    // drop the start message and the frame updates
    first.consume().unwrap();
    second.consume().unwrap();
    (server, first, second)
}

#[test]
fn start_game_assigns_seats_in_connection_order() {
    init_logger();

    let mut server = server(2);
    let mut first = connect(&mut server);
    let mut second = connect(&mut server);
    server.update(0.0).unwrap();

    for (peer, expected) in [(&mut first, 1u8), (&mut second, 2u8)] {
        match peer.consume().unwrap().as_slice() {
            [ServerMessage::StartGame { player_number, level }] => {
                assert_eq!(*player_number, expected);
                assert_eq!(level.player_count(), 2);
            }
            other => panic!("expected a start message, got {:?}", other),
        }
    }
}

/// Input for a frame the server already simulated is dropped; input for a
/// future frame is buffered and relayed to the other client only
#[test]
fn stale_input_is_discarded_and_future_input_relayed() {
    init_logger();

    let (mut server, mut first, mut second) = started_session();

    first.send(&north(2, 1)).unwrap();
    first.send(&north(7, 1)).unwrap();
    server.update(0.0).unwrap();

    assert_eq!(server.buffered_frames(), 3);
    assert_eq!(relayed_frames(&mut second), vec![7]);
    assert!(relayed_frames(&mut first).is_empty());
}

/// Both peers report frames 5..8 and the server runs them
fn finish_frames(server: &mut Server, first: &mut Peer, second: &mut Peer) {
    for frame in 5..8 {
        first.send(&ClientMessage::frame_end(frame, 1)).unwrap();
        second.send(&ClientMessage::frame_end(frame, 2)).unwrap();
    }
    for _ in 5..8 {
        server.update(1.0 / 60.0).unwrap();
    }
    assert_eq!(server.simulation_frame(), 8);
}

/// A discarded stale input leaves no trace on the simulated world
#[test]
fn stale_input_does_not_move_the_tank() {
    init_logger();

    let (mut untouched, mut first, mut second) = started_session();
    finish_frames(&mut untouched, &mut first, &mut second);

    let (mut server, mut first, mut second) = started_session();
    let tank = server.state_db().get_player_id(1).unwrap();
    let start = server.state_db().tables().transforms().get(&tank).unwrap().position;
    first.send(&north(2, 1)).unwrap();
    first.send(&north(4, 1)).unwrap();
    finish_frames(&mut server, &mut first, &mut second);

    let end = server.state_db().tables().transforms().get(&tank).unwrap().position;
    assert_eq!(end, start);
    assert_eq!(server.state_db().tables(), untouched.state_db().tables());
}

/// Input too far ahead of the simulation is neither buffered nor relayed,
/// and the session carries on
#[test]
fn far_future_input_is_discarded() {
    init_logger();

    let (mut server, mut first, mut second) = started_session();

    first.send(&north(Frame::MAX, 1)).unwrap();
    first.send(&north(5 + 10_000, 1)).unwrap();
    server.update(0.0).unwrap();

    assert_eq!(server.buffered_frames(), 0);
    assert!(relayed_frames(&mut second).is_empty());

    let limit = ServerConfig::default().max_input_lead;
    first.send(&north(5 + limit, 1)).unwrap();
    server.update(0.0).unwrap();
    assert_eq!(server.buffered_frames(), limit as usize + 1);
    assert_eq!(relayed_frames(&mut second), vec![5 + limit]);

    finish_frames(&mut server, &mut first, &mut second);
    assert_ne!(server.game_state(), GameState::Connecting);
}

/// Frame-end reports stay with the server; only input is relayed
#[test]
fn frame_end_reports_are_not_relayed() {
    init_logger();

    let (mut server, mut first, mut second) = started_session();
    finish_frames(&mut server, &mut first, &mut second);

    assert!(relayed_frames(&mut first).is_empty());
    assert!(relayed_frames(&mut second).is_empty());
}

/// Messages claiming another seat's player number are ignored
#[test]
fn impersonated_input_is_discarded() {
    init_logger();

    let (mut server, mut first, mut second) = started_session();

    first.send(&north(8, 2)).unwrap();
    server.update(0.0).unwrap();

    assert_eq!(server.buffered_frames(), 0);
    assert!(relayed_frames(&mut second).is_empty());
}

/// The batch each frame update carries is exactly the buffered input, in
/// player order
#[test]
fn frame_update_carries_canonical_inputs() {
    init_logger();

    let (mut server, mut first, mut second) = started_session();

    second.send(&north(5, 2)).unwrap();
    first.send(&north(5, 1)).unwrap();
    first.send(&ClientMessage::frame_end(5, 1)).unwrap();
    second.send(&ClientMessage::frame_end(5, 2)).unwrap();
    server.update(1.0 / 60.0).unwrap();
    assert_eq!(server.simulation_frame(), 6);

    let updates: Vec<(Frame, Vec<u8>)> = first
        .consume()
        .unwrap()
        .into_iter()
        .filter_map(|message| match message {
            ServerMessage::FrameUpdate { frame, inputs, .. } => Some((
                frame,
                inputs.iter().map(|input| input.player_number).collect(),
            )),
            _ => None,
        })
        .collect();
    assert_eq!(updates, vec![(5, vec![1, 2])]);
}

#[test]
fn full_session_refuses_clients() {
    init_logger();

    let mut server = server(1);
    let _seated = connect(&mut server);

    let pair = LocalTransportPair::new();
    let watcher = pair.client.clone();
    let (server_end, _client_end) = pair.split();
    assert!(matches!(
        server.connect_client(server_end),
        Err(ServerError::ConnectionRejected { .. })
    ));
    assert!(watcher.peer_closed());
    assert_eq!(server.connected_clients(), 1);
}

/// After shutdown the server refuses seats and its clients see the
/// connection drop
#[test]
fn shutdown_disconnects_clients() {
    init_logger();

    let mut server = server(1);
    let (server_end, client_end) = LocalTransportPair::new().split();
    server.connect_client(server_end).unwrap();
    let mut client = Client::new(ClientConfig::default(), client_end, Box::new(IdleInput));

    server.update(0.0).unwrap();
    client.update(0.0).unwrap();
    assert_eq!(client.player_number(), Some(1));

    server.shutdown();
    assert_eq!(
        client.update(1.0 / 60.0),
        Err(ClientError::Transport(TransportError::Closed))
    );

    let (server_end, _client_end) = LocalTransportPair::new().split();
    assert!(server.connect_client(server_end).is_err());
}
