/// End-to-end tests for the frame synchronization protocol
/// A real server and predicting clients connected over in-memory transports

use recoil_client::{ClientConfig, IdleInput};
use recoil_shared::{
    constants::TANK_SPEED, messages::Attack, Direction, GameState, PlayerInput, Vec2,
};
use recoil_test::{
    levels::{OPEN_FIELD, TURRET_ALLEY},
    Harness, ScriptedInput,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn north() -> PlayerInput {
    PlayerInput {
        movement: Some(Direction::North),
        ..Default::default()
    }
}

fn tank_position(harness: &Harness, client: usize, player_number: u8) -> Vec2 {
    let state = harness.client_state(client);
    let tank = state.get_player_id(player_number).unwrap();
    state.tables().transforms().get(&tank).unwrap().position
}

/// Player 1 starts moving north at frame 10; both clients end up holding
/// exactly the server's world, without a single mispredicted frame
#[test]
fn clients_converge_on_server_state() {
    init_logger();

    let mut harness = Harness::start(
        OPEN_FIELD,
        vec![
            ScriptedInput::new().hold(10..1000, north()).boxed(),
            Box::new(IdleInput),
        ],
    );
    assert_eq!(harness.clients[0].player_number(), Some(1));
    assert_eq!(harness.clients[1].player_number(), Some(2));

    let start = tank_position(&harness, 1, 1);
    harness.lockstep(40);
    harness.sync_all();

    assert_eq!(harness.server.simulation_frame(), 40);
    for client in 0..2 {
        assert_eq!(harness.clients[client].local_frame(), 40);
        assert_eq!(harness.clients[client].confirmed_frame(), 40);
        assert_eq!(harness.clients[client].checkpoint_frame(), 40);
        assert_eq!(harness.clients[client].rewinds(), 0);
        assert!(harness.client_matches_server(client));
    }

    // 30 frames of driving north, as seen by the other player
    let moved = tank_position(&harness, 1, 1);
    assert!((moved.x - start.x).abs() < 1e-4);
    assert!((start.y - moved.y - 30.0 * TANK_SPEED / 60.0).abs() < 1e-3);
}

/// A client that ran ahead predicts frames before the other player's input
/// for them is relayed; it rewinds and still converges
#[test]
fn late_remote_input_is_repredicted() {
    init_logger();

    let mut harness = Harness::start(
        OPEN_FIELD,
        vec![
            ScriptedInput::new().hold(5..1000, north()).boxed(),
            Box::new(IdleInput),
        ],
    );

    for _ in 0..6 {
        harness.step_client(1);
    }
    harness.lockstep(30);
    assert!(harness.clients[1].rewinds() >= 1);
    assert_eq!(harness.clients[1].local_frame(), 36);

    // let player 1 and the server catch up with player 2
    for _ in 0..6 {
        harness.step_client(0);
        harness.step_server();
    }
    harness.sync_all();

    assert_eq!(harness.server.simulation_frame(), 36);
    assert_eq!(harness.clients[0].rewinds(), 0);
    assert!(harness.client_matches_server(0));
    assert!(harness.client_matches_server(1));
}

/// The server never simulates a frame some client has not reached
#[test]
fn server_stalls_for_slowest_client() {
    init_logger();

    let mut harness = Harness::start(
        OPEN_FIELD,
        vec![Box::new(IdleInput), Box::new(IdleInput)],
    );

    for _ in 0..5 {
        harness.step_client(0);
        harness.step_server();
    }
    assert_eq!(harness.server.simulation_frame(), 0);
    assert_eq!(harness.clients[0].local_frame(), 5);

    harness.step_client(1);
    harness.step_server();
    assert_eq!(harness.server.simulation_frame(), 1);

    harness.step_client(1);
    harness.step_server();
    assert_eq!(harness.server.simulation_frame(), 2);
}

/// A client stops predicting once it is too far past the confirmed frame
#[test]
fn prediction_is_throttled_by_confirmation() {
    init_logger();

    let mut harness = Harness::start(
        OPEN_FIELD,
        vec![Box::new(IdleInput), Box::new(IdleInput)],
    );

    for _ in 0..50 {
        harness.step_client(0);
    }
    assert_eq!(harness.clients[0].local_frame(), 20);
    assert_eq!(harness.clients[0].confirmed_frame(), 0);
}

/// Open field has no enemies, so both peers see the level as complete
#[test]
fn level_without_enemies_is_complete() {
    init_logger();

    let mut harness = Harness::start(
        OPEN_FIELD,
        vec![Box::new(IdleInput), Box::new(IdleInput)],
    );
    assert_eq!(harness.server.game_state(), GameState::Running);

    harness.lockstep(1);
    assert_eq!(harness.server.game_state(), GameState::LevelComplete);
    assert_eq!(harness.clients[0].game_state(), GameState::LevelComplete);
}

/// Frame updates carry the server's timing averages to every client
#[test]
fn server_diagnostics_reach_clients() {
    init_logger();

    let mut harness = Harness::start(
        OPEN_FIELD,
        vec![Box::new(IdleInput), Box::new(IdleInput)],
    );
    assert_eq!(harness.clients[0].server_diagnostics(), (0.0, 0.0));

    harness.lockstep(3);
    harness.sync_all();

    let (update_frame, simulation) = harness.clients[1].server_diagnostics();
    assert!(update_frame >= 0.0);
    assert!(simulation >= 0.0);
    assert!(harness.clients[1].simulation_duration_avg() >= 0.0);
}

/// Player 1 runs far ahead alone and predicts its own death under the
/// turret. Player 2's shots, once relayed, destroy the turret first, so the
/// death is rewound away and never reported
#[test]
fn predicted_death_is_not_final() {
    init_logger();

    let fire_at_turret = PlayerInput {
        attack: Some(Attack {
            target: Vec2::new(2.5, 1.5),
            firing: true,
        }),
        ..Default::default()
    };
    let config = ClientConfig {
        max_prediction_frames: 2000,
        ..Default::default()
    };
    let mut harness = Harness::start_with(
        TURRET_ALLEY,
        config,
        vec![
            Box::new(IdleInput),
            ScriptedInput::new().hold(0..1000, fire_at_turret).boxed(),
        ],
    );
    assert_eq!(harness.clients[0].game_state(), GameState::Running);

    for _ in 0..900 {
        harness.step_client(0);
    }
    assert_eq!(harness.clients[0].local_frame(), 900);
    assert!(harness.client_state(0).get_player_id(1).is_none());
    assert_eq!(harness.clients[0].game_state(), GameState::Running);

    for _ in 0..900 {
        harness.step_client(1);
        harness.step_server();
    }
    harness.sync_client(0);

    assert_eq!(harness.server.simulation_frame(), 900);
    assert_eq!(harness.server.game_state(), GameState::LevelComplete);
    assert!(harness.clients[0].rewinds() >= 1);
    assert_eq!(harness.clients[0].checkpoint_frame(), 900);
    assert!(harness.client_state(0).get_player_id(1).is_some());
    assert!(harness.client_matches_server(0));
    assert_eq!(harness.clients[0].game_state(), GameState::LevelComplete);
}
