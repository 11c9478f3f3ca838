/// PROPERTY-BASED TESTS: rollback and replay invariants
///
/// Uses proptest to drive the full pipeline with random input.
///
/// Key invariants:
/// 1. Rolling back restores the committed world exactly
/// 2. Replaying the same input after a rollback reproduces the same world
/// 3. The simulation phase never changes the outcome

use proptest::prelude::*;
use recoil_shared::{
    constants::{QUADTREE_MAX_ITEMS, SIMULATION_PERIOD_S},
    init_map,
    messages::{sort_canonical, Attack},
    simulate, ClientMessage, Direction, Frame, FrameState, LevelMap, PlayerInput,
    SimulationPhase, StateDb, Vec2,
};
use recoil_test::levels::{FORTRESS, OPEN_FIELD};

fn load(layout: &str) -> StateDb {
    let map = LevelMap::from_ascii(layout).unwrap();
    let mut db = StateDb::new(map.world_bounds(), QUADTREE_MAX_ITEMS);
    init_map(&mut db, &map).unwrap();
    db
}

fn run(db: &mut StateDb, script: &[Vec<ClientMessage>], first: Frame, phase: SimulationPhase) {
    for (offset, batch) in script.iter().enumerate() {
        let frame = first + offset as Frame;
        let mut frame_state = FrameState::new(db, batch, frame, phase, SIMULATION_PERIOD_S);
        simulate(&mut frame_state).unwrap();
    }
}

// One frame of input for player 1 and 2: movement (8 = none), fire, swap weapon
fn frame_input_strategy() -> impl Strategy<Value = Vec<(u8, usize, bool, bool)>> {
    prop::collection::vec((1u8..=2u8, 0usize..9usize, any::<bool>(), any::<bool>()), 0..3)
}

fn to_batch(frame: Frame, inputs: Vec<(u8, usize, bool, bool)>) -> Vec<ClientMessage> {
    let mut batch: Vec<ClientMessage> = inputs
        .into_iter()
        .map(|(player_number, direction, firing, change_weapon)| {
            let input = PlayerInput {
                movement: Direction::ALL.get(direction).copied(),
                attack: firing.then(|| Attack {
                    target: Vec2::new(6.0, 1.5),
                    firing: true,
                }),
                change_weapon,
                build: None,
            };
            ClientMessage::input(frame, player_number, input)
        })
        .collect();
    sort_canonical(&mut batch);
    batch
}

fn script_strategy(frames: usize) -> impl Strategy<Value = Vec<Vec<ClientMessage>>> {
    prop::collection::vec(frame_input_strategy(), 1..frames).prop_map(|frames| {
        frames
            .into_iter()
            .enumerate()
            .map(|(frame, inputs)| to_batch(frame as Frame, inputs))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any run of predicted frames is undone completely by a rollback
    #[test]
    fn prop_rollback_restores_committed_world(script in script_strategy(60)) {
        let mut db = load(OPEN_FIELD);
        run(&mut db, &script, 0, SimulationPhase::ClientPrediction);
        db.rollback_prediction();

        let pristine = load(OPEN_FIELD);
        prop_assert_eq!(db.tables(), pristine.tables());
        prop_assert_eq!(db.entity_count(), pristine.entity_count());
    }

    /// Rolling back and replaying with the same input ends where a single
    /// uninterrupted authoritative run ends
    #[test]
    fn prop_replay_matches_uninterrupted_run(
        prefix in script_strategy(30),
        suffix in script_strategy(30),
    ) {
        let first_suffix_frame = prefix.len() as Frame;
        let suffix: Vec<Vec<ClientMessage>> = suffix
            .into_iter()
            .enumerate()
            .map(|(offset, batch)| {
                batch
                    .into_iter()
                    .map(|mut message| {
                        message.frame = first_suffix_frame + offset as Frame;
                        message
                    })
                    .collect()
            })
            .collect();

        let mut authority = load(FORTRESS);
        run(&mut authority, &prefix, 0, SimulationPhase::ServerTick);
        authority.commit_prediction();
        run(&mut authority, &suffix, first_suffix_frame, SimulationPhase::ServerTick);

        let mut predictor = load(FORTRESS);
        run(&mut predictor, &prefix, 0, SimulationPhase::ClientAuthoritative);
        predictor.commit_prediction();
        // mispredict the suffix with no input at all, then correct it
        let idle: Vec<Vec<ClientMessage>> = vec![Vec::new(); suffix.len()];
        run(&mut predictor, &idle, first_suffix_frame, SimulationPhase::ClientPrediction);
        predictor.rollback_prediction();
        run(&mut predictor, &suffix, first_suffix_frame, SimulationPhase::ClientReprediction);

        prop_assert_eq!(predictor.tables(), authority.tables());
        prop_assert_eq!(predictor.entity_count(), authority.entity_count());
    }
}

/// Entity ids handed out after a rollback repeat the ones the rolled back
/// frames used, so replayed bullets keep their identity
#[test]
fn replayed_spawns_reuse_entity_ids() {
    let fire = |frame: Frame| {
        vec![ClientMessage::input(
            frame,
            1,
            PlayerInput {
                attack: Some(Attack {
                    target: Vec2::new(1.5, 0.0),
                    firing: true,
                }),
                ..Default::default()
            },
        )]
    };

    let mut db = load(OPEN_FIELD);
    let before = db.entity_count();
    run(&mut db, &[fire(0)], 0, SimulationPhase::ClientPrediction);
    let spawned = db.tables().bullets().ids();
    assert_eq!(db.entity_count(), before + 1);

    db.rollback_prediction();
    assert_eq!(db.entity_count(), before);
    run(&mut db, &[fire(0)], 0, SimulationPhase::ClientReprediction);
    assert_eq!(db.tables().bullets().ids(), spawned);
}
