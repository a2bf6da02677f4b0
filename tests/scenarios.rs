use glam::IVec2;
use proptest::prelude::*;

use roll_block::sim::{
    Command, GameEvent, GameState, LossCause, Outcome, Posture, Tile, TileKind, TickInput, tick,
};
use roll_block::{Level, Settings};

fn level(json: &str) -> GameState {
    GameState::new(Level::from_json(json).unwrap(), Settings::default())
}

/// Send the same command on every tick until the session ends
fn hold(state: &mut GameState, command: Command, max_ticks: u32) -> Outcome {
    let mut outcome = Outcome::Continue;
    for _ in 0..max_ticks {
        outcome = tick(state, &TickInput::command(command));
        if outcome.is_terminal() {
            break;
        }
    }
    outcome
}

#[test]
fn holding_right_reaches_goal() {
    let mut state = level(
        r#"{
            "goal": [2.0, 0.0],
            "start": { "x": 0.0, "z": 0.0 },
            "tiles": [
                { "x": 0.0, "z": 0.0, "kind": "solid" },
                { "x": 0.5, "z": 0.0, "kind": "solid" },
                { "x": 1.0, "z": 0.0, "kind": "solid" },
                { "x": 1.5, "z": 0.0, "kind": "solid" },
                { "x": 2.0, "z": 0.0, "kind": "solid" }
            ]
        }"#,
    );

    assert_eq!(hold(&mut state, Command::Right, 100), Outcome::Win);
    assert_eq!(state.block.ground_point(), IVec2::new(2000, 0));
    assert_eq!(state.block.posture(), Posture::Standing);
    assert_eq!(state.moves, 4);
    assert_eq!(state.time_ticks, 40);
}

#[test]
fn rolling_off_the_edge_loses() {
    let mut state = level(
        r#"{
            "goal": [5.0, 5.0],
            "start": { "x": 0.0, "z": 0.0 },
            "tiles": [
                { "x": 0.0, "z": 0.0, "kind": "solid" },
                { "x": 0.5, "z": 0.0, "kind": "solid" }
            ]
        }"#,
    );

    let mut outcome = tick(&mut state, &TickInput::command(Command::Left));
    let mut ticks = 1;
    while !outcome.is_terminal() {
        assert!(state.roll.is_rolling(), "lost only once the roll lands");
        outcome = tick(&mut state, &TickInput::default());
        ticks += 1;
    }
    assert_eq!(outcome, Outcome::Loss(LossCause::Unsupported));
    assert_eq!(ticks, 10);
}

#[test]
fn fragile_tile_loses_despite_solid_support() {
    let mut state = level(
        r#"{
            "goal": [5.0, 5.0],
            "start": { "x": 0.0, "z": 0.0 },
            "tiles": [
                { "x": 0.0, "z": 0.0, "kind": "solid" },
                { "x": 0.5, "z": 0.0, "kind": "solid" },
                { "x": 1.0, "z": 0.0, "kind": "fragile" }
            ]
        }"#,
    );

    assert_eq!(
        hold(&mut state, Command::Right, 20),
        Outcome::Loss(LossCause::FragileTile)
    );
    // Caught on the way from 0.5 to 1.0, while still over solid ground
    assert!(state.roll.is_rolling());
    assert_eq!(state.block.ground_point(), IVec2::new(750, 0));
}

#[test]
fn fragile_tile_between_cells_breaks_mid_roll() {
    let mut state = level(
        r#"{
            "goal": [5.0, 5.0],
            "start": { "x": 0.75, "z": 0.0, "posture": "lying_x" },
            "tiles": [
                { "x": 0.5, "z": 0.0, "kind": "solid" },
                { "x": 1.0, "z": 0.0, "kind": "solid" },
                { "x": 1.1, "z": 0.0, "kind": "fragile" }
            ]
        }"#,
    );

    assert_eq!(
        tick(&mut state, &TickInput::command(Command::Right)),
        Outcome::Continue
    );
    assert_eq!(
        tick(&mut state, &TickInput::default()),
        Outcome::Loss(LossCause::FragileTile)
    );
    assert_eq!(state.block.ground_point(), IVec2::new(850, 0));
    assert_eq!(
        state.drain_events(),
        vec![
            GameEvent::RollStarted(Command::Right),
            GameEvent::Lost(LossCause::FragileTile),
        ]
    );
}

#[test]
fn switch_between_cells_fires_mid_roll() {
    let mut state = level(
        r#"{
            "goal": [5.0, 5.0],
            "start": { "x": 0.0, "z": 0.0, "posture": "lying_z" },
            "tiles": [
                { "x": 0.0, "z": 0.0, "kind": "solid" },
                { "x": 0.375, "z": 0.0, "kind": "switch", "name": "s" },
                { "x": 0.75, "z": 0.0, "kind": "solid" },
                { "x": 3.0, "z": 0.0, "kind": "bridge", "switch": "s" }
            ]
        }"#,
    );
    let (switch, bridge) = state
        .registry
        .iter()
        .find_map(|(id, t)| match t.kind {
            TileKind::Switch { bridge } => Some((id, bridge)),
            _ => None,
        })
        .unwrap();

    tick(&mut state, &TickInput::command(Command::Right));
    assert!(!state.registry.get(bridge).unwrap().active);

    tick(&mut state, &TickInput::default());
    assert!(state.roll.is_rolling());
    assert!(state.registry.get(bridge).unwrap().active);
    assert_eq!(
        state.drain_events(),
        vec![
            GameEvent::RollStarted(Command::Right),
            GameEvent::BridgeActivated { switch, bridge },
        ]
    );

    // Lands clear of the switch; the bridge stays up and the switch sank once
    assert_eq!(hold(&mut state, Command::Right, 8), Outcome::Continue);
    assert!(!state.roll.is_rolling());
    assert_eq!(state.block.ground_point(), IVec2::new(750, 0));
    assert!(state.registry.get(bridge).unwrap().active);
    assert_eq!(state.registry.get(switch).unwrap().y_offset, -100);
}

#[test]
fn switch_keeps_bridge_raised() {
    let mut state = level(
        r#"{
            "goal": [5.0, 5.0],
            "start": { "x": 0.0, "z": 0.0 },
            "tiles": [
                { "x": 0.0, "z": 0.0, "kind": "solid" },
                { "x": 0.5, "z": 0.0, "kind": "switch", "name": "s" },
                { "x": 1.0, "z": 0.0, "kind": "solid" },
                { "x": 0.5, "z": -0.5, "kind": "solid" },
                { "x": 0.5, "z": -1.0, "kind": "solid" },
                { "x": 0.0, "z": 2.0, "kind": "bridge", "switch": "s" }
            ]
        }"#,
    );
    let bridge = state
        .registry
        .iter()
        .find(|(_, t)| matches!(t.kind, TileKind::Bridge { .. }))
        .map(|(id, _)| id)
        .unwrap();
    assert!(!state.registry.get(bridge).unwrap().active);

    // Land lying on the switch
    assert_eq!(hold(&mut state, Command::Right, 10), Outcome::Continue);
    assert!(!state.roll.is_rolling());
    assert_eq!(state.block.ground_point(), IVec2::new(500, 0));
    assert!(state.registry.get(bridge).unwrap().active);

    // Roll away from the switch
    assert_eq!(hold(&mut state, Command::Forward, 10), Outcome::Continue);
    assert_eq!(state.block.ground_point(), IVec2::new(500, -750));
    assert!(state.registry.get(bridge).unwrap().active);
}

#[test]
fn goal_wins_without_support() {
    let mut state = level(
        r#"{
            "goal": [0.0, 0.5],
            "start": { "x": 0.0, "z": 0.0 },
            "tiles": [
                { "x": 0.0, "z": 0.0, "kind": "solid" }
            ]
        }"#,
    );

    assert_eq!(hold(&mut state, Command::Backward, 20), Outcome::Win);
    assert_eq!(state.block.ground_point(), IVec2::new(0, 500));
}

#[test]
fn restart_recreates_block_and_bridges() {
    let mut state = GameState::new(Level::demo().unwrap(), Settings::default());
    hold(&mut state, Command::Forward, 10);
    let outcome = tick(
        &mut state,
        &TickInput {
            command: None,
            restart: true,
        },
    );
    assert_eq!(outcome, Outcome::Continue);
    assert_eq!(state.block.ground_point(), IVec2::ZERO);
    assert!(
        state
            .registry
            .iter()
            .filter(|(_, t)| matches!(t.kind, TileKind::Bridge { .. }))
            .all(|(_, t)| !t.active)
    );
}

proptest! {
    #[test]
    fn proximity_is_symmetric_and_strict(
        ax in -5000i32..5000,
        az in -5000i32..5000,
        bx in -5000i32..5000,
        bz in -5000i32..5000,
    ) {
        let a = Tile::new(IVec2::new(ax, az), TileKind::Solid);
        let b = Tile::new(IVec2::new(bx, bz), TileKind::Solid);
        let tol = Settings::default().tolerance_milli();

        prop_assert_eq!(a.is_near(b.position, tol), b.is_near(a.position, tol));
        let expected = (ax - bx).abs() < 260 && (az - bz).abs() < 260;
        prop_assert_eq!(a.is_near(b.position, tol), expected);
    }
}
