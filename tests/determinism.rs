//! Whole-simulation determinism and pause-safety checks

use skyward::sim::{GamePhase, GameState, TickInput, tick};

fn start(state: &mut GameState) {
    let input = TickInput {
        start: true,
        ..TickInput::default()
    };
    tick(state, &input);
    tick(state, &input);
    assert_eq!(state.phase, GamePhase::Playing);
}

/// A fixed but varied input script derived from the tick index
fn scripted_input(t: u64) -> TickInput {
    TickInput {
        right: t % 7 != 0,
        left: t % 23 == 0,
        jump: t % 31 == 0,
        crouch: t % 53 == 0,
        attack: t % 61 == 0,
        interact: t % 19 == 0,
        ..TickInput::default()
    }
}

fn snapshot(state: &mut GameState) -> String {
    state.normalize_order();
    serde_json::to_string(state).unwrap()
}

#[test]
fn same_seed_same_script_is_bit_identical() {
    let mut a = GameState::new(0xDEADBEEF);
    let mut b = GameState::new(0xDEADBEEF);
    start(&mut a);
    start(&mut b);

    for t in 0..3_000 {
        let input = scripted_input(t);
        tick(&mut a, &input);
        tick(&mut b, &input);
    }

    assert_eq!(snapshot(&mut a), snapshot(&mut b));
}

#[test]
fn different_seeds_diverge_on_chest_loot() {
    // Seeds only feed chest spawning and loot rolls, so force a chest open
    let mut a = GameState::new(1);
    let mut b = GameState::new(2);
    start(&mut a);
    start(&mut b);

    for state in [&mut a, &mut b] {
        let chest_pos = state.chests[0].pos;
        state.player.pos = chest_pos;
        let open = TickInput {
            interact: true,
            ..TickInput::default()
        };
        tick(state, &open);
        assert!(state.chests[0].opened);
        assert!(!state.loot.is_empty());
    }

    // Same positions, different rolls (overwhelmingly likely over a full ring)
    let a_kinds: Vec<_> = a.loot.iter().map(|l| l.kind).collect();
    let b_kinds: Vec<_> = b.loot.iter().map(|l| l.kind).collect();
    assert!(a_kinds != b_kinds || a.loot.len() != b.loot.len());
}

#[test]
fn pause_stretch_does_not_perturb_the_run() {
    let mut plain = GameState::new(0xABCD);
    let mut paused = GameState::new(0xABCD);
    start(&mut plain);
    start(&mut paused);

    for t in 0..600 {
        tick(&mut plain, &scripted_input(t));
        tick(&mut paused, &scripted_input(t));
    }

    // Insert a long pause stretch in one run only
    let toggle = TickInput {
        pause: true,
        ..TickInput::default()
    };
    tick(&mut paused, &toggle);
    assert_eq!(paused.phase, GamePhase::Paused);
    for _ in 0..500 {
        tick(&mut paused, &TickInput::default());
    }
    tick(&mut paused, &toggle);
    assert_eq!(paused.phase, GamePhase::Playing);

    for t in 600..1_200 {
        tick(&mut plain, &scripted_input(t));
        tick(&mut paused, &scripted_input(t));
    }

    assert_eq!(snapshot(&mut plain), snapshot(&mut paused));
}

#[test]
fn serialize_roundtrip_preserves_the_run() {
    let mut source = GameState::new(77);
    start(&mut source);
    for t in 0..500 {
        tick(&mut source, &scripted_input(t));
    }

    let json = snapshot(&mut source);
    let mut restored: GameState = serde_json::from_str(&json).unwrap();

    for t in 500..1_000 {
        tick(&mut source, &scripted_input(t));
        tick(&mut restored, &scripted_input(t));
    }
    assert_eq!(snapshot(&mut source), snapshot(&mut restored));
}
