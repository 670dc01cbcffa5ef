//! Property-based invariant checks over arbitrary input scripts

use proptest::prelude::*;

use skyward::consts::*;
use skyward::sim::{
    Circle, GamePhase, GameState, Rect, TickInput, circle_rect_intersect, rects_intersect, tick,
};

fn input_from_bits(bits: u8) -> TickInput {
    TickInput {
        left: bits & 0x01 != 0,
        right: bits & 0x02 != 0,
        crouch: bits & 0x04 != 0,
        jump: bits & 0x08 != 0,
        attack: bits & 0x10 != 0,
        interact: bits & 0x20 != 0,
        ..TickInput::default()
    }
}

fn playing_state(seed: u64) -> GameState {
    let mut state = GameState::new(seed);
    let start = TickInput {
        start: true,
        ..TickInput::default()
    };
    tick(&mut state, &start);
    tick(&mut state, &start);
    state
}

proptest! {
    #[test]
    fn player_stays_within_world_bounds(
        seed in any::<u64>(),
        script in prop::collection::vec(any::<u8>(), 1..300),
    ) {
        let mut state = playing_state(seed);
        for bits in script {
            tick(&mut state, &input_from_bits(bits));
            if state.phase != GamePhase::Playing {
                break;
            }
            let p = &state.player;
            prop_assert!(p.pos.x >= 0.0);
            prop_assert!(p.pos.x + p.width <= state.level_length);
            // The ceiling sits far above y = 0 so that high platforms
            // stay reachable. The ground is the hard floor.
            prop_assert!(p.pos.y >= WORLD_TOP);
            prop_assert!(p.pos.y + p.height <= GROUND_Y + 0.001);
        }
    }

    #[test]
    fn camera_offset_stays_in_scroll_range(
        seed in any::<u64>(),
        script in prop::collection::vec(any::<u8>(), 1..300),
    ) {
        let mut state = playing_state(seed);
        for bits in script {
            tick(&mut state, &input_from_bits(bits));
            prop_assert!(state.camera_offset >= 0.0);
            prop_assert!(state.camera_offset <= state.level_length - VIEWPORT_WIDTH);
        }
    }

    #[test]
    fn health_and_armor_stay_clamped(
        seed in any::<u64>(),
        script in prop::collection::vec(any::<u8>(), 1..300),
    ) {
        let mut state = playing_state(seed);
        for bits in script {
            tick(&mut state, &input_from_bits(bits));
            let p = &state.player;
            prop_assert!(p.health >= 0.0 && p.health <= p.max_health);
            prop_assert!(p.armor >= 0.0 && p.armor <= MAX_ARMOR);
        }
    }

    #[test]
    fn rect_intersection_is_symmetric(
        ax in -500.0f32..500.0, ay in -500.0f32..500.0,
        aw in 1.0f32..200.0, ah in 1.0f32..200.0,
        bx in -500.0f32..500.0, by in -500.0f32..500.0,
        bw in 1.0f32..200.0, bh in 1.0f32..200.0,
    ) {
        let a = Rect::new(ax, ay, aw, ah);
        let b = Rect::new(bx, by, bw, bh);
        prop_assert_eq!(rects_intersect(&a, &b), rects_intersect(&b, &a));
    }

    #[test]
    fn circle_centered_in_rect_always_hits(
        x in -500.0f32..500.0, y in -500.0f32..500.0,
        w in 1.0f32..200.0, h in 1.0f32..200.0,
        r in 0.1f32..100.0,
    ) {
        let rect = Rect::new(x, y, w, h);
        let circle = Circle {
            center: rect.center(),
            radius: r,
        };
        prop_assert!(circle_rect_intersect(&circle, &rect));
    }
}
