//! Fixed-timestep simulation driver and game phase machine
//!
//! `tick` advances the whole game by one 60 Hz step. The tick counter only
//! moves while Playing, so every timer in the game (cooldowns, effects,
//! invulnerability) is automatically pause-safe.

use serde::{Deserialize, Serialize};

use crate::audio::SoundCue;
use crate::consts::*;
use crate::ticks_from_ms;

use super::state::{GamePhase, GameState, Player};
use super::{camera, combat, level, loot, physics};

/// Player input sampled for one tick.
///
/// Held keys (`left`, `right`, `crouch`) are level-triggered; the rest are
/// edge-triggered and must only be set on the tick the key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub crouch: bool,
    pub jump: bool,
    pub attack: bool,
    pub interact: bool,
    pub pause: bool,
    pub restart: bool,
    pub start: bool,
}

/// Advance the simulation by one fixed step
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Cues accumulate for exactly one tick; the host drains after each call
    state.sound_queue.clear();

    match state.phase {
        GamePhase::MainMenu => {
            if input.start {
                state.phase = GamePhase::StoryIntro;
            }
        }
        GamePhase::StoryIntro => {
            if input.start {
                state.phase = GamePhase::Playing;
            }
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
            }
        }
        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                return;
            }
            step_playing(state, input);
        }
        GamePhase::GameOver => {
            if input.restart {
                restart_from_checkpoint(state);
            }
        }
        GamePhase::LevelComplete => {
            if input.restart {
                let index = state.level_index;
                level::load_level(state, index);
                state.phase = GamePhase::Playing;
            } else if state.advance_at_tick.is_some_and(|t| state.time_ticks >= t) {
                advance_level(state);
            } else {
                // Keep the completion delay counting down
                state.time_ticks += 1;
            }
        }
        GamePhase::GameComplete => {
            if input.restart {
                state.rng_state = super::state::RngState::new(state.seed);
                state.player = Player::new(glam::Vec2::new(
                    PLAYER_START_X,
                    GROUND_Y - PLAYER_HEIGHT,
                ));
                state.effects.clear();
                level::load_level(state, 0);
                state.phase = GamePhase::Playing;
            }
        }
    }
}

fn step_playing(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    physics::apply_input(state, input.left, input.right, input.jump, input.crouch);
    physics::update_platforms(state);
    physics::step_player(state);
    camera::update_camera(state);

    activate_checkpoints(state);
    loot::collect_coins(state);

    combat::update_enemies(state);
    combat::enemy_contact(state);
    combat::hazard_contact(state);
    combat::apply_regen(state);

    if input.attack {
        combat::handle_attack(state);
    }
    if input.interact {
        loot::interact_with_chest(state);
    }
    combat::update_projectiles(state);
    combat::remove_dead_enemies(state);

    loot::collect_loot(state);
    loot::update_effects(state);
    loot::update_effect_texts(state);

    check_game_status(state);
}

fn activate_checkpoints(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mut reached = false;
    for cp in &mut state.checkpoints {
        if !cp.activated && super::geom::rects_intersect(&player_rect, &cp.rect()) {
            cp.activated = true;
            reached = true;
        }
    }
    if reached {
        state.add_player_text("Checkpoint!");
    }
}

/// Death and level completion checks, run last each tick
fn check_game_status(state: &mut GameState) {
    let now = state.time_ticks;

    if state.player.pos.y > VIEWPORT_HEIGHT + DEATH_PLANE_MARGIN {
        state.player.health = 0.0;
    }

    if state.player.health <= 0.0 {
        state.phase = GamePhase::GameOver;
        state.queue_sound(SoundCue::Fail);
        log::info!("game over on level {}", state.level_index + 1);
        return;
    }

    let Some(goal) = state.platforms.iter().find(|p| p.is_goal) else {
        return;
    };
    let p = state.player.rect();
    let g = goal.rect;
    let on_goal =
        p.x + p.width > g.x && p.x < g.x + g.width && p.bottom() >= g.y && p.y < g.bottom();
    if !on_goal {
        return;
    }

    if state.coin_count >= state.min_coins_required {
        state.phase = GamePhase::LevelComplete;
        state.queue_sound(SoundCue::LevelComplete);
        state.advance_at_tick = Some(now + ticks_from_ms(LEVEL_ADVANCE_DELAY_MS));
        log::info!(
            "level {} complete with {} coins",
            state.level_index + 1,
            state.coin_count
        );
    } else if state.goal_message_until.is_none_or(|t| now >= t) {
        let missing = state.min_coins_required - state.coin_count;
        state.add_player_text(format!("Collect {missing} more coins!"));
        state.goal_message_until = Some(now + ticks_from_ms(EFFECT_TEXT_MS));
    }
}

fn advance_level(state: &mut GameState) {
    let next = state.level_index + 1;
    if next < level::LEVEL_COUNT {
        level::load_level(state, next);
        state.phase = GamePhase::Playing;
    } else {
        state.phase = GamePhase::GameComplete;
        log::info!("all levels complete");
    }
}

/// Reload the current level but resume from the furthest activated
/// checkpoint, with activation carried across the reload
fn restart_from_checkpoint(state: &mut GameState) {
    let activated: Vec<glam::Vec2> = state
        .checkpoints
        .iter()
        .filter(|c| c.activated)
        .map(|c| c.pos)
        .collect();

    let index = state.level_index;
    level::load_level(state, index);
    state.effects.clear();

    for cp in &mut state.checkpoints {
        if activated.contains(&cp.pos) {
            cp.activated = true;
        }
    }

    state.player = Player::new(state.respawn_point());
    state.phase = GamePhase::Playing;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn start_playing(state: &mut GameState) {
        let start = TickInput {
            start: true,
            ..TickInput::default()
        };
        tick(state, &start);
        tick(state, &start);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_menu_flow() {
        let mut state = GameState::new(3);
        assert_eq!(state.phase, GamePhase::MainMenu);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::MainMenu);
        start_playing(&mut state);
    }

    #[test]
    fn test_pause_freezes_time() {
        let mut state = GameState::new(3);
        start_playing(&mut state);
        tick(&mut state, &TickInput::default());
        let t = state.time_ticks;

        let pause = TickInput {
            pause: true,
            ..TickInput::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.time_ticks, t);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, t + 1);
    }

    #[test]
    fn test_death_plane_triggers_game_over() {
        let mut state = GameState::new(3);
        start_playing(&mut state);
        state.player.pos.y = VIEWPORT_HEIGHT + DEATH_PLANE_MARGIN + 50.0;
        check_game_status(&mut state);
        assert_eq!(state.player.health, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.sound_queue.contains(&SoundCue::Fail));
    }

    #[test]
    fn test_health_depleted_triggers_game_over() {
        let mut state = GameState::new(3);
        start_playing(&mut state);
        state.player.health = 0.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.sound_queue.contains(&SoundCue::Fail));
    }

    fn put_on_goal(state: &mut GameState) {
        let goal = state
            .platforms
            .iter()
            .find(|p| p.is_goal)
            .cloned()
            .unwrap();
        state.player.pos = Vec2::new(goal.rect.x + 10.0, goal.rect.y - state.player.height);
        state.player.vel = Vec2::ZERO;
    }

    #[test]
    fn test_goal_without_coins_shows_message() {
        let mut state = GameState::new(3);
        start_playing(&mut state);
        state.coin_count = 0;
        put_on_goal(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.goal_message_until.is_some());
        assert!(
            state
                .effect_texts
                .iter()
                .any(|t| t.text.contains("more coins"))
        );
    }

    #[test]
    fn test_goal_with_coins_completes_and_advances() {
        let mut state = GameState::new(3);
        start_playing(&mut state);
        state.coin_count = state.min_coins_required;
        put_on_goal(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert!(state.sound_queue.contains(&SoundCue::LevelComplete));

        for _ in 0..=ticks_from_ms(LEVEL_ADVANCE_DELAY_MS) {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.coin_count, 0);
    }

    #[test]
    fn test_final_level_completion_ends_game() {
        let mut state = GameState::new(3);
        start_playing(&mut state);
        level::load_level(&mut state, level::LEVEL_COUNT - 1);
        state.coin_count = state.min_coins_required;
        put_on_goal(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::LevelComplete);

        for _ in 0..=ticks_from_ms(LEVEL_ADVANCE_DELAY_MS) {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::GameComplete);
    }

    #[test]
    fn test_restart_respawns_at_checkpoint() {
        let mut state = GameState::new(3);
        start_playing(&mut state);

        // Walk through the first checkpoint
        let cp_pos = state.checkpoints[0].pos;
        state.player.pos = Vec2::new(cp_pos.x, cp_pos.y);
        tick(&mut state, &TickInput::default());
        assert!(state.checkpoints.iter().any(|c| c.activated));

        state.player.health = 0.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let restart = TickInput {
            restart: true,
            ..TickInput::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.health, MAX_HEALTH);
        assert_eq!(state.player.pos.x, cp_pos.x);
        assert!(state.checkpoints.iter().any(|c| c.activated));
    }

    #[test]
    fn test_restart_without_checkpoint_spawns_at_start() {
        let mut state = GameState::new(3);
        start_playing(&mut state);
        state.player.health = 0.0;
        tick(&mut state, &TickInput::default());

        let restart = TickInput {
            restart: true,
            ..TickInput::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.player.pos.x, PLAYER_START_X);
    }

    #[test]
    fn test_level_restart_key_replays_current_level() {
        let mut state = GameState::new(3);
        start_playing(&mut state);
        state.coin_count = state.min_coins_required;
        put_on_goal(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::LevelComplete);

        let restart = TickInput {
            restart: true,
            ..TickInput::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.coin_count, 0);
    }

    #[test]
    fn test_goal_message_not_spammed() {
        let mut state = GameState::new(3);
        start_playing(&mut state);
        state.coin_count = 0;
        put_on_goal(&mut state);
        tick(&mut state, &TickInput::default());
        put_on_goal(&mut state);
        tick(&mut state, &TickInput::default());
        let count = state
            .effect_texts
            .iter()
            .filter(|t| t.text.contains("more coins"))
            .count();
        assert_eq!(count, 1);
    }
}
