//! Dead-zone scrolling camera
//!
//! The camera only moves when the player crosses the outer thirteenths of
//! the viewport, and its offset is clamped to the level, so the view never
//! shows space beyond either end of the world.

use crate::consts::*;

use super::state::GameState;

/// Viewport-relative x past which the camera scrolls right
#[inline]
pub fn right_scroll_edge() -> f32 {
    VIEWPORT_WIDTH * 12.0 / 13.0
}

/// Viewport-relative x below which the camera scrolls left
#[inline]
pub fn left_scroll_edge() -> f32 {
    VIEWPORT_WIDTH * 1.0 / 13.0
}

/// Update the camera offset from the player position, then hold the player
/// inside the viewport while the camera is pinned at either end
pub fn update_camera(state: &mut GameState) {
    let right_edge = right_scroll_edge();
    let left_edge = left_scroll_edge();
    let max_offset = (state.level_length - VIEWPORT_WIDTH).max(0.0);

    let screen_x = state.player.pos.x - state.camera_offset;

    if screen_x > right_edge {
        state.camera_offset = (state.player.pos.x - right_edge).min(max_offset);
        // Scrolling right never pushes the player leftward
        state.player.vel.x = state.player.vel.x.max(0.0);
    }

    let screen_x = state.player.pos.x - state.camera_offset;
    if screen_x < left_edge {
        state.camera_offset = (state.player.pos.x - left_edge).max(0.0);
        state.player.vel.x = state.player.vel.x.min(0.0);
    }

    // While pinned at an end of the level the dead zone no longer applies;
    // clamp the player to the visible region instead
    if state.camera_offset <= 0.0 {
        state.player.pos.x = state.player.pos.x.max(left_edge);
    } else if state.camera_offset >= max_offset {
        state.player.pos.x = state.player.pos.x.min(max_offset + right_edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_stays_put_inside_dead_zone() {
        let mut state = GameState::new(1);
        state.player.pos.x = 600.0;
        state.camera_offset = 0.0;
        update_camera(&mut state);
        assert_eq!(state.camera_offset, 0.0);
    }

    #[test]
    fn test_camera_follows_right() {
        let mut state = GameState::new(1);
        state.camera_offset = 0.0;
        state.player.pos.x = right_scroll_edge() + 50.0;
        update_camera(&mut state);
        assert_eq!(state.camera_offset, 50.0);
    }

    #[test]
    fn test_camera_clamps_at_level_end() {
        let mut state = GameState::new(1);
        let max_offset = state.level_length - VIEWPORT_WIDTH;
        state.camera_offset = max_offset - 1.0;
        state.player.pos.x = state.level_length - 10.0;
        update_camera(&mut state);
        assert_eq!(state.camera_offset, max_offset);
    }

    #[test]
    fn test_camera_never_negative() {
        let mut state = GameState::new(1);
        state.camera_offset = 30.0;
        state.player.pos.x = 0.0;
        update_camera(&mut state);
        assert_eq!(state.camera_offset, 0.0);
        // Player held inside the viewport at the pinned end
        assert_eq!(state.player.pos.x, left_scroll_edge());
    }
}
