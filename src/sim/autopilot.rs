//! Idle/demo mode - a bot that plays the game
//!
//! Works only from the published snapshot, exactly like a UI would.

use super::entity::player_hitbox_rect;
use super::physics::JumpStrength;
use super::state::{RunPhase, RunState};

/// Height above which an obstacle needs the strong jump
const TALL_OBSTACLE_HEIGHT: f32 = 60.0;

/// Seconds of look-ahead before an obstacle reaches the player
const REACTION_TIME: f32 = 0.22;

/// Decide whether to jump this frame
pub fn decide_jump(state: &RunState) -> Option<JumpStrength> {
    if state.phase != RunPhase::Running || state.hit || state.player_offset > 0.0 {
        return None;
    }

    let player = player_hitbox_rect(0.0);
    let reach = player.max.x + state.speed * REACTION_TIME;

    // Nearest obstacle whose collider has not yet passed the player
    let hitbox = state
        .obstacles
        .iter()
        .map(|o| o.hitbox_rect())
        .filter(|hitbox| hitbox.max.x > player.min.x)
        .min_by(|a, b| a.min.x.total_cmp(&b.min.x))?;

    if hitbox.min.x > reach {
        return None;
    }

    if hitbox.max.y > TALL_OBSTACLE_HEIGHT {
        Some(JumpStrength::High)
    } else {
        Some(JumpStrength::Normal)
    }
}
