//! Per-tick integration
//!
//! Speed ramp, player gravity and landing, world scroll and pruning.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::tuning::Tuning;

/// Jump strength requested by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpStrength {
    /// Tap
    Normal,
    /// Upward swipe
    High,
}

impl JumpStrength {
    pub fn from_strong(strong: bool) -> Self {
        if strong {
            JumpStrength::High
        } else {
            JumpStrength::Normal
        }
    }
}

/// The player's vertical state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Player {
    /// Height above the ground baseline, never negative
    pub offset: f32,
    /// Signed vertical velocity (positive = up)
    pub velocity: f32,
}

impl Player {
    pub fn is_grounded(&self, ground_epsilon: f32) -> bool {
        self.offset <= ground_epsilon && self.velocity <= 0.0
    }

    /// Apply an instant launch velocity. No double jumps: returns false
    /// and leaves the player untouched while airborne.
    pub fn jump(&mut self, strength: JumpStrength, tuning: &Tuning) -> bool {
        if !self.is_grounded(tuning.ground_epsilon) {
            return false;
        }
        self.velocity = match strength {
            JumpStrength::Normal => tuning.jump_force,
            JumpStrength::High => tuning.high_jump_force,
        };
        true
    }

    /// Semi-implicit Euler step followed by the ground clamp
    pub fn integrate(&mut self, dt: f32, tuning: &Tuning) {
        self.velocity += tuning.gravity * dt;
        self.offset += self.velocity * dt;
        if self.offset <= tuning.ground_epsilon.max(0.0) {
            self.offset = 0.0;
            self.velocity = 0.0;
        }
    }
}

/// Scroll speed after `elapsed` run time
pub fn speed_at(elapsed: Duration, tuning: &Tuning) -> f32 {
    let ramped = tuning.base_speed + elapsed.as_secs_f32() * tuning.speed_growth_rate;
    ramped.clamp(tuning.base_speed, tuning.max_speed)
}

/// Move entities left by `distance` and drop the ones fully off-screen
pub fn scroll_and_prune(entities: &mut Vec<Entity>, distance: f32) {
    for entity in entities.iter_mut() {
        entity.x -= distance;
    }
    entities.retain(|e| !e.is_offscreen());
}

/// Sprite frame index; presentation only
pub fn animation_frame(anim_timer: f32, frame_rate: f32, frame_count: u32) -> u32 {
    if frame_count == 0 || !anim_timer.is_finite() || anim_timer <= 0.0 {
        return 0;
    }
    let frames = (anim_timer * frame_rate).floor() as u64;
    (frames % u64::from(frame_count)) as u32
}
