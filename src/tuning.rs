//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-tuned from JSON
//! without touching the simulation. `Tuning::default()` is the shipped set.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Gameplay constants for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Vertical acceleration (units/s², negative pulls toward the ground)
    pub gravity: f32,
    /// Launch velocity of a tap jump (units/s)
    pub jump_force: f32,
    /// Launch velocity of a swipe jump (units/s)
    pub high_jump_force: f32,
    /// Offsets at or below this count as grounded
    pub ground_epsilon: f32,
    /// Largest delta-time a single tick will integrate (ms)
    pub max_step_ms: u64,

    // === Speed ramp ===
    pub base_speed: f32,
    pub max_speed: f32,
    /// Speed gained per second of run time
    pub speed_growth_rate: f32,

    // === Scoring ===
    /// Points awarded per second survived
    pub time_score_rate: u32,
    /// Points per pickup collected
    pub pickup_score_value: u32,

    // === Obstacle pacing ===
    pub obstacle_base_interval: f32,
    pub obstacle_min_interval: f32,
    /// Speed is divided by this before shortening the base interval
    pub obstacle_speed_divisor: f32,
    pub obstacle_interval_variance: f32,
    /// Probability that a spawned obstacle is the tall kind
    pub tall_obstacle_weight: f64,
    /// Gap between the viewport's right edge and a fresh spawn
    pub spawn_margin: f32,
    /// Countdown before the first obstacle of a run (seconds)
    pub first_obstacle_delay: f32,

    // === Pickup pacing ===
    pub pickup_interval_floor: f32,
    pub pickup_interval_variance: f32,
    /// Horizontal clearance kept behind the rightmost placed entity
    pub pickup_min_spacing: f32,
    /// Probability a pickup sits on the ground instead of in the air
    pub pickup_ground_chance: f64,
    /// Highest airborne pickup, as a fraction of viewport height
    pub pickup_air_room_fraction: f32,
    /// Countdown before the first pickup of a run (seconds)
    pub first_pickup_delay: f32,

    // === Run flow ===
    /// Delay between a fatal hit and the run ending (ms)
    pub grace_delay_ms: u64,
    /// Restart into Ready (intro overlay) instead of straight into Running
    pub show_intro: bool,

    // === Presentation ===
    pub anim_frame_rate: f32,
    pub anim_frame_count: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: -2600.0,
            jump_force: 1050.0,
            high_jump_force: 1350.0,
            ground_epsilon: 0.5,
            max_step_ms: 32,

            base_speed: 320.0,
            max_speed: 720.0,
            speed_growth_rate: 12.0,

            time_score_rate: 10,
            pickup_score_value: 25,

            obstacle_base_interval: 1.6,
            obstacle_min_interval: 0.75,
            obstacle_speed_divisor: 600.0,
            obstacle_interval_variance: 0.6,
            tall_obstacle_weight: 0.45,
            spawn_margin: 40.0,
            first_obstacle_delay: 1.0,

            pickup_interval_floor: 1.4,
            pickup_interval_variance: 1.2,
            pickup_min_spacing: 120.0,
            pickup_ground_chance: 0.7,
            pickup_air_room_fraction: 0.25,
            first_pickup_delay: 2.0,

            grace_delay_ms: 250,
            show_intro: false,

            anim_frame_rate: 10.0,
            anim_frame_count: 4,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning file; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    pub fn max_step(&self) -> Duration {
        Duration::from_millis(self.max_step_ms.max(1))
    }

    pub fn grace_delay(&self) -> Duration {
        Duration::from_millis(self.grace_delay_ms)
    }

    /// Repair values that would break simulation invariants
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();
        if !(self.gravity.is_finite() && self.gravity < 0.0) {
            log::warn!("gravity must be negative, using {}", defaults.gravity);
            self.gravity = defaults.gravity;
        }
        if !(self.ground_epsilon.is_finite() && self.ground_epsilon >= 0.0) {
            log::warn!("ground_epsilon must be >= 0, using {}", defaults.ground_epsilon);
            self.ground_epsilon = defaults.ground_epsilon;
        }
        if !(self.jump_force.is_finite() && self.jump_force > 0.0) {
            self.jump_force = defaults.jump_force;
        }
        if !(self.high_jump_force.is_finite() && self.high_jump_force > 0.0) {
            self.high_jump_force = defaults.high_jump_force;
        }
        if !(self.spawn_margin.is_finite() && self.spawn_margin >= 0.0) {
            self.spawn_margin = defaults.spawn_margin;
        }
        if !(self.pickup_min_spacing.is_finite() && self.pickup_min_spacing >= 0.0) {
            self.pickup_min_spacing = defaults.pickup_min_spacing;
        }
        if !(self.base_speed.is_finite() && self.base_speed >= 0.0) {
            self.base_speed = defaults.base_speed;
        }
        if !(self.max_speed.is_finite() && self.max_speed >= self.base_speed) {
            log::warn!("max_speed below base_speed, clamping to {}", self.base_speed);
            self.max_speed = self.base_speed;
        }
        if !(self.speed_growth_rate.is_finite() && self.speed_growth_rate >= 0.0) {
            self.speed_growth_rate = 0.0;
        }
        if !(self.obstacle_speed_divisor.is_finite() && self.obstacle_speed_divisor > 0.0) {
            self.obstacle_speed_divisor = defaults.obstacle_speed_divisor;
        }
        self.obstacle_min_interval = self.obstacle_min_interval.max(0.05);
        self.pickup_interval_floor = self.pickup_interval_floor.max(0.05);
        self.obstacle_interval_variance = self.obstacle_interval_variance.max(0.0);
        self.pickup_interval_variance = self.pickup_interval_variance.max(0.0);
        self.tall_obstacle_weight = self.tall_obstacle_weight.clamp(0.0, 1.0);
        self.pickup_ground_chance = self.pickup_ground_chance.clamp(0.0, 1.0);
        self.pickup_air_room_fraction = self.pickup_air_room_fraction.clamp(0.0, 1.0);
        self.anim_frame_count = self.anim_frame_count.max(1);
        self
    }
}
