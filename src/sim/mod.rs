//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Bounded timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or storage dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod geometry;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::decide_jump;
pub use collision::{CollisionResult, compute_score, resolve};
pub use entity::{
    Entity, EntityKind, KindSpec, PLAYER_SPEC, player_hitbox_rect, player_sprite_rect,
    player_sprite_size,
};
pub use geometry::{Rect, centered_hitbox};
pub use physics::{JumpStrength, Player, animation_frame, speed_at};
pub use spawner::Spawner;
pub use state::{GameEvent, RunPhase, RunState, Simulation, Viewport};
pub use tick::tick;
