//! Pixel Dash - an endless-runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, run state)
//! - `runner`: Fixed-cadence tick loop with explicit cancellation
//! - `session`: Run state machine wiring the simulation to its collaborators
//! - `audio`, `player`, `settings`: Collaborator seams (audio cues, progress, preferences)
//! - `persistence`: Key-value storage backends for progress and settings
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod menu;
pub mod persistence;
pub mod player;
pub mod runner;
pub mod session;
pub mod settings;
pub mod sim;
pub mod skins;
pub mod tuning;

pub use session::GameSession;
pub use settings::Settings;
pub use tuning::Tuning;

use std::time::Duration;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation timestep (~60 Hz)
    pub const SIM_DT: Duration = Duration::from_millis(16);
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport used until the UI reports its real size
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 412.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 915.0;

    /// Player's fixed horizontal anchor (left edge of its sprite)
    pub const PLAYER_X: f32 = 50.0;
}

/// Whole milliseconds in a duration, saturating at `u64::MAX`
#[inline]
pub fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
