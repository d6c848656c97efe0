//! Run state and core simulation types
//!
//! `Simulation` is the mutable world owned by the session. Everything outside
//! the simulation sees `RunState`, an immutable snapshot copied out of it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::physics::{Player, animation_frame};
use super::spawner::Spawner;
use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::duration_millis;
use crate::skins::{self, Skin};
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// World visible but frozen, waiting for the player to start
    Ready,
    /// Tick loop active
    Running,
    /// Tick loop suspended, resumable
    Paused,
    /// Run ended; only a restart leaves this phase
    Over,
}

/// Something that happened during a tick, for the session to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Pickups overlapped the player this tick
    PickupsCollected { count: u32 },
    /// First fatal collision of the run; the grace window has started
    Hit,
    /// Grace window elapsed and the run is over
    RunOver {
        score: u64,
        pickups: u32,
        best_score: u64,
    },
}

/// Visible area in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Monotonic entity id source
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// The mutable world for one run
#[derive(Debug, Clone)]
pub struct Simulation {
    pub tuning: Tuning,
    pub phase: RunPhase,
    /// Run time spent in Running (excludes pauses and the grace window)
    pub elapsed: Duration,
    pub player: Player,
    pub speed: f32,
    /// Spawn order
    pub obstacles: Vec<Entity>,
    /// Spawn order
    pub pickups: Vec<Entity>,
    pub pickups_collected: u32,
    pub score: u64,
    /// Mirrors the persisted best score
    pub best_score: u64,
    /// A fatal collision happened; gameplay is frozen until the grace window ends
    pub hit: bool,
    pub grace_remaining: Duration,
    /// Presentation-only animation clock (seconds)
    pub anim_timer: f32,
    pub viewport: Viewport,
    pub ground_height: f32,
    pub skin: &'static Skin,
    pub spawner: Spawner,
    pub ids: IdAllocator,
}

impl Simulation {
    /// Create a simulation waiting in Ready
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let spawner = Spawner::new(seed, &tuning);
        Self {
            phase: RunPhase::Ready,
            elapsed: Duration::ZERO,
            player: Player::default(),
            speed: tuning.base_speed,
            obstacles: Vec::new(),
            pickups: Vec::new(),
            pickups_collected: 0,
            score: 0,
            best_score: 0,
            hit: false,
            grace_remaining: Duration::ZERO,
            anim_timer: 0.0,
            viewport: Viewport::default(),
            ground_height: 0.0,
            skin: skins::default_skin(),
            spawner,
            ids: IdAllocator::default(),
            tuning,
        }
    }

    /// Reset everything a run owns and enter `phase`
    ///
    /// Best score, skin, viewport, ground height and the RNG stream survive.
    pub fn reset(&mut self, phase: RunPhase) {
        self.phase = phase;
        self.elapsed = Duration::ZERO;
        self.player = Player::default();
        self.speed = self.tuning.base_speed;
        self.obstacles.clear();
        self.pickups.clear();
        self.pickups_collected = 0;
        self.score = 0;
        self.hit = false;
        self.grace_remaining = Duration::ZERO;
        self.anim_timer = 0.0;
        self.spawner.reset(&self.tuning);
    }

    /// Copy out an immutable view for observers
    pub fn snapshot(&self) -> RunState {
        RunState {
            score: self.score,
            pickups_collected: self.pickups_collected,
            best_score: self.best_score,
            phase: self.phase,
            player_offset: self.player.offset,
            player_velocity: self.player.velocity,
            speed: self.speed,
            obstacles: self.obstacles.clone(),
            pickups: self.pickups.clone(),
            ground_height: self.ground_height,
            viewport: self.viewport,
            skin: self.skin,
            hit: self.hit,
            anim_frame: animation_frame(
                self.anim_timer,
                self.tuning.anim_frame_rate,
                self.tuning.anim_frame_count,
            ),
            elapsed_ms: duration_millis(self.elapsed),
        }
    }
}

/// Published, read-only view of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunState {
    pub score: u64,
    pub pickups_collected: u32,
    pub best_score: u64,
    pub phase: RunPhase,
    /// Height above the ground baseline (0 = grounded)
    pub player_offset: f32,
    pub player_velocity: f32,
    pub speed: f32,
    pub obstacles: Vec<Entity>,
    pub pickups: Vec<Entity>,
    pub ground_height: f32,
    pub viewport: Viewport,
    pub skin: &'static Skin,
    /// Hit animation should play (grace window or run over by collision)
    pub hit: bool,
    pub anim_frame: u32,
    pub elapsed_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;

    #[test]
    fn test_new_simulation_is_ready_and_empty() {
        let sim = Simulation::new(Tuning::default(), 1);
        assert_eq!(sim.phase, RunPhase::Ready);
        assert!(sim.obstacles.is_empty());
        assert!(sim.pickups.is_empty());
        assert_eq!(sim.speed, sim.tuning.base_speed);
    }

    #[test]
    fn test_reset_preserves_external_values() {
        let mut sim = Simulation::new(Tuning::default(), 1);
        sim.best_score = 900;
        sim.ground_height = 120.0;
        sim.skin = skins::find_by_id("cyber");
        sim.viewport = Viewport {
            width: 800.0,
            height: 600.0,
        };
        sim.score = 55;
        sim.pickups_collected = 3;
        sim.hit = true;
        sim.player.offset = 40.0;
        sim.elapsed = Duration::from_secs(4);
        let id = sim.ids.next_id();
        sim.obstacles.push(Entity::new(id, EntityKind::Rock, 10.0, 0.0));

        sim.reset(RunPhase::Running);

        assert_eq!(sim.phase, RunPhase::Running);
        assert_eq!(sim.score, 0);
        assert_eq!(sim.pickups_collected, 0);
        assert!(!sim.hit);
        assert_eq!(sim.player.offset, 0.0);
        assert_eq!(sim.elapsed, Duration::ZERO);
        assert!(sim.obstacles.is_empty());
        assert_eq!(sim.best_score, 900);
        assert_eq!(sim.ground_height, 120.0);
        assert_eq!(sim.skin.id, "cyber");
        assert_eq!(sim.viewport.width, 800.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids = IdAllocator::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }
}
