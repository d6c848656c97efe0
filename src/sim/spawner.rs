//! Procedural obstacle and pickup placement
//!
//! Two independent countdowns. Obstacle pacing tightens as the world speeds
//! up but never drops below a floor; pickups are pushed right until they
//! clear everything already placed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityKind};
use super::state::{IdAllocator, Viewport};
use crate::tuning::Tuning;

/// Spawn scheduler with its own seeded RNG stream
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    /// Seconds until the next obstacle
    pub obstacle_timer: f32,
    /// Seconds until the next pickup
    pub pickup_timer: f32,
    /// Disabled spawners leave the world untouched
    pub enabled: bool,
}

impl Spawner {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            obstacle_timer: tuning.first_obstacle_delay,
            pickup_timer: tuning.first_pickup_delay,
            enabled: true,
        }
    }

    /// Rewind the timers for a fresh run; the RNG stream continues
    pub fn reset(&mut self, tuning: &Tuning) {
        self.obstacle_timer = tuning.first_obstacle_delay;
        self.pickup_timer = tuning.first_pickup_delay;
    }

    /// Obstacle interval at the given speed, before random variance
    pub fn obstacle_interval(speed: f32, tuning: &Tuning) -> f32 {
        (tuning.obstacle_base_interval - speed / tuning.obstacle_speed_divisor)
            .max(tuning.obstacle_min_interval)
    }

    /// Count down and append any due entities
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt: f32,
        speed: f32,
        viewport: Viewport,
        tuning: &Tuning,
        ids: &mut IdAllocator,
        obstacles: &mut Vec<Entity>,
        pickups: &mut Vec<Entity>,
    ) {
        if !self.enabled {
            return;
        }

        self.obstacle_timer -= dt;
        self.pickup_timer -= dt;

        if self.obstacle_timer <= 0.0 {
            let obstacle = self.spawn_obstacle(viewport, tuning, ids);
            log::debug!(
                "Spawned {:?} #{} at x={:.0}",
                obstacle.kind,
                obstacle.id,
                obstacle.x
            );
            obstacles.push(obstacle);
            self.obstacle_timer = self.rng.random::<f32>() * tuning.obstacle_interval_variance
                + Self::obstacle_interval(speed, tuning);
        }

        if self.pickup_timer <= 0.0 {
            let pickup = self.spawn_pickup(viewport, tuning, ids, obstacles, pickups);
            log::debug!(
                "Spawned pickup #{} at ({:.0}, {:.0})",
                pickup.id,
                pickup.x,
                pickup.y
            );
            pickups.push(pickup);
            self.pickup_timer = self.rng.random::<f32>() * tuning.pickup_interval_variance
                + tuning.pickup_interval_floor;
        }
    }

    fn spawn_obstacle(&mut self, viewport: Viewport, tuning: &Tuning, ids: &mut IdAllocator) -> Entity {
        let kind = if self.rng.random_bool(tuning.tall_obstacle_weight) {
            EntityKind::Crate
        } else {
            EntityKind::Rock
        };
        let x = viewport.width + kind.width() + tuning.spawn_margin;
        Entity::new(ids.next_id(), kind, x, 0.0)
    }

    fn spawn_pickup(
        &mut self,
        viewport: Viewport,
        tuning: &Tuning,
        ids: &mut IdAllocator,
        obstacles: &[Entity],
        pickups: &[Entity],
    ) -> Entity {
        let kind = EntityKind::Egg;
        let x = obstacles
            .iter()
            .chain(pickups)
            .map(|e| e.right() + tuning.pickup_min_spacing)
            .fold(viewport.width + kind.width() + tuning.spawn_margin, f32::max);

        let y = if self.rng.random_bool(tuning.pickup_ground_chance) {
            0.0
        } else {
            let air_room = viewport.height * tuning.pickup_air_room_fraction;
            self.rng.random::<f32>() * air_room
        };

        Entity::new(ids.next_id(), kind, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.016;

    fn viewport() -> Viewport {
        Viewport {
            width: 400.0,
            height: 800.0,
        }
    }

    fn run(spawner: &mut Spawner, seconds: f32, speed: f32) -> (Vec<Entity>, Vec<Entity>) {
        let tuning = Tuning::default();
        let mut ids = IdAllocator::default();
        let mut obstacles = Vec::new();
        let mut pickups = Vec::new();
        let ticks = (seconds / DT) as usize;
        for _ in 0..ticks {
            spawner.update(DT, speed, viewport(), &tuning, &mut ids, &mut obstacles, &mut pickups);
        }
        (obstacles, pickups)
    }

    #[test]
    fn test_first_obstacle_waits_for_delay() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(1, &tuning);
        let (obstacles, _) = run(&mut spawner, tuning.first_obstacle_delay - 0.1, 320.0);
        assert!(obstacles.is_empty());
        let (obstacles, _) = run(&mut spawner, 0.2, 320.0);
        assert_eq!(obstacles.len(), 1);
    }

    #[test]
    fn test_obstacles_spawn_offscreen_on_ground() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(3, &tuning);
        let (obstacles, _) = run(&mut spawner, 20.0, 320.0);
        assert!(!obstacles.is_empty());
        for o in &obstacles {
            assert!(o.kind.is_obstacle());
            assert_eq!(o.y, 0.0);
            assert!(o.x > viewport().width);
        }
    }

    #[test]
    fn test_interval_shrinks_with_speed_to_floor() {
        let tuning = Tuning::default();
        let slow = Spawner::obstacle_interval(tuning.base_speed, &tuning);
        let fast = Spawner::obstacle_interval(tuning.max_speed, &tuning);
        assert!(fast < slow);
        assert_eq!(Spawner::obstacle_interval(1.0e6, &tuning), tuning.obstacle_min_interval);
    }

    #[test]
    fn test_pickup_clears_existing_entities() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(9, &tuning);
        let mut ids = IdAllocator::default();
        let mut obstacles = vec![Entity::new(ids.next_id(), EntityKind::Crate, 900.0, 0.0)];
        let mut pickups = Vec::new();
        spawner.obstacle_timer = 100.0;
        spawner.pickup_timer = 0.0;

        spawner.update(DT, 320.0, viewport(), &tuning, &mut ids, &mut obstacles, &mut pickups);
        assert_eq!(pickups.len(), 1);
        let pickup = &pickups[0];
        assert!(pickup.x >= obstacles[0].right() + tuning.pickup_min_spacing - 1e-3);
        assert!(pickup.y >= 0.0);
        assert!(pickup.y <= viewport().height * tuning.pickup_air_room_fraction);
    }

    #[test]
    fn test_timers_rearm_within_pacing_window() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(21, &tuning);
        let mut ids = IdAllocator::default();
        let mut obstacles = Vec::new();
        let mut pickups = Vec::new();

        for speed in [320.0, 500.0, 720.0] {
            spawner.obstacle_timer = 0.0;
            spawner.pickup_timer = 0.0;
            spawner.update(DT, speed, viewport(), &tuning, &mut ids, &mut obstacles, &mut pickups);

            let interval = Spawner::obstacle_interval(speed, &tuning);
            assert!(spawner.obstacle_timer >= interval);
            assert!(spawner.obstacle_timer <= interval + tuning.obstacle_interval_variance);
            assert!(spawner.pickup_timer >= tuning.pickup_interval_floor);
            assert!(
                spawner.pickup_timer
                    <= tuning.pickup_interval_floor + tuning.pickup_interval_variance
            );
        }
        assert_eq!(obstacles.len(), 3);
        assert_eq!(pickups.len(), 3);
    }

    #[test]
    fn test_obstacle_kinds_follow_weight() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(77, &tuning);
        let mut ids = IdAllocator::default();
        let mut obstacles = Vec::new();
        let mut pickups = Vec::new();
        spawner.pickup_timer = f32::MAX;

        let draws = 2000;
        for _ in 0..draws {
            spawner.obstacle_timer = 0.0;
            spawner.update(DT, 320.0, viewport(), &tuning, &mut ids, &mut obstacles, &mut pickups);
        }
        assert_eq!(obstacles.len(), draws);
        let crates = obstacles.iter().filter(|o| o.kind == EntityKind::Crate).count();
        let rocks = obstacles.iter().filter(|o| o.kind == EntityKind::Rock).count();
        assert_eq!(crates + rocks, draws);
        let share = crates as f64 / draws as f64;
        assert!(
            (share - tuning.tall_obstacle_weight).abs() < 0.05,
            "crate share {share}"
        );
    }

    #[test]
    fn test_pickups_never_overlap_each_other() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(11, &tuning);
        // No scrolling here, so every pickup lands right of the previous one
        let (_, pickups) = run(&mut spawner, 30.0, 320.0);
        for pair in pickups.windows(2) {
            assert!(pair[1].x >= pair[0].right() + tuning.pickup_min_spacing - 1e-3);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let tuning = Tuning::default();
        let mut a = Spawner::new(42, &tuning);
        let mut b = Spawner::new(42, &tuning);
        assert_eq!(run(&mut a, 15.0, 400.0), run(&mut b, 15.0, 400.0));
    }

    #[test]
    fn test_disabled_spawner_is_idle() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(5, &tuning);
        spawner.enabled = false;
        let (obstacles, pickups) = run(&mut spawner, 10.0, 320.0);
        assert!(obstacles.is_empty());
        assert!(pickups.is_empty());
    }
}
