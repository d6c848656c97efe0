//! Player collision resolution and scoring
//!
//! Pickups overlapping the player are collected; any obstacle overlap is
//! fatal. Score is rebuilt from scratch every tick so it can never drift.

use std::time::Duration;

use super::entity::{Entity, player_hitbox_rect};
use super::geometry::Rect;
use crate::duration_millis;
use crate::tuning::Tuning;

/// Outcome of resolving one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// Pickups removed this tick
    pub collected: u32,
    /// An obstacle overlaps the player
    pub fatal: bool,
}

/// Remove pickups touching `player` and return how many were taken
pub fn collect_pickups(pickups: &mut Vec<Entity>, player: &Rect) -> u32 {
    let before = pickups.len();
    pickups.retain(|p| !p.hitbox_rect().intersects(player));
    (before - pickups.len()) as u32
}

/// True if any obstacle overlaps `player`
pub fn hits_obstacle(obstacles: &[Entity], player: &Rect) -> bool {
    obstacles.iter().any(|o| o.hitbox_rect().intersects(player))
}

/// Resolve pickups and obstacles against the player at `player_offset`
pub fn resolve(player_offset: f32, obstacles: &[Entity], pickups: &mut Vec<Entity>) -> CollisionResult {
    let player = player_hitbox_rect(player_offset);
    CollisionResult {
        collected: collect_pickups(pickups, &player),
        fatal: hits_obstacle(obstacles, &player),
    }
}

/// `floor(elapsed * time_score_rate) + pickups * pickup_score_value`
pub fn compute_score(elapsed: Duration, pickups: u32, tuning: &Tuning) -> u64 {
    let time_points = duration_millis(elapsed).saturating_mul(u64::from(tuning.time_score_rate)) / 1000;
    time_points.saturating_add(u64::from(pickups) * u64::from(tuning.pickup_score_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_X;
    use crate::sim::entity::EntityKind;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_pickup_is_collected() {
        let mut pickups = vec![
            Entity::new(1, EntityKind::Egg, PLAYER_X + 10.0, 0.0),
            Entity::new(2, EntityKind::Egg, 600.0, 0.0),
        ];
        let result = resolve(0.0, &[], &mut pickups);
        assert_eq!(result.collected, 1);
        assert!(!result.fatal);
        assert_eq!(pickups.len(), 1);
        assert_eq!(pickups[0].id, 2);
    }

    #[test]
    fn test_airborne_player_clears_ground_obstacle() {
        let obstacles = vec![Entity::new(1, EntityKind::Rock, PLAYER_X, 0.0)];
        let mut pickups = Vec::new();
        assert!(resolve(0.0, &obstacles, &mut pickups).fatal);
        assert!(!resolve(200.0, &obstacles, &mut pickups).fatal);
    }

    #[test]
    fn test_obstacle_ahead_is_not_fatal() {
        let obstacles = vec![Entity::new(1, EntityKind::Crate, 400.0, 0.0)];
        assert!(!hits_obstacle(&obstacles, &player_hitbox_rect(0.0)));
    }

    #[test]
    fn test_score_formula() {
        let tuning = Tuning::default();
        assert_eq!(compute_score(Duration::ZERO, 0, &tuning), 0);
        assert_eq!(compute_score(Duration::from_millis(10_000), 0, &tuning), 100);
        assert_eq!(compute_score(Duration::from_millis(1_099), 0, &tuning), 10);
        assert_eq!(compute_score(Duration::from_secs(2), 3, &tuning), 20 + 3 * 25);
    }

    proptest! {
        #[test]
        fn prop_score_monotonic(ms in 0u64..10_000_000, extra_ms in 0u64..100_000, pickups in 0u32..1000, extra in 0u32..10) {
            let tuning = Tuning::default();
            let now = compute_score(Duration::from_millis(ms), pickups, &tuning);
            let later = compute_score(Duration::from_millis(ms + extra_ms), pickups + extra, &tuning);
            prop_assert!(later >= now);
        }
    }
}
