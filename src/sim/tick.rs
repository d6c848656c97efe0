//! Simulation tick
//!
//! Order within a tick is fixed: physics, then spawning (using positions
//! already advanced this tick), then collision and scoring against this
//! tick's moved entities.

use std::time::Duration;

use super::collision::{compute_score, resolve};
use super::physics::{scroll_and_prune, speed_at};
use super::state::{GameEvent, RunPhase, Simulation};

/// Advance the run by `dt` (clamped to the tuning's max step)
///
/// Does nothing unless the run is in `Running`. After a fatal hit the
/// world stays frozen while the grace window counts down, then the phase
/// flips to `Over` exactly once.
pub fn tick(sim: &mut Simulation, dt: Duration) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if sim.phase != RunPhase::Running {
        return events;
    }

    let dt = dt.min(sim.tuning.max_step());
    if dt.is_zero() {
        return events;
    }
    let dt_secs = dt.as_secs_f32();

    // Presentation clock keeps going so the hit animation can play
    sim.anim_timer += dt_secs;

    if sim.hit {
        sim.grace_remaining = sim.grace_remaining.saturating_sub(dt);
        if sim.grace_remaining.is_zero() {
            events.push(finish_run(sim));
        }
        return events;
    }

    // Physics
    sim.elapsed += dt;
    sim.speed = speed_at(sim.elapsed, &sim.tuning);
    sim.player.integrate(dt_secs, &sim.tuning);
    let distance = sim.speed * dt_secs;
    scroll_and_prune(&mut sim.obstacles, distance);
    scroll_and_prune(&mut sim.pickups, distance);

    // Spawning
    let Simulation {
        spawner,
        tuning,
        ids,
        obstacles,
        pickups,
        viewport,
        speed,
        ..
    } = sim;
    spawner.update(dt_secs, *speed, *viewport, tuning, ids, obstacles, pickups);

    // Collision & scoring
    let result = resolve(sim.player.offset, &sim.obstacles, &mut sim.pickups);
    if result.collected > 0 {
        sim.pickups_collected += result.collected;
        events.push(GameEvent::PickupsCollected {
            count: result.collected,
        });
    }
    sim.score = compute_score(sim.elapsed, sim.pickups_collected, &sim.tuning);

    if result.fatal {
        log::info!(
            "Hit obstacle at {:.2}s (score {})",
            sim.elapsed.as_secs_f32(),
            sim.score
        );
        sim.hit = true;
        sim.grace_remaining = sim.tuning.grace_delay();
        events.push(GameEvent::Hit);
        if sim.grace_remaining.is_zero() {
            events.push(finish_run(sim));
        }
    }

    events
}

fn finish_run(sim: &mut Simulation) -> GameEvent {
    sim.phase = RunPhase::Over;
    sim.best_score = sim.best_score.max(sim.score);
    log::info!(
        "Run over: score {}, pickups {}, best {}",
        sim.score,
        sim.pickups_collected,
        sim.best_score
    );
    GameEvent::RunOver {
        score: sim.score,
        pickups: sim.pickups_collected,
        best_score: sim.best_score,
    }
}
