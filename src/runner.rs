//! Fixed-cadence tick loop
//!
//! The host feeds wall-clock frame time in; the loop hands back how many
//! fixed steps are due. A loop is started and cancelled explicitly; starting
//! cancels whatever loop was live, so at most one ever runs. Each start gets
//! a new number in the logs.

use std::time::Duration;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame gap accepted from the host (e.g. after a debugger stop)
const MAX_FRAME: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct TickLoop {
    step: Duration,
    max_substeps: u32,
    accumulator: Duration,
    generation: u64,
    active: bool,
}

impl Default for TickLoop {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl TickLoop {
    pub fn new(step: Duration, max_substeps: u32) -> Self {
        Self {
            step: step.max(Duration::from_millis(1)),
            max_substeps: max_substeps.max(1),
            accumulator: Duration::ZERO,
            generation: 0,
            active: false,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start a fresh loop, cancelling any loop still running
    pub fn start(&mut self) {
        if self.active {
            self.cancel();
        }
        self.generation += 1;
        self.active = true;
        self.accumulator = Duration::ZERO;
        log::debug!("Tick loop #{} started", self.generation);
    }

    /// Stop scheduling ticks; partial time is discarded
    pub fn cancel(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.accumulator = Duration::ZERO;
        log::debug!("Tick loop #{} cancelled", self.generation);
    }

    /// Accumulate a frame and return the number of fixed steps due
    pub fn advance(&mut self, frame: Duration) -> u32 {
        if !self.active {
            return 0;
        }
        self.accumulator += frame.min(MAX_FRAME);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        // Spiral of death guard: drop time we could not catch up on
        if steps == self.max_substeps && self.accumulator >= self.step {
            log::warn!(
                "Dropping {:?} of simulation time after {} substeps",
                self.accumulator,
                steps
            );
            self.accumulator = Duration::ZERO;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_loop_yields_nothing() {
        let mut ticker = TickLoop::default();
        assert_eq!(ticker.advance(Duration::from_millis(50)), 0);
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut ticker = TickLoop::default();
        ticker.start();
        assert_eq!(ticker.advance(Duration::from_millis(10)), 0);
        assert_eq!(ticker.advance(Duration::from_millis(10)), 1);
        assert_eq!(ticker.advance(Duration::from_millis(12)), 1);
        assert_eq!(ticker.advance(Duration::from_millis(33)), 2);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut ticker = TickLoop::new(Duration::from_millis(16), 3);
        ticker.start();
        assert_eq!(ticker.advance(Duration::from_millis(100)), 3);
        // Backlog dropped
        assert_eq!(ticker.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_restart_cancels_previous_loop() {
        let mut ticker = TickLoop::default();
        ticker.start();
        ticker.advance(Duration::from_millis(10));
        ticker.start();
        assert!(ticker.is_active());
        // Pending time from the old loop is gone
        assert_eq!(ticker.advance(Duration::from_millis(10)), 0);
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let mut ticker = TickLoop::default();
        ticker.start();
        ticker.cancel();
        assert!(!ticker.is_active());
        assert_eq!(ticker.advance(Duration::from_millis(64)), 0);
    }
}
