//! Run state machine
//!
//! `GameSession` owns the simulation and the tick loop, forwards input into
//! them, and turns simulation events into collaborator calls. Observers get
//! immutable `RunState` snapshots, either by polling `snapshot()` or through
//! listeners invoked in tick order.
//!
//! ```text
//! Ready --start--> Running --pause--> Paused --resume--> Running
//! Running --(fatal hit + grace)--> Over
//! any --restart--> Running (or Ready with an intro)
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::audio::AudioSink;
use crate::player::PlayerStore;
use crate::runner::TickLoop;
use crate::settings::SettingsStore;
use crate::sim::{GameEvent, JumpStrength, RunPhase, RunState, Simulation, Viewport, tick};
use crate::skins;
use crate::tuning::Tuning;

type Listener = Box<dyn FnMut(&RunState)>;

pub struct GameSession<P, S, A>
where
    P: PlayerStore,
    S: SettingsStore,
    A: AudioSink,
{
    sim: Simulation,
    ticker: TickLoop,
    player: P,
    settings: S,
    audio: A,
    published: Arc<RunState>,
    listeners: Vec<Listener>,
    /// Set by `exit`; the run stays frozen until a new game or restart
    exited: bool,
}

impl<P, S, A> GameSession<P, S, A>
where
    P: PlayerStore,
    S: SettingsStore,
    A: AudioSink,
{
    /// Create a session in Ready. `seed` drives all spawn randomness.
    pub fn new(tuning: Tuning, seed: u64, player: P, settings: S, audio: A) -> Self {
        let mut sim = Simulation::new(tuning.sanitized(), seed);
        sim.best_score = player.best_score();
        sim.skin = skins::find_by_id(player.selected_skin());
        let published = Arc::new(sim.snapshot());
        log::info!("Session created with seed {}", seed);
        Self {
            sim,
            ticker: TickLoop::default(),
            player,
            settings,
            audio,
            published,
            listeners: Vec::new(),
            exited: false,
        }
    }

    // === Queries ===

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<RunState> {
        Arc::clone(&self.published)
    }

    pub fn phase(&self) -> RunPhase {
        self.sim.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.sim.tuning
    }

    /// True while a tick loop is scheduled
    /// True between `exit` and the next `start_new_game`/`restart`
    pub fn has_exited(&self) -> bool {
        self.exited
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Register an observer, called after every published change
    pub fn subscribe(&mut self, mut listener: impl FnMut(&RunState) + 'static) {
        listener(self.published.as_ref());
        self.listeners.push(Box::new(listener));
    }

    // === Run lifecycle ===

    /// Begin a run, optionally holding in Ready behind an intro overlay
    pub fn start_new_game(&mut self, show_intro: bool) {
        self.apply_volumes();
        let phase = if show_intro {
            RunPhase::Ready
        } else {
            RunPhase::Running
        };
        self.reset_run(phase);
    }

    /// Ready → Running
    pub fn start(&mut self) {
        if self.exited || self.sim.phase != RunPhase::Ready {
            log::debug!("start ignored in {:?}", self.sim.phase);
            return;
        }
        self.sim.phase = RunPhase::Running;
        self.ticker.start();
        if self.settings.music_enabled() {
            self.audio.play_run_music();
        }
        log::info!("Run started");
        self.publish();
    }

    /// Running → Paused
    pub fn pause(&mut self) {
        if self.exited || self.sim.phase != RunPhase::Running {
            log::debug!("pause ignored in {:?}", self.sim.phase);
            return;
        }
        self.ticker.cancel();
        self.sim.phase = RunPhase::Paused;
        self.audio.pause_music();
        log::info!("Paused at {:.2}s", self.sim.elapsed.as_secs_f32());
        self.publish();
    }

    /// Paused → Running, continuing from the exact paused state
    pub fn resume(&mut self) {
        if self.exited || self.sim.phase != RunPhase::Paused {
            log::debug!("resume ignored in {:?}", self.sim.phase);
            return;
        }
        self.sim.phase = RunPhase::Running;
        self.ticker.start();
        if self.settings.music_enabled() {
            self.audio.resume_music();
        }
        log::info!("Resumed");
        self.publish();
    }

    /// Throw the current run away and start over from any phase
    pub fn restart(&mut self) {
        let phase = if self.sim.tuning.show_intro {
            RunPhase::Ready
        } else {
            RunPhase::Running
        };
        self.reset_run(phase);
    }

    /// Leave the game screen: stop ticking and silence the music
    pub fn exit(&mut self) {
        self.exited = true;
        self.ticker.cancel();
        self.audio.stop_music();
        log::info!("Exited run in {:?}", self.sim.phase);
    }

    /// App went to the background
    pub fn on_background(&mut self) {
        if self.sim.phase == RunPhase::Running {
            self.pause();
        }
    }

    /// App came back to the foreground
    pub fn on_foreground(&mut self) {
        if self.sim.phase == RunPhase::Paused {
            self.resume();
        }
    }

    // === Input ===

    /// Jump if running and grounded; returns whether the jump happened
    pub fn jump(&mut self, strong: bool) -> bool {
        if self.exited || self.sim.phase != RunPhase::Running || self.sim.hit {
            return false;
        }
        if !self
            .sim
            .player
            .jump(JumpStrength::from_strong(strong), &self.sim.tuning)
        {
            return false;
        }
        if self.settings.sound_enabled() {
            self.audio.play_jump_cue();
        }
        self.publish();
        true
    }

    pub fn on_viewport_changed(&mut self, width: f32, height: f32) {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !(valid(width) && valid(height)) {
            log::warn!("Ignoring invalid viewport {}x{}", width, height);
            return;
        }
        self.sim.viewport = Viewport { width, height };
        self.publish();
    }

    pub fn on_ground_height_changed(&mut self, height: f32) {
        if !(height.is_finite() && height >= 0.0) {
            log::warn!("Ignoring invalid ground height {}", height);
            return;
        }
        self.sim.ground_height = height;
        self.publish();
    }

    /// Turn spawning on or off (tutorials, tests)
    pub fn set_spawning(&mut self, enabled: bool) {
        self.sim.spawner.enabled = enabled;
    }

    // === Settings ===

    pub fn toggle_music(&mut self) {
        let enabled = !self.settings.music_enabled();
        self.settings.set_music_enabled(enabled);
        self.apply_volumes();
        if !enabled {
            self.audio.pause_music();
        } else if !self.exited && self.sim.phase == RunPhase::Running {
            self.audio.play_run_music();
        }
    }

    pub fn toggle_sound(&mut self) {
        let enabled = !self.settings.sound_enabled();
        self.settings.set_sound_enabled(enabled);
        self.apply_volumes();
    }

    // === Ticking ===

    /// Feed wall-clock time; runs every fixed step that is due
    pub fn frame(&mut self, elapsed: Duration) -> Arc<RunState> {
        let steps = self.ticker.advance(elapsed);
        let step = self.ticker.step();
        for _ in 0..steps {
            self.tick(step);
            if !self.ticker.is_active() {
                break;
            }
        }
        self.snapshot()
    }

    /// Run a single tick of `dt` (clamped) if the run is active
    pub fn tick(&mut self, dt: Duration) {
        if self.exited || self.sim.phase != RunPhase::Running {
            return;
        }
        let events = tick(&mut self.sim, dt);
        for event in events {
            self.handle_event(event);
        }
        self.publish();
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::PickupsCollected { count } => {
                log::debug!("Collected {} pickup(s)", count);
                if self.settings.sound_enabled() {
                    self.audio.play_collect_cue();
                }
            }
            GameEvent::Hit => {
                log::debug!("Grace window started");
            }
            GameEvent::RunOver {
                score,
                pickups,
                best_score,
            } => {
                self.ticker.cancel();
                // Fire and forget: collaborators own durability
                self.player.update_best_score(best_score);
                if pickups > 0 {
                    self.player.add_currency(i64::from(pickups));
                }
                self.audio.stop_music();
                if self.settings.sound_enabled() {
                    self.audio.play_hit_cue();
                }
                log::info!("Committed run: score {}, +{} coins", score, pickups);
            }
        }
    }

    fn reset_run(&mut self, phase: RunPhase) {
        self.exited = false;
        self.ticker.cancel();
        self.sim.best_score = self.sim.best_score.max(self.player.best_score());
        self.sim.skin = skins::find_by_id(self.player.selected_skin());
        self.sim.reset(phase);
        if phase == RunPhase::Running {
            self.ticker.start();
            if self.settings.music_enabled() {
                self.audio.play_run_music();
            }
        }
        log::info!("New run in {:?}", phase);
        self.publish();
    }

    fn apply_volumes(&mut self) {
        self.audio.set_music_volume(self.settings.music_volume());
        self.audio.set_sound_volume(self.settings.sound_volume());
    }

    fn publish(&mut self) {
        self.published = Arc::new(self.sim.snapshot());
        let state: &RunState = &self.published;
        for listener in &mut self.listeners {
            listener(state);
        }
    }
}
