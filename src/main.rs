//! Pixel Dash headless driver
//!
//! Runs a seeded demo session with the autopilot at the controls, persisting
//! progress to a data directory. A UI host drives `GameSession` the same way.
//!
//! Usage:
//!   pixel-dash [--seed N] [--seconds N] [--realtime] [--tuning PATH] [--data-dir PATH] [--verbose]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use pixel_dash::audio::LogAudio;
use pixel_dash::consts::SIM_DT;
use pixel_dash::menu::MenuState;
use pixel_dash::persistence::FileStore;
use pixel_dash::player::PlayerRepository;
use pixel_dash::settings::SettingsRepository;
use pixel_dash::sim::{JumpStrength, RunPhase, decide_jump};
use pixel_dash::{GameSession, Tuning};

struct Options {
    seed: u64,
    seconds: u64,
    realtime: bool,
    tuning: Option<PathBuf>,
    data_dir: PathBuf,
    verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            seconds: 60,
            realtime: false,
            tuning: None,
            data_dir: PathBuf::from(".pixel-dash"),
            verbose: false,
        }
    }
}

fn parse_args() -> Options {
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => match args.next().and_then(|v| v.parse().ok()) {
                Some(seed) => options.seed = seed,
                None => log::warn!("--seed needs a number"),
            },
            "--seconds" => match args.next().and_then(|v| v.parse().ok()) {
                Some(seconds) => options.seconds = seconds,
                None => log::warn!("--seconds needs a number"),
            },
            "--tuning" => options.tuning = args.next().map(PathBuf::from),
            "--data-dir" => {
                if let Some(dir) = args.next() {
                    options.data_dir = PathBuf::from(dir);
                }
            }
            "--realtime" => options.realtime = true,
            "--verbose" => options.verbose = true,
            other => log::warn!("Ignoring unknown argument '{}'", other),
        }
    }
    options
}

fn load_tuning(path: Option<&PathBuf>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Bad tuning file {}: {}, using defaults", path.display(), e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Cannot read {}: {}, using defaults", path.display(), e);
            Tuning::default()
        }
    }
}

fn main() {
    env_logger::init();
    let options = parse_args();
    log::info!("Pixel Dash (headless) starting...");

    let tuning = load_tuning(options.tuning.as_ref());
    let (player, settings) = match FileStore::open(&options.data_dir) {
        Ok(store) => (
            PlayerRepository::open(store.clone()),
            SettingsRepository::open(store),
        ),
        Err(e) => {
            log::error!("Cannot open data dir {}: {}", options.data_dir.display(), e);
            std::process::exit(1);
        }
    };

    let menu = MenuState::collect(&player, &settings);
    println!(
        "Best {} | Coins {} | Skin {}",
        menu.best_score, menu.coins, menu.selected_skin_name
    );

    let mut session = GameSession::new(tuning, options.seed, player, settings, LogAudio::new());
    if options.verbose {
        session.subscribe(|state| {
            if state.elapsed_ms % 1000 < 16 && state.phase == RunPhase::Running {
                println!(
                    "t={:>5}ms score={:>5} speed={:>5.1} obstacles={} pickups={}",
                    state.elapsed_ms,
                    state.score,
                    state.speed,
                    state.obstacles.len(),
                    state.pickups.len()
                );
            }
        });
    }
    session.start_new_game(false);

    let budget = Duration::from_secs(options.seconds);
    let mut simulated = Duration::ZERO;
    let mut runs = 0u32;
    let mut jumps = 0u32;
    let mut last_frame = Instant::now();

    while simulated < budget {
        let frame = if options.realtime {
            std::thread::sleep(SIM_DT);
            let now = Instant::now();
            let frame = now - last_frame;
            last_frame = now;
            frame
        } else {
            SIM_DT
        };
        simulated += frame;

        let state = session.frame(frame);
        if let Some(strength) = decide_jump(&state) {
            if session.jump(strength == JumpStrength::High) {
                jumps += 1;
            }
        }

        if state.phase == RunPhase::Over {
            runs += 1;
            println!(
                "Run {}: score {} ({} pickups, {:.1}s)",
                runs,
                state.score,
                state.pickups_collected,
                state.elapsed_ms as f32 / 1000.0
            );
            session.restart();
        }
    }
    session.exit();

    let final_state = session.snapshot();
    if final_state.phase == RunPhase::Running {
        println!(
            "Unfinished run: score {} ({} pickups)",
            final_state.score, final_state.pickups_collected
        );
    }

    let menu = MenuState::collect(session.player(), session.settings());
    println!(
        "Done: {} finished run(s), {} jumps. Best {} | Coins {}",
        runs, jumps, menu.best_score, menu.coins
    );
}
