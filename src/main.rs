//! Marble Bounce headless runner
//!
//! Drives the simulation the way a windowed front end would (fixed timestep
//! behind a frame accumulator), logs the population once per simulated
//! second, and prints the final snapshot as JSON.
//!
//! Usage: marble-bounce [settings.json] [seconds]

use std::path::Path;

use marble_bounce::consts::{MAX_SUBSTEPS, SIM_DT};
use marble_bounce::{Settings, Simulation};

/// Frame interval the runner pretends to render at
const FRAME_DT: f32 = 1.0 / 60.0;
/// Longest frame the accumulator accepts
const MAX_FRAME_DT: f32 = 0.25;
const DEFAULT_SECONDS: f32 = 30.0;

struct Runner {
    sim: Simulation,
    accumulator: f32,
}

impl Runner {
    fn new(settings: Settings) -> Self {
        Self {
            sim: Simulation::new(settings),
            accumulator: 0.0,
        }
    }

    /// Run as many fixed steps as the frame time covers
    fn update(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.sim.step(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(DEFAULT_SECONDS);

    log::info!("Marble Bounce (headless) running {:.1}s, seed {}", seconds, settings.seed);

    let mut runner = Runner::new(settings);
    let frames = (seconds / FRAME_DT).ceil() as u64;
    let mut last_second = 0;

    for _ in 0..frames {
        runner.update(FRAME_DT);

        let second = runner.sim.elapsed() as u64;
        if second > last_second {
            last_second = second;
            log::info!(
                "t={}s balls={} energy={:.0}",
                second,
                runner.sim.ball_count(),
                runner.sim.kinetic_energy()
            );
        }
    }

    match serde_json::to_string_pretty(&runner.sim.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
