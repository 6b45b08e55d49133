//! Meteor Dodge headless runner
//!
//! Plays one autopilot session without rendering, then records the score.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use meteor_dodge::autopilot::Autopilot;
use meteor_dodge::driver::Driver;
use meteor_dodge::{Game, HighScores, Tuning};

/// Ten minutes at 60 frames per second
const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 10;

#[derive(Debug, Parser)]
#[command(name = "meteor-dodge", about = "Play one headless autopilot session of Meteor Dodge")]
struct Args {
    /// RNG seed; defaults to the current time
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// JSON file overriding gameplay tuning
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,

    /// High score file
    #[arg(long, value_name = "PATH", default_value = "meteor_dodge_scores.json")]
    scores: PathBuf,

    /// Stop after this many frames if the autopilot survives
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_FRAMES)]
    max_frames: u64,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Meteor Dodge (headless) starting...");

    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path).unwrap_or_else(|e| {
            log::warn!("Ignoring tuning file {}: {}", path.display(), e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let seed = args.seed.unwrap_or_else(now_ms);
    let pilot = Autopilot::new(&tuning);
    let mut driver = Driver::new(Game::seeded(tuning, seed), pilot);

    driver.start_session();
    let result = driver.run(args.max_frames);
    let frames = driver.game().state().map_or(0, |s| s.frame_count);
    driver.teardown();

    let Some(final_score) = result else {
        let score = driver.game().state().map_or(0, |s| s.display_score());
        println!("Survived all {frames} frames with score {score} (seed {seed})");
        return;
    };

    println!("Game over after {frames} frames: score {final_score} (seed {seed})");

    match HighScores::record(&args.scores, final_score, frames, now_ms()) {
        Ok((_, submission)) if submission.new_best => println!("NEW HIGH SCORE!"),
        Ok((scores, _)) => println!("High score: {}", scores.best()),
        Err(e) => log::warn!(
            "High scores at {} left unchanged: {}",
            args.scores.display(),
            e
        ),
    }
}
