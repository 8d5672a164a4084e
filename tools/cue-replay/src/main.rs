//! cue-replay: drive a headless simulation from a JSON script and report
//! how well the cue timeline landed.
//!
//! Usage:
//!   cue-replay run.json --hz 120 --seconds 30
//!   LOG_FORMAT=json RUST_LOG=debug cue-replay run.json --snapshot

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use serde::Deserialize;
use tracing::{info, warn};

use syncopate_core::config::CombatConfigPatch;
use syncopate_core::constants::DEFAULT_SEED;
use syncopate_core::enums::MoodProfile;
use syncopate_core::types::IntensitySample;
use syncopate_sim::{SimConfig, SimulationEngine};

#[derive(Debug, Parser)]
#[command(name = "cue-replay", about = "Replay a cue script through the simulation")]
struct Args {
    /// JSON script describing the run.
    script: PathBuf,

    /// Fixed step rate.
    #[arg(long, default_value_t = 120.0)]
    hz: f64,

    /// Seconds to simulate; defaults to one second past the last cue.
    #[arg(long)]
    seconds: Option<f64>,

    /// Print the final snapshot as JSON.
    #[arg(long)]
    snapshot: bool,
}

/// Replay script. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Script {
    seed: Option<u64>,
    mood: MoodProfile,
    bullet_ratio: Option<f64>,
    cues: Vec<f64>,
    intensity: Vec<IntensitySample>,
    combat: CombatConfigPatch,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

fn load_script(path: &Path) -> Result<Script, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("Invalid script {}: {e}", path.display()))
}

fn run(args: &Args) -> Result<(), String> {
    if !args.hz.is_finite() || args.hz <= 0.0 {
        return Err(format!("--hz must be positive, got {}", args.hz));
    }
    let script = load_script(&args.script)?;

    let last_cue = script.cues.iter().copied().fold(0.0_f64, f64::max);
    let seconds = args.seconds.unwrap_or(last_cue + 1.0);
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("--seconds must be non-negative, got {seconds}"));
    }

    let mut engine = SimulationEngine::new(SimConfig {
        seed: script.seed.unwrap_or(DEFAULT_SEED),
        mood: script.mood,
        enemy_bullet_ratio: script.bullet_ratio.unwrap_or(1.0),
        ..Default::default()
    });
    engine.patch_combat_config(&script.combat);
    engine.set_intensity_timeline(&script.intensity);
    engine.start_track_run(&script.cues);

    let dt = 1.0 / args.hz;
    let steps = (seconds * args.hz).ceil() as u64;
    info!(steps, dt, cues = script.cues.len(), "Replaying");
    for _ in 0..steps {
        engine.step(dt);
    }

    let snapshot = engine.snapshot();
    let score = snapshot.score;
    if score.cue_resolved_count + score.cue_missed_count < script.cues.len() as u32 {
        warn!("Run ended before every cue came due; raise --seconds");
    }

    println!("cue-replay summary ({:.2}s @ {} Hz)", engine.time().elapsed_secs, args.hz);
    println!("  resolved:          {}", score.cue_resolved_count);
    println!("  missed:            {}", score.cue_missed_count);
    println!(
        "  catch-up:          {} resolved / {} missed",
        score.catch_up_resolved_count, score.catch_up_missed_count
    );
    println!("  avg cue error:     {:.2} ms", score.avg_cue_error_ms);
    println!("  score:             {}", score.score);
    println!("  max combo:         {}", score.max_combo);
    println!("  ambient kills:     {}", score.ambient_kills);
    println!("  shield hits:       {}", score.shield_hits);

    if args.snapshot {
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| format!("Failed to serialize snapshot: {e}"))?;
        println!("{json}");
    }
    Ok(())
}

fn main() {
    init_tracing();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
