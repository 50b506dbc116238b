use aim_trainer::app::{App, SessionOverrides};
use aim_trainer::audio::AudioManager;
use aim_trainer::config::{self, WINDOW_HEIGHT, WINDOW_WIDTH};
use aim_trainer::difficulty::Difficulty;
use aim_trainer::logging;
use aim_trainer::render::Renderer;
use aim_trainer::{ScoreStore, game};
use clap::Parser;
use log::{info, warn};
use macroquad::prelude::*;
use std::path::PathBuf;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// High score file (defaults to the platform data directory)
    #[arg(long)]
    scores_file: Option<PathBuf>,

    /// Lives per session
    #[arg(long, default_value_t = config::LIVES)]
    lives: u32,

    /// Difficulty preselected on the main menu (easy, medium, hard)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Fixed seed for target placement
    #[arg(long)]
    seed: Option<u64>,

    /// Debug filter to specify log topics (e.g., "session,spawn")
    /// Available topics: session, spawn, scores, ui
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Aim Trainer".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init_logger(logging::parse_level(&args.log_level), args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    if let Some(filter) = &args.debug_filter {
        for topic in logging::parse_debug_filter(filter) {
            if !logging::TOPICS.contains(&topic.as_str()) {
                warn!("Unknown debug topic '{}'", topic);
            }
        }
    }

    info!("Initializing Aim Trainer...");

    let path = args.scores_file.unwrap_or_else(ScoreStore::default_path);
    let store = ScoreStore::open(path);
    info!(
        "Using high scores at {} ({} players)",
        store.path().display(),
        store.len()
    );

    let overrides = SessionOverrides {
        lives: Some(args.lives),
        seed: args.seed,
        difficulty: args.difficulty,
    };
    let mut app = App::new(store, overrides);

    let mut renderer = Renderer::new();
    renderer.load_ui_font().await;
    let mut audio = AudioManager::new();
    audio.load_assets().await;

    game::run(&mut app, &renderer, &audio).await;
}
