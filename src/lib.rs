//! Aim Trainer: click circular targets before they shrink away.
//!
//! Core modules are free of any windowing code:
//! - `target`, `spawner`, `session`: target lifecycle and scoring state machine
//! - `score_store`: persisted per-player best scores
//! - `app`: screen state machine driven once per frame
//!
//! `render`, `audio` and `game` bind the core to macroquad.

pub mod app;
pub mod audio;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod game;
pub mod logging;
pub mod render;
pub mod score_store;
pub mod session;
pub mod setup;
pub mod spawner;
pub mod stats;
pub mod target;
pub mod types;
pub mod ui;
pub mod utils;

pub use difficulty::Difficulty;
pub use error::{ParseDifficultyError, ScoreStoreError, SetupError};
pub use score_store::ScoreStore;
pub use session::{Session, SessionEvent, SessionState, TickInput};
pub use setup::SessionConfig;
