// Error types: score persistence failures, session setup validation, argument parsing

use thiserror::Error;

/// Score store persistence errors
#[derive(Error, Debug)]
pub enum ScoreStoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a session can't start yet
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum SetupError {
    #[error("Please enter your name.")]
    EmptyName,
    #[error("Please select a difficulty.")]
    NoDifficulty,
}

/// A difficulty name that isn't one of the tiers
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct ParseDifficultyError(pub String);
