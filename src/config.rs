//! Configuration constants for the aim trainer.

// Window and layout
pub const WINDOW_WIDTH: i32 = 1200;
pub const WINDOW_HEIGHT: i32 = 700;
pub const TOP_BAR_HEIGHT: f32 = 50.0; // HUD strip, targets never spawn under it
pub const TARGET_PADDING: f32 = 30.0; // Margin kept clear on every edge
pub const FRAME_RATE: u32 = 60; // Target frame rate (ticks per second)

// Target tuning
pub const MAX_RADIUS: f32 = 30.0;
pub const GROWTH_RATE: f32 = 0.2; // Radius change per tick

// Game rules
pub const LIVES: u32 = 3;

// Spawn intervals per difficulty, in milliseconds
pub const EASY_SPAWN_INTERVAL_MS: u64 = 600;
pub const MEDIUM_SPAWN_INTERVAL_MS: u64 = 400;
pub const HARD_SPAWN_INTERVAL_MS: u64 = 250;

// High scores
pub const HIGH_SCORES_FILE: &str = "high_scores.json";
pub const TOP_SCORES_SHOWN: usize = 5;

// Name entry
pub const MAX_NAME_LEN: usize = 16;

// Upper bound on fixed steps run in one frame so a stalled window can't spiral
pub const MAX_STEPS_PER_FRAME: u32 = 8;
