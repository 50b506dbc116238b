//! Session configuration and the main-menu form that produces it.

use crate::config::{GROWTH_RATE, LIVES, MAX_NAME_LEN, MAX_RADIUS};
use crate::difficulty::Difficulty;
use crate::error::SetupError;
use crate::spawner::PlayArea;

/// Everything a session needs to know before it starts
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub player: String,
    pub difficulty: Difficulty,
    pub lives: u32,
    pub max_radius: f32,
    pub growth_rate: f32,
    pub area: PlayArea,
    pub seed: Option<u64>, // Fixed spawn RNG seed, random when None
}

impl SessionConfig {
    /// Build a config with default tuning. The name is trimmed and must not be empty.
    pub fn new(player: &str, difficulty: Difficulty) -> Result<Self, SetupError> {
        let player = player.trim();
        if player.is_empty() {
            return Err(SetupError::EmptyName);
        }
        Ok(SessionConfig {
            player: player.to_string(),
            difficulty,
            lives: LIVES,
            max_radius: MAX_RADIUS,
            growth_rate: GROWTH_RATE,
            area: PlayArea::default(),
            seed: None,
        })
    }

    pub fn with_lives(mut self, lives: u32) -> Self {
        self.lives = lives;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Name entry and difficulty selection state for the main menu
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupForm {
    pub name: String,
    pub difficulty: Option<Difficulty>,
    pub errors: Vec<SetupError>, // Problems found by the last submit attempt
}

impl SetupForm {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push_char(&mut self, c: char) {
        if c.is_control() || self.name.chars().count() >= MAX_NAME_LEN {
            return;
        }
        self.name.push(c);
    }

    pub fn backspace(&mut self) {
        self.name.pop();
    }

    pub fn select(&mut self, difficulty: Difficulty) {
        self.difficulty = Some(difficulty);
    }

    /// Every problem currently preventing a start
    pub fn validate(&self) -> Vec<SetupError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(SetupError::EmptyName);
        }
        if self.difficulty.is_none() {
            errors.push(SetupError::NoDifficulty);
        }
        errors
    }

    /// Try to start. On failure the problems are kept in `errors` for display.
    pub fn submit(&mut self) -> Option<SessionConfig> {
        self.errors = self.validate();
        let difficulty = self.difficulty?;
        if !self.errors.is_empty() {
            return None;
        }
        SessionConfig::new(&self.name, difficulty).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_trims_name() {
        let config = SessionConfig::new("  alice ", Difficulty::Easy).unwrap();
        assert_eq!(config.player, "alice");
        assert_eq!(config.lives, LIVES);
    }

    #[test]
    fn test_config_rejects_blank_name() {
        assert_eq!(
            SessionConfig::new("   ", Difficulty::Hard),
            Err(SetupError::EmptyName)
        );
    }

    #[test]
    fn test_submit_reports_every_problem() {
        let mut form = SetupForm::new();
        assert!(form.submit().is_none());
        assert_eq!(form.errors, vec![SetupError::EmptyName, SetupError::NoDifficulty]);

        form.push_char('b');
        form.push_char('o');
        assert!(form.submit().is_none());
        assert_eq!(form.errors, vec![SetupError::NoDifficulty]);

        form.select(Difficulty::Medium);
        let config = form.submit().expect("form should be valid");
        assert!(form.errors.is_empty());
        assert_eq!(config.player, "bo");
        assert_eq!(config.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_whitespace_name_is_rejected() {
        let mut form = SetupForm::new();
        form.push_char(' ');
        form.select(Difficulty::Easy);
        assert!(form.submit().is_none());
        assert_eq!(form.errors, vec![SetupError::EmptyName]);
    }

    #[test]
    fn test_name_editing() {
        let mut form = SetupForm::new();
        for c in "abc\u{8}".chars() {
            form.push_char(c);
        }
        assert_eq!(form.name, "abc");
        form.backspace();
        assert_eq!(form.name, "ab");
        for _ in 0..(MAX_NAME_LEN * 2) {
            form.push_char('x');
        }
        assert_eq!(form.name.chars().count(), MAX_NAME_LEN);
    }
}
