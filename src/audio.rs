use crate::session::SessionEvent;
use log::warn;
use macroquad::audio::{Sound, load_sound, play_sound_once};

#[derive(Default)]
pub struct AudioManager {
    hit_sound: Option<Sound>,
    miss_sound: Option<Sound>,
    game_over_sound: Option<Sound>,
}

// Missing files only cost the matching effect
async fn load_optional(path: &str, what: &str) -> Option<Sound> {
    load_sound(path)
        .await
        .map_err(|e| {
            warn!("Failed to load {} sound '{}': {}", what, path, e);
            e
        })
        .ok()
}

impl AudioManager {
    pub fn new() -> Self {
        Default::default()
    }

    // Load all required sound assets
    pub async fn load_assets(&mut self) {
        self.hit_sound = load_optional("assets/hit.ogg", "hit").await;
        self.miss_sound = load_optional("assets/miss.ogg", "miss").await;
        self.game_over_sound = load_optional("assets/game_over.ogg", "game over").await;
    }

    /// Play whatever fits the events of the last frame
    pub fn play_events(&self, events: &[SessionEvent]) {
        for event in events {
            let sound = match event {
                SessionEvent::Hit { .. } => &self.hit_sound,
                SessionEvent::Missed { .. } => &self.miss_sound,
                SessionEvent::Ended(_) => &self.game_over_sound,
                SessionEvent::Spawned { .. } => continue,
            };
            if let Some(sound) = sound {
                play_sound_once(sound);
            }
        }
    }
}
