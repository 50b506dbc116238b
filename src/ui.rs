// Button layout for every screen, shared by input hit-testing and drawing

use crate::config::WINDOW_WIDTH;
use crate::difficulty::Difficulty;
use crate::types::{Point, Rect};

const CENTER_X: f32 = WINDOW_WIDTH as f32 / 2.0;
const WIDE_W: f32 = 200.0;
const WIDE_H: f32 = 50.0;

pub const NAME_BOX: Rect = Rect::new(CENTER_X - 100.0, 425.0, 200.0, 40.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Start,
    Difficulty(Difficulty),
    Options,
    Continue,
    Restart,
    MainMenu,
    ResetScores,
    ConfirmYes,
    ConfirmNo,
}

impl Button {
    pub fn rect(&self) -> Rect {
        match self {
            Button::Start => Rect::new(CENTER_X - WIDE_W / 2.0, 300.0, WIDE_W, WIDE_H),
            // One column per tier, left to right from easiest
            Button::Difficulty(d) => {
                let column = Difficulty::ALL.iter().position(|t| t == d).unwrap_or(0);
                Rect::new(325.0 + column as f32 * 200.0, 550.0, 150.0, 50.0)
            }
            // Sits in the HUD strip
            Button::Options => Rect::new(975.0, 5.0, 110.0, 40.0),
            Button::Continue => Rect::new(CENTER_X - WIDE_W / 2.0, 250.0, WIDE_W, WIDE_H),
            Button::Restart => Rect::new(CENTER_X - WIDE_W / 2.0, 400.0, WIDE_W, WIDE_H),
            Button::MainMenu => Rect::new(CENTER_X - WIDE_W / 2.0, 600.0, WIDE_W, WIDE_H),
            Button::ResetScores => Rect::new(850.0, 600.0, 230.0, WIDE_H),
            Button::ConfirmYes => Rect::new(325.0, 400.0, WIDE_W, WIDE_H),
            Button::ConfirmNo => Rect::new(725.0, 400.0, WIDE_W, WIDE_H),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Button::Start => "Start",
            Button::Difficulty(d) => d.label(),
            Button::Options => "Options",
            Button::Continue => "Continue",
            Button::Restart => "Restart",
            Button::MainMenu => "Main Menu",
            Button::ResetScores => "Reset High Scores",
            Button::ConfirmYes => "Yes",
            Button::ConfirmNo => "No",
        }
    }
}

/// Which set of buttons a screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    MainMenu,
    Hud,
    Options,
    GameOver,
    ConfirmReset,
}

impl Panel {
    pub fn buttons(&self) -> &'static [Button] {
        match self {
            Panel::MainMenu => &[
                Button::Start,
                Button::Difficulty(Difficulty::Easy),
                Button::Difficulty(Difficulty::Medium),
                Button::Difficulty(Difficulty::Hard),
            ],
            Panel::Hud => &[Button::Options],
            Panel::Options => &[Button::Continue, Button::Restart, Button::MainMenu],
            Panel::GameOver => &[Button::MainMenu, Button::ResetScores],
            Panel::ConfirmReset => &[Button::ConfirmYes, Button::ConfirmNo],
        }
    }

    pub fn hit_test(&self, point: Point) -> Option<Button> {
        self.buttons()
            .iter()
            .copied()
            .find(|b| b.rect().contains(point))
    }
}
