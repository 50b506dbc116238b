use crate::app::{App, GameOverView, Screen};
use crate::config::{TOP_BAR_HEIGHT, WINDOW_WIDTH};
use crate::error::SetupError;
use crate::score_store::MergeOutcome;
use crate::session::Session;
use crate::setup::SetupForm;
use crate::target::Target;
use crate::types::Rect;
use crate::ui::{Button, NAME_BOX, Panel};
use crate::utils::{centered, format_percent, format_time};
use macroquad::prelude::*;

const LABEL_SIZE: u16 = 24;
const H1_SIZE: u16 = 36;
const TITLE_SIZE: u16 = 48;

fn bg_color() -> Color {
    Color::from_rgba(0, 25, 40, 255)
}

// Ring colors, outermost first
const TARGET_RINGS: [(f32, Color); 4] = [(1.0, RED), (0.8, WHITE), (0.6, RED), (0.4, WHITE)];

// Draws the current screen with macroquad
pub struct Renderer {
    ui_font: Option<Font>, // Falls back to the built-in font when None
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { ui_font: None }
    }

    // Load the custom UI font
    pub async fn load_ui_font(&mut self) {
        match load_ttf_font("assets/default.ttf").await {
            Ok(font) => self.ui_font = Some(font),
            Err(e) => log::warn!("Failed to load UI font assets/default.ttf, using built-in: {}", e),
        }
    }

    pub fn draw_frame(&self, app: &App) {
        clear_background(bg_color());
        match app.screen() {
            Screen::MainMenu(form) => self.draw_main_menu(form),
            Screen::Playing(session) => {
                Self::draw_targets(session.targets());
                self.draw_top_bar(session);
            }
            Screen::Options(_) => self.draw_options(),
            Screen::GameOver(view) => self.draw_game_over(view),
            Screen::ConfirmReset(_) => self.draw_confirm_reset(),
        }
    }

    fn text(&self, text: &str, x: f32, y: f32, size: u16, color: Color) {
        // macroquad draws text from the baseline, callers pass the top edge
        let dims = measure_text(text, self.ui_font.as_ref(), size, 1.0);
        draw_text_ex(
            text,
            x,
            y + dims.offset_y,
            TextParams {
                font: self.ui_font.as_ref(),
                font_size: size,
                color,
                ..Default::default()
            },
        );
    }

    fn text_width(&self, text: &str, size: u16) -> f32 {
        measure_text(text, self.ui_font.as_ref(), size, 1.0).width
    }

    fn centered_text(&self, text: &str, y: f32, size: u16, color: Color) {
        let x = centered(0.0, WINDOW_WIDTH as f32, self.text_width(text, size));
        self.text(text, x, y, size, color);
    }

    // Filled button, or outlined when `selected`
    fn button(&self, button: Button, selected: bool) {
        let Rect { x, y, w, h } = button.rect();
        let (fill, ink) = if selected {
            (bg_color(), WHITE)
        } else {
            (WHITE, bg_color())
        };
        draw_rectangle(x, y, w, h, fill);
        if selected {
            draw_rectangle_lines(x, y, w, h, 5.0, WHITE);
        }
        let label = button.label();
        let dims = measure_text(label, self.ui_font.as_ref(), LABEL_SIZE, 1.0);
        self.text(
            label,
            centered(x, w, dims.width),
            centered(y, h, dims.height),
            LABEL_SIZE,
            ink,
        );
    }

    fn draw_main_menu(&self, form: &SetupForm) {
        self.centered_text("Aim Trainer", 150.0, TITLE_SIZE, WHITE);
        self.button(Button::Start, false);

        self.text("Enter your name:", NAME_BOX.x, 385.0, LABEL_SIZE, WHITE);
        draw_rectangle_lines(NAME_BOX.x, NAME_BOX.y, NAME_BOX.w, NAME_BOX.h, 2.0, WHITE);
        self.text(&form.name, NAME_BOX.x + 10.0, NAME_BOX.y + 8.0, LABEL_SIZE, WHITE);

        self.text("Select Difficulty:", NAME_BOX.x, 505.0, LABEL_SIZE, WHITE);
        for &button in Panel::MainMenu.buttons() {
            if let Button::Difficulty(d) = button {
                self.button(button, form.difficulty == Some(d));
            }
        }

        for error in &form.errors {
            let y = match error {
                SetupError::EmptyName => 472.0,
                SetupError::NoDifficulty => 610.0,
            };
            self.centered_text(&error.to_string(), y, LABEL_SIZE, RED);
        }
    }

    fn draw_targets(targets: &[Target]) {
        for target in targets {
            for (scale, color) in TARGET_RINGS {
                draw_circle(
                    target.position.x,
                    target.position.y,
                    target.radius * scale,
                    color,
                );
            }
        }
    }

    fn draw_top_bar(&self, session: &Session) {
        draw_rectangle(0.0, 0.0, WINDOW_WIDTH as f32, TOP_BAR_HEIGHT, GRAY);
        let labels = [
            format!("Time: {}", format_time(session.elapsed())),
            format!("Speed: {} t/s", session.speed()),
            format!("Hits: {}", session.hits()),
            format!("Lives: {}", session.lives_remaining()),
        ];
        for (i, label) in labels.iter().enumerate() {
            self.text(label, 5.0 + i as f32 * 240.0, 12.0, LABEL_SIZE, BLACK);
        }
        self.button(Button::Options, false);
    }

    fn draw_options(&self) {
        self.centered_text("Options", 150.0, TITLE_SIZE, WHITE);
        for &button in Panel::Options.buttons() {
            self.button(button, false);
        }
    }

    fn draw_game_over(&self, view: &GameOverView) {
        let summary = &view.summary;
        self.centered_text("Game Over", 30.0, TITLE_SIZE, WHITE);

        self.text("Stats", 150.0, 100.0, TITLE_SIZE, WHITE);
        let stats = [
            format!("Time: {}", format_time(summary.elapsed)),
            format!("Speed: {} t/s", summary.speed()),
            format!("Hits: {}", summary.hits),
            format!("Accuracy: {}", format_percent(summary.accuracy())),
        ];
        for (i, line) in stats.iter().enumerate() {
            self.text(line, 50.0, 200.0 + i as f32 * 90.0, LABEL_SIZE, WHITE);
        }

        let note = match view.outcome {
            Some(MergeOutcome::Created) => "First score recorded!".to_string(),
            Some(MergeOutcome::Improved { previous }) => format!("New best! (was {})", previous),
            Some(MergeOutcome::Kept { best }) => format!("Personal best: {}", best),
            None => "High scores could not be saved".to_string(),
        };
        self.text(&note, 50.0, 560.0, LABEL_SIZE, YELLOW);

        self.text("High Scores", 820.0, 100.0, TITLE_SIZE, WHITE);
        if view.leaderboard.is_empty() {
            self.text("No scores yet", 850.0, 200.0, LABEL_SIZE, LIGHTGRAY);
        }
        for (i, row) in view.leaderboard.iter().enumerate() {
            let line = format!(
                "{}. {} ({}): {}",
                row.rank, row.player, row.record.difficulty, row.record.hits
            );
            self.text(&line, 850.0, 200.0 + i as f32 * 30.0, LABEL_SIZE, WHITE);
        }

        for &button in Panel::GameOver.buttons() {
            self.button(button, false);
        }
    }

    fn draw_confirm_reset(&self) {
        self.centered_text(
            "Are you sure you want to reset your high scores?",
            150.0,
            H1_SIZE,
            WHITE,
        );
        for &button in Panel::ConfirmReset.buttons() {
            self.button(button, false);
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
