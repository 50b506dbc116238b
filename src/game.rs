use crate::app::{App, FrameInput};
use crate::audio::AudioManager;
use crate::render::Renderer;
use crate::types::Point;
use log::info;
use macroquad::prelude::*;
use std::time::Duration;

/// Poll macroquad for everything that happened since the last frame
fn collect_input() -> FrameInput {
    let mut typed = Vec::new();
    while let Some(c) = get_char_pressed() {
        typed.push(c);
    }

    let mut clicks = Vec::new();
    if is_mouse_button_pressed(MouseButton::Left) {
        let (x, y) = mouse_position();
        clicks.push(Point::new(x, y));
    }

    FrameInput {
        dt: Duration::from_secs_f32(get_frame_time().max(0.0)),
        clicks,
        typed,
        backspace: is_key_pressed(KeyCode::Backspace),
        escape: is_key_pressed(KeyCode::Escape),
    }
}

/// Run the main loop until the window is closed
pub async fn run(app: &mut App, renderer: &Renderer, audio: &AudioManager) {
    info!("Starting main loop...");
    prevent_quit();

    while !is_quit_requested() {
        let input = collect_input();
        let events = app.update(&input);
        audio.play_events(&events);

        renderer.draw_frame(app);
        next_frame().await;
    }

    info!("Exiting Aim Trainer.");
}
