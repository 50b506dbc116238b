//! Application controller: the screen state machine.
//!
//! One top-level loop feeds a [`FrameInput`] per rendered frame into
//! [`App::update`]. Each screen handler consumes the current screen and returns
//! the next one, so screens never call back into each other.

use crate::config::{FRAME_RATE, MAX_STEPS_PER_FRAME, TOP_SCORES_SHOWN};
use crate::debug_ui;
use crate::difficulty::Difficulty;
use crate::score_store::{MergeOutcome, RankedScore, ScoreStore};
use crate::session::{Session, SessionEvent, TickInput};
use crate::setup::{SessionConfig, SetupForm};
use crate::stats::SessionSummary;
use crate::types::Point;
use crate::ui::{Button, Panel};
use log::{error, info};
use std::time::Duration;

/// Everything the windowing layer observed during one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub dt: Duration,
    pub clicks: Vec<Point>,
    pub typed: Vec<char>,
    pub backspace: bool,
    pub escape: bool,
}

/// Results shown after a session ends
#[derive(Debug, Clone)]
pub struct GameOverView {
    pub summary: SessionSummary,
    pub outcome: Option<MergeOutcome>, // None when saving failed
    pub leaderboard: Vec<RankedScore>,
}

#[derive(Debug)]
pub enum Screen {
    MainMenu(SetupForm),
    Playing(Session),
    Options(Session),
    GameOver(GameOverView),
    ConfirmReset(GameOverView),
}

impl Screen {
    pub fn panel(&self) -> Panel {
        match self {
            Screen::MainMenu(_) => Panel::MainMenu,
            Screen::Playing(_) => Panel::Hud,
            Screen::Options(_) => Panel::Options,
            Screen::GameOver(_) => Panel::GameOver,
            Screen::ConfirmReset(_) => Panel::ConfirmReset,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::MainMenu(_) => "main menu",
            Screen::Playing(_) => "playing",
            Screen::Options(_) => "options",
            Screen::GameOver(_) => "game over",
            Screen::ConfirmReset(_) => "confirm reset",
        }
    }
}

/// Overrides applied to every session started from the menu
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOverrides {
    pub lives: Option<u32>,
    pub seed: Option<u64>,
    pub difficulty: Option<Difficulty>, // preselected on the main menu
}

pub struct App {
    screen: Screen,
    store: ScoreStore,
    overrides: SessionOverrides,
    step: Duration,
    accumulator: Duration,
    pending_clicks: Vec<Point>,
}

impl App {
    pub fn new(store: ScoreStore, overrides: SessionOverrides) -> Self {
        App {
            screen: Self::menu_form(&overrides),
            store,
            overrides,
            step: Duration::from_secs(1) / FRAME_RATE,
            accumulator: Duration::ZERO,
            pending_clicks: Vec::new(),
        }
    }

    fn menu_form(overrides: &SessionOverrides) -> Screen {
        let mut form = SetupForm::new();
        if let Some(difficulty) = overrides.difficulty {
            form.select(difficulty);
        }
        Screen::MainMenu(form)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn store(&self) -> &ScoreStore {
        &self.store
    }

    /// Process one frame. Returns the session events produced, for sound.
    pub fn update(&mut self, input: &FrameInput) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let current = std::mem::replace(&mut self.screen, Screen::MainMenu(SetupForm::new()));
        let before = current.name();

        self.screen = match current {
            Screen::MainMenu(form) => self.main_menu(form, input),
            Screen::Playing(session) => self.playing(session, input, &mut events),
            Screen::Options(session) => self.options(session, input),
            Screen::GameOver(view) => self.game_over(view, input),
            Screen::ConfirmReset(view) => self.confirm_reset(view, input),
        };

        if self.screen.name() != before {
            debug_ui!("Screen: {} -> {}", before, self.screen.name());
        }
        events
    }

    fn main_menu(&mut self, mut form: SetupForm, input: &FrameInput) -> Screen {
        for &c in &input.typed {
            form.push_char(c);
        }
        if input.backspace {
            form.backspace();
        }

        for &click in &input.clicks {
            match Panel::MainMenu.hit_test(click) {
                Some(Button::Difficulty(d)) => form.select(d),
                Some(Button::Start) => {
                    if let Some(config) = form.submit() {
                        return self.start(config);
                    }
                    debug_ui!("Start rejected: {:?}", form.errors);
                }
                _ => {}
            }
        }
        Screen::MainMenu(form)
    }

    fn start(&mut self, mut config: SessionConfig) -> Screen {
        if let Some(lives) = self.overrides.lives {
            config.lives = lives;
        }
        if self.overrides.seed.is_some() {
            config.seed = self.overrides.seed;
        }
        self.accumulator = Duration::ZERO;
        self.pending_clicks.clear();
        Screen::Playing(Session::new(config))
    }

    fn playing(
        &mut self,
        mut session: Session,
        input: &FrameInput,
        events: &mut Vec<SessionEvent>,
    ) -> Screen {
        if input.escape {
            return Screen::Options(session);
        }
        for &click in &input.clicks {
            // The options button is chrome, not a shot
            if Panel::Hud.hit_test(click) == Some(Button::Options) {
                return Screen::Options(session);
            }
            self.pending_clicks.push(click);
        }

        // Fixed steps; clicks ride on the first step that runs
        self.accumulator += input.dt;
        let mut steps = 0;
        while self.accumulator >= self.step && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= self.step;
            steps += 1;
            let tick = TickInput {
                dt: self.step,
                clicks: std::mem::take(&mut self.pending_clicks),
            };
            for event in session.tick(&tick) {
                if let SessionEvent::Ended(summary) = &event {
                    let view = self.finish(summary.clone());
                    events.push(event);
                    return Screen::GameOver(view);
                }
                events.push(event);
            }
        }
        // A stalled frame isn't fast-forwarded, but its time still counts
        if steps == MAX_STEPS_PER_FRAME && self.accumulator >= self.step {
            session.advance_clock(std::mem::take(&mut self.accumulator));
        }
        Screen::Playing(session)
    }

    // Merge the final tallies exactly once and build the results view
    fn finish(&mut self, summary: SessionSummary) -> GameOverView {
        self.store.load();
        let outcome = match self.store.record(&summary) {
            Ok(outcome) => {
                info!("High score merge for '{}': {:?}", summary.player, outcome);
                Some(outcome)
            }
            Err(e) => {
                error!("Failed to save high scores to {}: {}", self.store.path().display(), e);
                None
            }
        };
        GameOverView {
            summary,
            outcome,
            leaderboard: self.store.top_n(TOP_SCORES_SHOWN),
        }
    }

    fn options(&mut self, mut session: Session, input: &FrameInput) -> Screen {
        // The clock keeps running while paused; targets stay frozen
        session.advance_clock(input.dt);
        if input.escape {
            return self.resume(session);
        }
        for &click in &input.clicks {
            match Panel::Options.hit_test(click) {
                Some(Button::Continue) => return self.resume(session),
                Some(Button::Restart) => {
                    info!("Restarting session for '{}'", session.player());
                    return self.start(session.config().clone());
                }
                Some(Button::MainMenu) => return Self::menu_form(&self.overrides),
                _ => {}
            }
        }
        Screen::Options(session)
    }

    // Shots fired in the frame that opened the options screen are still
    // queued; they land on the first step after resuming.
    fn resume(&mut self, session: Session) -> Screen {
        Screen::Playing(session)
    }

    fn game_over(&mut self, view: GameOverView, input: &FrameInput) -> Screen {
        for &click in &input.clicks {
            match Panel::GameOver.hit_test(click) {
                Some(Button::MainMenu) => return Self::menu_form(&self.overrides),
                Some(Button::ResetScores) => return Screen::ConfirmReset(view),
                _ => {}
            }
        }
        Screen::GameOver(view)
    }

    fn confirm_reset(&mut self, mut view: GameOverView, input: &FrameInput) -> Screen {
        for &click in &input.clicks {
            match Panel::ConfirmReset.hit_test(click) {
                Some(Button::ConfirmYes) => {
                    if let Err(e) = self.store.reset() {
                        error!("Failed to reset high scores: {}", e);
                    }
                    return Self::menu_form(&self.overrides);
                }
                Some(Button::ConfirmNo) => {
                    self.store.load();
                    view.leaderboard = self.store.top_n(TOP_SCORES_SHOWN);
                    return Screen::GameOver(view);
                }
                _ => {}
            }
        }
        Screen::ConfirmReset(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HIGH_SCORES_FILE;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

    fn scratch_store() -> ScoreStore {
        let dir = std::env::temp_dir().join(format!(
            "aim-trainer-app-{}-{}",
            std::process::id(),
            NEXT_DIR.fetch_add(1, Ordering::SeqCst)
        ));
        let _ = fs::remove_dir_all(&dir);
        ScoreStore::open(dir.join(HIGH_SCORES_FILE))
    }

    fn click(button: Button) -> FrameInput {
        FrameInput {
            clicks: vec![button.rect().center()],
            ..Default::default()
        }
    }

    fn typed(text: &str) -> FrameInput {
        FrameInput {
            typed: text.chars().collect(),
            ..Default::default()
        }
    }

    fn frame(dt: Duration) -> FrameInput {
        FrameInput {
            dt,
            ..Default::default()
        }
    }

    // Drive the menu into a running session
    fn start_playing(app: &mut App, name: &str, difficulty: Difficulty) {
        app.update(&typed(name));
        app.update(&click(Button::Difficulty(difficulty)));
        app.update(&click(Button::Start));
        assert!(matches!(app.screen(), Screen::Playing(_)));
    }

    fn run_until_game_over(app: &mut App) {
        for _ in 0..100_000 {
            if matches!(app.screen(), Screen::GameOver(_)) {
                return;
            }
            app.update(&frame(Duration::from_millis(16)));
        }
        panic!("session never ended");
    }

    #[test]
    fn test_start_requires_name_and_difficulty() {
        let mut app = App::new(scratch_store(), SessionOverrides::default());
        app.update(&click(Button::Start));
        match app.screen() {
            Screen::MainMenu(form) => assert_eq!(form.errors.len(), 2),
            other => panic!("unexpected screen {}", other.name()),
        }

        app.update(&typed("   "));
        app.update(&click(Button::Difficulty(Difficulty::Easy)));
        app.update(&click(Button::Start));
        assert!(matches!(app.screen(), Screen::MainMenu(_)));
    }

    #[test]
    fn test_options_pause_and_continue() {
        let mut app = App::new(scratch_store(), SessionOverrides::default());
        start_playing(&mut app, "ann", Difficulty::Easy);
        app.update(&frame(Duration::from_millis(100)));

        app.update(&click(Button::Options));
        let elapsed = match app.screen() {
            Screen::Options(session) => {
                assert_eq!(session.clicks(), 0);
                session.elapsed()
            }
            other => panic!("unexpected screen {}", other.name()),
        };

        // Wall-clock time keeps running on the options screen, targets don't move
        app.update(&frame(Duration::from_secs(10)));
        app.update(&click(Button::Continue));
        match app.screen() {
            Screen::Playing(session) => {
                assert_eq!(session.elapsed(), elapsed + Duration::from_secs(10));
            }
            other => panic!("unexpected screen {}", other.name()),
        }
    }

    #[test]
    fn test_stalled_frame_still_counts_its_time() {
        let mut app = App::new(scratch_store(), SessionOverrides::default());
        start_playing(&mut app, "ann", Difficulty::Easy);
        app.update(&frame(Duration::from_secs(1)));
        match app.screen() {
            Screen::Playing(session) => {
                assert_eq!(session.elapsed(), Duration::from_secs(1));
                // Only the capped number of steps was simulated
                assert!(session.targets().is_empty());
            }
            other => panic!("unexpected screen {}", other.name()),
        }
    }

    #[test]
    fn test_shot_before_pause_lands_after_resume() {
        let mut app = App::new(scratch_store(), SessionOverrides::default());
        start_playing(&mut app, "ann", Difficulty::Easy);
        app.update(&FrameInput {
            clicks: vec![Point::new(600.0, 400.0), Button::Options.rect().center()],
            ..Default::default()
        });
        assert!(matches!(app.screen(), Screen::Options(_)));
        app.update(&click(Button::Continue));
        app.update(&frame(Duration::from_millis(20)));
        match app.screen() {
            Screen::Playing(session) => assert_eq!(session.clicks(), 1),
            other => panic!("unexpected screen {}", other.name()),
        }
    }

    #[test]
    fn test_difficulty_override_preselects_menu() {
        let overrides = SessionOverrides {
            difficulty: Some(Difficulty::Medium),
            ..Default::default()
        };
        let mut app = App::new(scratch_store(), overrides);
        match app.screen() {
            Screen::MainMenu(form) => assert_eq!(form.difficulty, Some(Difficulty::Medium)),
            other => panic!("unexpected screen {}", other.name()),
        }

        // Only a name is needed now
        app.update(&typed("ann"));
        app.update(&click(Button::Start));
        match app.screen() {
            Screen::Playing(session) => assert_eq!(session.difficulty(), Difficulty::Medium),
            other => panic!("unexpected screen {}", other.name()),
        }

        app.update(&click(Button::Options));
        app.update(&click(Button::MainMenu));
        match app.screen() {
            Screen::MainMenu(form) => assert_eq!(form.difficulty, Some(Difficulty::Medium)),
            other => panic!("unexpected screen {}", other.name()),
        }
    }

    #[test]
    fn test_restart_keeps_player_and_difficulty() {
        let mut app = App::new(scratch_store(), SessionOverrides::default());
        start_playing(&mut app, "ann", Difficulty::Hard);
        app.update(&frame(Duration::from_millis(100)));
        app.update(&click(Button::Options));
        app.update(&click(Button::Restart));
        match app.screen() {
            Screen::Playing(session) => {
                assert_eq!(session.player(), "ann");
                assert_eq!(session.difficulty(), Difficulty::Hard);
                assert_eq!(session.elapsed(), Duration::ZERO);
            }
            other => panic!("unexpected screen {}", other.name()),
        }
    }

    #[test]
    fn test_game_over_records_score_once() {
        let overrides = SessionOverrides {
            lives: Some(1),
            seed: Some(9),
            ..Default::default()
        };
        let mut app = App::new(scratch_store(), overrides);
        start_playing(&mut app, "zoe", Difficulty::Hard);
        run_until_game_over(&mut app);

        match app.screen() {
            Screen::GameOver(view) => {
                assert_eq!(view.summary.player, "zoe");
                assert_eq!(view.outcome, Some(MergeOutcome::Created));
                assert_eq!(view.leaderboard.len(), 1);
                assert_eq!(view.leaderboard[0].player, "zoe");
            }
            other => panic!("unexpected screen {}", other.name()),
        }

        // Lingering on the results screen doesn't merge again
        app.update(&frame(Duration::from_secs(1)));
        let reloaded = ScoreStore::open(app.store().path());
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get("zoe").unwrap().difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_reset_flow() {
        let overrides = SessionOverrides {
            lives: Some(1),
            seed: Some(3),
            ..Default::default()
        };
        let mut app = App::new(scratch_store(), overrides);
        start_playing(&mut app, "kim", Difficulty::Hard);
        run_until_game_over(&mut app);

        app.update(&click(Button::ResetScores));
        assert!(matches!(app.screen(), Screen::ConfirmReset(_)));
        app.update(&click(Button::ConfirmNo));
        assert!(matches!(app.screen(), Screen::GameOver(_)));
        assert_eq!(app.store().len(), 1);

        app.update(&click(Button::ResetScores));
        app.update(&click(Button::ConfirmYes));
        assert!(matches!(app.screen(), Screen::MainMenu(_)));
        assert!(app.store().is_empty());
        assert!(ScoreStore::open(app.store().path()).is_empty());
    }

    #[test]
    fn test_hud_click_is_not_a_shot() {
        let mut app = App::new(scratch_store(), SessionOverrides::default());
        start_playing(&mut app, "ann", Difficulty::Easy);
        app.update(&click(Button::Options));
        app.update(&click(Button::Continue));
        app.update(&FrameInput {
            dt: Duration::from_millis(20),
            clicks: vec![Point::new(600.0, 400.0)],
            ..Default::default()
        });
        match app.screen() {
            Screen::Playing(session) => assert_eq!(session.clicks(), 1),
            other => panic!("unexpected screen {}", other.name()),
        }
    }
}
