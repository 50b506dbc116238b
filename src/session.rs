//! One play-through: owns the live targets, applies clicks and expiries each
//! tick, and keeps the running tallies until the player runs out of lives.

use crate::difficulty::Difficulty;
use crate::setup::SessionConfig;
use crate::spawner::Spawner;
use crate::stats::{self, SessionSummary};
use crate::target::Target;
use crate::types::Point;
use crate::debug_session;
use log::info;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminal,
}

/// Input for a single fixed tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Time covered by this tick
    pub dt: Duration,
    /// Pointer clicks since the previous tick, in the order they happened
    pub clicks: Vec<Point>,
}

impl TickInput {
    pub fn idle(dt: Duration) -> Self {
        TickInput {
            dt,
            clicks: Vec::new(),
        }
    }
}

/// Things that happened during a tick, for sound and effects
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Spawned { id: u64 },
    Hit { id: u64, position: Point },
    Missed { id: u64 },
    Ended(SessionSummary),
}

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    spawner: Spawner,
    targets: Vec<Target>,
    elapsed: Duration,
    hits: u32,
    clicks: u32,
    misses: u32,
    state: SessionState,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let spawner = match config.seed {
            Some(seed) => Spawner::with_seed(config.difficulty, config.area, seed),
            None => Spawner::new(config.difficulty, config.area),
        };
        info!(
            "Session started for '{}' on {} ({} lives, spawn every {} ms)",
            config.player,
            config.difficulty,
            config.lives,
            spawner.interval().as_millis()
        );
        Session {
            config,
            spawner,
            targets: Vec::new(),
            elapsed: Duration::ZERO,
            hits: 0,
            clicks: 0,
            misses: 0,
            state: SessionState::Running,
        }
    }

    /// Advance the session by one fixed step.
    ///
    /// Order: spawn check, target growth, expiry, clicks, clock, loss check.
    /// A terminal session ignores further ticks.
    pub fn tick(&mut self, input: &TickInput) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.state == SessionState::Terminal {
            return events;
        }

        // Phase 1: spawn
        for target in self.spawner.update(input.dt) {
            events.push(SessionEvent::Spawned { id: target.id });
            self.targets.push(target);
        }

        // Phase 2: growth
        for target in self.targets.iter_mut() {
            target.advance(self.config.growth_rate, self.config.max_radius);
        }

        // Phase 3: expiry
        let (expired, alive): (Vec<Target>, Vec<Target>) = std::mem::take(&mut self.targets)
            .into_iter()
            .partition(Target::is_expired);
        self.targets = alive;
        for target in expired {
            self.misses += 1;
            debug_session!("Target {} expired, misses now {}", target.id, self.misses);
            events.push(SessionEvent::Missed { id: target.id });
        }

        // Phase 4: clicks, each credits at most one target
        for &point in &input.clicks {
            self.clicks += 1;
            if let Some(target) = self.take_hit(point) {
                self.hits += 1;
                debug_session!("Hit target {} at ({:.1}, {:.1})", target.id, point.x, point.y);
                events.push(SessionEvent::Hit {
                    id: target.id,
                    position: target.position,
                });
            }
        }

        self.elapsed += input.dt;

        if self.misses >= self.config.lives {
            self.state = SessionState::Terminal;
            let summary = self.summary();
            info!(
                "Session over for '{}': {} hits, {} clicks, {:.1}s",
                summary.player,
                summary.hits,
                summary.clicks,
                summary.elapsed.as_secs_f64()
            );
            events.push(SessionEvent::Ended(summary));
        }

        events
    }

    /// Let wall-clock time pass without simulating a step.
    ///
    /// Used while the session is paused or when the frame loop skips a backlog;
    /// targets and the spawn timer stay frozen.
    pub fn advance_clock(&mut self, dt: Duration) {
        if self.state == SessionState::Running {
            self.elapsed += dt;
        }
    }

    /// Remove and return the target credited for a click at `point`.
    ///
    /// When targets overlap the newest one (highest spawn id) wins; it is also
    /// the one drawn on top.
    fn take_hit(&mut self, point: Point) -> Option<Target> {
        let index = self
            .targets
            .iter()
            .enumerate()
            .filter(|(_, t)| t.contains(point))
            .max_by_key(|(_, t)| t.id)
            .map(|(i, _)| i)?;
        Some(self.targets.remove(index))
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            player: self.config.player.clone(),
            difficulty: self.config.difficulty,
            elapsed: self.elapsed,
            hits: self.hits,
            clicks: self.clicks,
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state == SessionState::Terminal
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn player(&self) -> &str {
        &self.config.player
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn total_spawned(&self) -> u64 {
        self.spawner.total_spawned()
    }

    pub fn lives_remaining(&self) -> u32 {
        stats::lives_remaining(self.config.lives, self.misses)
    }

    pub fn speed(&self) -> u32 {
        stats::speed(self.hits, self.elapsed)
    }

    pub fn accuracy(&self) -> f64 {
        stats::accuracy(self.hits, self.clicks)
    }
}
