use crate::config::{TARGET_PADDING, TOP_BAR_HEIGHT, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::debug_spawn;
use crate::difficulty::Difficulty;
use crate::target::Target;
use crate::types::{Point, Rect};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::time::Duration;

/// The region targets may spawn in.
///
/// Built from the window size by removing `padding` from every edge and the
/// HUD strip from the top, so a full-size target never sits under the HUD or
/// hangs off the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub bounds: Rect,
}

impl PlayArea {
    pub fn new(width: f32, height: f32, padding: f32, top_bar: f32) -> Self {
        let x = padding;
        let y = padding + top_bar;
        PlayArea {
            bounds: Rect::new(x, y, (width - padding - x).max(0.0), (height - padding - y).max(0.0)),
        }
    }

    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let b = self.bounds;
        Point::new(
            rng.gen_range(b.x..=b.x + b.w),
            rng.gen_range(b.y..=b.y + b.h),
        )
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        PlayArea::new(
            WINDOW_WIDTH as f32,
            WINDOW_HEIGHT as f32,
            TARGET_PADDING,
            TOP_BAR_HEIGHT,
        )
    }
}

/// Emits one target per elapsed spawn interval.
///
/// Time is fed in by the session each tick; leftover time carries over, so a
/// long tick can produce several targets and no interval is ever dropped.
#[derive(Debug)]
pub struct Spawner {
    interval: Duration,
    accumulator: Duration,
    area: PlayArea,
    next_id: u64,
    rng: StdRng,
}

impl Spawner {
    pub fn new(difficulty: Difficulty, area: PlayArea) -> Self {
        Self::with_rng(difficulty.spawn_interval(), area, StdRng::from_entropy())
    }

    pub fn with_seed(difficulty: Difficulty, area: PlayArea, seed: u64) -> Self {
        Self::with_rng(difficulty.spawn_interval(), area, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(interval: Duration, area: PlayArea, rng: StdRng) -> Self {
        Spawner {
            interval,
            accumulator: Duration::ZERO,
            area,
            next_id: 0,
            rng,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total number of targets produced so far
    pub fn total_spawned(&self) -> u64 {
        self.next_id
    }

    /// Advance the spawn timer by `dt` and return the targets that became due
    pub fn update(&mut self, dt: Duration) -> Vec<Target> {
        let mut spawned = Vec::new();
        // A zero interval would never drain the accumulator
        if self.interval.is_zero() {
            return spawned;
        }

        self.accumulator += dt;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            spawned.push(self.spawn());
        }
        spawned
    }

    fn spawn(&mut self) -> Target {
        let position = self.area.random_point(&mut self.rng);
        let target = Target::new(self.next_id, position);
        self.next_id += 1;
        debug_spawn!(
            "Target {} spawned at ({:.1}, {:.1})",
            target.id,
            position.x,
            position.y
        );
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_default_play_area_excludes_padding_and_top_bar() {
        let area = PlayArea::default();
        assert_approx_eq!(area.bounds.x, TARGET_PADDING);
        assert_approx_eq!(area.bounds.y, TARGET_PADDING + TOP_BAR_HEIGHT);
        assert_approx_eq!(area.bounds.x + area.bounds.w, WINDOW_WIDTH as f32 - TARGET_PADDING);
        assert_approx_eq!(area.bounds.y + area.bounds.h, WINDOW_HEIGHT as f32 - TARGET_PADDING);
    }

    #[test]
    fn test_random_points_stay_inside_area() {
        let area = PlayArea::new(200.0, 150.0, 10.0, 20.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = area.random_point(&mut rng);
            assert!(p.x >= 10.0 && p.x <= 190.0, "x out of range: {}", p.x);
            assert!(p.y >= 30.0 && p.y <= 140.0, "y out of range: {}", p.y);
        }
    }

    #[test]
    fn test_one_target_per_interval() {
        let mut spawner = Spawner::with_seed(Difficulty::Medium, PlayArea::default(), 1);
        assert!(spawner.update(Duration::from_millis(399)).is_empty());
        assert_eq!(spawner.update(Duration::from_millis(1)).len(), 1);
        assert!(spawner.update(Duration::from_millis(200)).is_empty());
        assert_eq!(spawner.update(Duration::from_millis(200)).len(), 1);
        assert_eq!(spawner.total_spawned(), 2);
    }

    #[test]
    fn test_long_tick_catches_up() {
        let mut spawner = Spawner::with_seed(Difficulty::Hard, PlayArea::default(), 2);
        let targets = spawner.update(Duration::from_millis(1000));
        assert_eq!(targets.len(), 4);
        // Ids are handed out in spawn order
        let ids: Vec<u64> = targets.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert!(targets.iter().all(|t| t.radius == 0.0));
    }

    #[test]
    fn test_zero_interval_never_spawns() {
        let mut spawner = Spawner::with_rng(
            Duration::ZERO,
            PlayArea::default(),
            StdRng::seed_from_u64(3),
        );
        assert!(spawner.update(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_seeded_spawners_agree() {
        let mut a = Spawner::with_seed(Difficulty::Easy, PlayArea::default(), 42);
        let mut b = Spawner::with_seed(Difficulty::Easy, PlayArea::default(), 42);
        let ta = a.update(Duration::from_secs(3));
        let tb = b.update(Duration::from_secs(3));
        assert_eq!(ta, tb);
    }
}
