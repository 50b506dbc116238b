use crate::types::Point;

// Whether a target is still swelling or already on its way out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthPhase {
    Growing,
    Shrinking,
}

/// A circular hit-zone that grows to a maximum radius, then shrinks away
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: u64, // Spawn sequence number, newer targets have larger ids
    pub position: Point,
    pub radius: f32,
    pub phase: GrowthPhase,
}

impl Target {
    pub fn new(id: u64, position: Point) -> Self {
        Target {
            id,
            position,
            radius: 0.0,
            phase: GrowthPhase::Growing,
        }
    }

    /// Apply one growth step.
    ///
    /// The phase flips to shrinking as soon as the next step would reach
    /// `max_radius`, so the radius never exceeds it. Shrinking is clamped at zero.
    pub fn advance(&mut self, growth_rate: f32, max_radius: f32) {
        if self.phase == GrowthPhase::Growing && self.radius + growth_rate >= max_radius {
            self.phase = GrowthPhase::Shrinking;
        }

        match self.phase {
            GrowthPhase::Growing => self.radius += growth_rate,
            GrowthPhase::Shrinking => self.radius = (self.radius - growth_rate).max(0.0),
        }
    }

    // Boundary counts as inside
    pub fn contains(&self, point: Point) -> bool {
        self.position.distance(point) <= self.radius
    }

    /// A target has expired once it has shrunk back to nothing
    pub fn is_expired(&self) -> bool {
        self.phase == GrowthPhase::Shrinking && self.radius <= 0.0
    }
}
