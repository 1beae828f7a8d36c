//! Procedural spawning with score-driven difficulty
//!
//! Asteroids drop in from just above the field, faster as the score grows;
//! the asteroid cap also grows with score. Power-ups drift down on a fixed
//! schedule.

use std::f32::consts::PI;

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{Asteroid, PowerUp, PowerUpKind};
use crate::config::{AsteroidConfig, GameConfig, PowerUpConfig};

/// Speed multiplier for newly spawned asteroids at `score`
pub fn speed_multiplier(score: u64, tuning: &AsteroidConfig) -> f32 {
    1.0 + score as f32 / tuning.speed_score_step as f32
}

/// Maximum live asteroids at `score`
pub fn asteroid_cap(score: u64, tuning: &AsteroidConfig) -> usize {
    tuning.base_cap + (score / tuning.cap_score_step) as usize
}

/// Owns the session's random source and turns rolls into entities
pub struct Spawner {
    rng: Box<dyn RandomSource>,
}

impl std::fmt::Debug for Spawner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spawner").finish_non_exhaustive()
    }
}

impl Spawner {
    pub fn new(rng: Box<dyn RandomSource>) -> Self {
        Self { rng }
    }

    /// Whether a spawn attempt is due this frame, and room remains
    pub fn asteroid_due(&self, frame: u64, live: usize, score: u64, tuning: &AsteroidConfig) -> bool {
        frame % tuning.spawn_interval == 0 && live < asteroid_cap(score, tuning)
    }

    pub fn power_up_due(&self, frame: u64, tuning: &PowerUpConfig) -> bool {
        frame % tuning.spawn_interval == 0
    }

    /// A fresh asteroid entering from the top of the field
    pub fn asteroid(&mut self, score: u64, config: &GameConfig) -> Asteroid {
        let tuning = &config.asteroid;
        let field = config.field.size();

        let size = self.rng.range(tuning.min_size, tuning.max_size);
        // Top quarter, pushed up by half the rock so it slides in from the edge
        let pos = Vec2::new(
            self.rng.unit() * field.x,
            self.rng.unit() * field.y / 4.0 - size / 2.0,
        );
        let speed = speed_multiplier(score, tuning);
        let vel = Vec2::new(
            self.rng.symmetric(tuning.max_lateral_speed) * speed,
            (self.rng.unit() * 2.0 + 1.0) * speed,
        );
        let rot_speed = self.rng.symmetric(tuning.max_rotation_speed);

        Asteroid::new(pos, vel, size, rot_speed)
    }

    /// The two children of a shot asteroid.
    ///
    /// Children sit on the parent, shrink by the split ratio, and fly off
    /// in opposite half-planes with their own spin.
    pub fn split(&mut self, parent: &Asteroid, tuning: &AsteroidConfig) -> [Asteroid; 2] {
        let size = parent.size * tuning.split_ratio;
        let mut child = |k: usize| {
            let angle = k as f32 * PI + self.rng.unit() * PI / 2.0;
            let vel = Vec2::new(angle.cos(), angle.sin()) * tuning.child_speed;
            let rot_speed = self.rng.symmetric(tuning.max_rotation_speed);
            Asteroid::new(parent.pos, vel, size, rot_speed)
        };
        let first = child(0);
        let second = child(1);
        [first, second]
    }

    /// Fill a pooled power-up slot with a random drop
    pub fn fill_power_up(&mut self, slot: &mut PowerUp, config: &GameConfig) {
        let tuning = &config.power_up;
        let field = config.field.size();

        slot.pos = Vec2::new(self.rng.unit() * field.x, self.rng.unit() * field.y / 4.0);
        slot.vel = Vec2::new(self.rng.symmetric(1.0), self.rng.unit() * 1.5 + 0.5);
        slot.kind = PowerUpKind::ALL[self.rng.below(PowerUpKind::ALL.len() as u32) as usize];
        slot.size = tuning.size;
        slot.age = 0;
        slot.max_age = tuning.max_age;
    }
}
