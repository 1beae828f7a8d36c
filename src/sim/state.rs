//! Entity types and their per-frame rules
//!
//! Entities hold no references to the session; everything they need per
//! frame (input, tunables, field size) is passed in.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::Poolable;
use super::tick::InputState;
use super::vector::{clamp_speed, heading, wrap_toroidal, wrap_with_margin};
use crate::config::{BulletConfig, PlayerConfig};
use crate::consts::MAX_HEALTH;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PowerUpKind {
    #[default]
    Shield,
    RapidFire,
    MultiShot,
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
        PowerUpKind::MultiShot,
        PowerUpKind::ExtraLife,
    ];

    /// RGBA tint the renderer uses for the pickup orb
    pub fn color(&self) -> [u8; 4] {
        match self {
            PowerUpKind::Shield => [0, 255, 255, 255],
            PowerUpKind::RapidFire => [255, 255, 0, 255],
            PowerUpKind::MultiShot => [255, 0, 255, 255],
            PowerUpKind::ExtraLife => [0, 255, 0, 255],
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle (radians, 0 = up)
    pub angle: f32,
    pub health: u8,
    /// Frames of shield remaining (0 = inactive)
    pub shield_ticks: u32,
    pub rapid_fire_ticks: u32,
    pub multi_shot_ticks: u32,
    /// Frames until the next volley may fire
    pub fire_cooldown: u32,
    /// Bounding box half width / half height
    pub half_extents: Vec2,
    /// Accelerate was held this frame (thruster flame)
    pub thrusting: bool,
}

impl Player {
    pub fn new(pos: Vec2, half_extents: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            health: MAX_HEALTH,
            shield_ticks: 0,
            rapid_fire_ticks: 0,
            multi_shot_ticks: 0,
            fire_cooldown: 0,
            half_extents,
            thrusting: false,
        }
    }

    /// Collision radius (half the sprite width)
    pub fn radius(&self) -> f32 {
        self.half_extents.x
    }

    /// Nose of the ship, where bullets leave
    pub fn tip(&self) -> Vec2 {
        self.pos + heading(self.angle) * self.half_extents.y
    }

    pub fn shielded(&self) -> bool {
        self.shield_ticks > 0
    }

    /// Remaining fire cooldown as a fraction of the current full cooldown
    pub fn cooldown_ratio(&self, tuning: &BulletConfig) -> f32 {
        let full = if self.rapid_fire_ticks > 0 {
            tuning.rapid_cooldown
        } else {
            tuning.cooldown
        };
        if full == 0 {
            return 0.0;
        }
        (self.fire_cooldown as f32 / full as f32).min(1.0)
    }

    /// Steering, thrust, integration, wrap and timer countdown for one frame
    pub fn update(&mut self, input: &InputState, tuning: &PlayerConfig, field: Vec2) {
        // Both rotate inputs apply independently
        if input.rotate_left {
            self.angle -= tuning.turn_rate;
        }
        if input.rotate_right {
            self.angle += tuning.turn_rate;
        }

        self.thrusting = input.accelerate;
        if self.thrusting {
            self.vel += heading(self.angle) * tuning.accel;
        } else {
            self.vel *= 1.0 - tuning.friction;
        }
        clamp_speed(&mut self.vel, tuning.max_speed);

        self.pos += self.vel;
        self.pos = wrap_toroidal(self.pos, field);

        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
        self.rapid_fire_ticks = self.rapid_fire_ticks.saturating_sub(1);
        self.multi_shot_ticks = self.multi_shot_ticks.saturating_sub(1);
    }

    /// Consume a power-up
    pub fn apply_power_up(&mut self, kind: PowerUpKind, effect_frames: u32) {
        match kind {
            PowerUpKind::Shield => self.shield_ticks = effect_frames,
            PowerUpKind::RapidFire => self.rapid_fire_ticks = effect_frames,
            PowerUpKind::MultiShot => self.multi_shot_ticks = effect_frames,
            PowerUpKind::ExtraLife => self.health = (self.health + 1).min(MAX_HEALTH),
        }
    }

    /// Lose one health point. Returns true when the ship is out of health.
    pub fn take_hit(&mut self) -> bool {
        assert!(self.health > 0, "hit applied to a ship with no health left");
        self.health -= 1;
        self.health == 0
    }
}

/// A drifting, spinning rock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Diameter
    pub size: f32,
    pub angle: f32,
    pub rot_speed: f32,
}

impl Asteroid {
    pub fn new(pos: Vec2, vel: Vec2, size: f32, rot_speed: f32) -> Self {
        assert!(size > 0.0, "asteroid size must be positive, got {size}");
        Self {
            pos,
            vel,
            size,
            angle: 0.0,
            rot_speed,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Points awarded for destroying this asteroid
    pub fn score_value(&self) -> u64 {
        self.size.floor() as u64 * 10
    }

    pub fn update(&mut self, field: Vec2) {
        self.pos += self.vel;
        self.angle += self.rot_speed;
        self.pos = wrap_with_margin(self.pos, field, self.radius());
    }
}

/// A pooled projectile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames since fired
    pub age: u32,
}

impl Poolable for Bullet {}

impl Bullet {
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.age += 1;
    }

    pub fn is_expired(&self, max_age: u32) -> bool {
        self.age > max_age
    }

    /// Outside the field by more than `margin` on any side
    pub fn is_off_field(&self, field: Vec2, margin: f32) -> bool {
        self.pos.x < -margin
            || self.pos.x > field.x + margin
            || self.pos.y < -margin
            || self.pos.y > field.y + margin
    }
}

/// A pooled explosion animation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub frame: u32,
    pub max_frame: u32,
}

impl Poolable for Explosion {}

impl Explosion {
    pub fn advance(&mut self) {
        debug_assert!(self.frame <= self.max_frame, "explosion past its last frame");
        self.frame = (self.frame + 1).min(self.max_frame);
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.max_frame
    }

    /// Remaining fraction of the animation, 1.0 fresh to 0.0 finished
    pub fn fade(&self) -> f32 {
        if self.max_frame == 0 {
            return 0.0;
        }
        1.0 - self.frame as f32 / self.max_frame as f32
    }
}

/// A pooled, collectable power-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PowerUpKind,
    /// Diameter
    pub size: f32,
    pub age: u32,
    pub max_age: u32,
}

impl Poolable for PowerUp {}

impl PowerUp {
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn update(&mut self, field: Vec2) {
        self.pos += self.vel;
        self.age += 1;
        self.pos = wrap_toroidal(self.pos, field);
    }

    pub fn is_expired(&self) -> bool {
        self.age > self.max_age
    }
}

/// What a transient HUD message is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Hit,
    ShieldBlocked,
    PowerUp(PowerUpKind),
}

/// Transient centered HUD message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudMessage {
    pub kind: MessageKind,
    pub frames_left: u32,
}

impl HudMessage {
    pub fn text(&self) -> &'static str {
        match self.kind {
            MessageKind::Hit => "You were hit!",
            MessageKind::ShieldBlocked => "Shield absorbed the hit!",
            MessageKind::PowerUp(PowerUpKind::Shield) => "Shield activated!",
            MessageKind::PowerUp(PowerUpKind::RapidFire) => "Rapid fire activated!",
            MessageKind::PowerUp(PowerUpKind::MultiShot) => "Multi-shot activated!",
            MessageKind::PowerUp(PowerUpKind::ExtraLife) => "Extra life!",
        }
    }
}

/// Closed set of drawable entities, yielded in pipeline order
#[derive(Debug, Clone, Copy)]
pub enum EntityView<'a> {
    Player(&'a Player),
    Bullet(&'a Bullet),
    Asteroid(&'a Asteroid),
    Explosion(&'a Explosion),
    PowerUp(&'a PowerUp),
}

impl EntityView<'_> {
    pub fn position(&self) -> Vec2 {
        match self {
            EntityView::Player(p) => p.pos,
            EntityView::Bullet(b) => b.pos,
            EntityView::Asteroid(a) => a.pos,
            EntityView::Explosion(e) => e.pos,
            EntityView::PowerUp(p) => p.pos,
        }
    }
}
