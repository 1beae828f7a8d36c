//! Game balance configuration
//!
//! Every tunable the simulation reads lives here. Defaults reproduce the
//! classic 60 Hz arcade feel; a JSON document can override any subset.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Play field dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl FieldConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }
}

/// Ship handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Radians per frame while a rotate input is held
    pub turn_rate: f32,
    /// Thrust added per frame while accelerating
    pub accel: f32,
    /// Fraction of velocity lost per coasting frame
    pub friction: f32,
    pub max_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            turn_rate: 0.09,
            accel: 0.35,
            friction: 0.06,
            max_speed: 6.5,
        }
    }
}

/// Firing and bullet lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f32,
    /// Frames a bullet lives before it is retired
    pub max_age: u32,
    /// Firing is refused once this many bullets are live
    pub soft_cap: usize,
    pub radius: f32,
    /// Distance past the field edge at which a bullet is retired
    pub off_field_margin: f32,
    /// Frames between volleys
    pub cooldown: u32,
    /// Frames between volleys with rapid fire active
    pub rapid_cooldown: u32,
    /// Fan angle of the outer multi-shot bullets (radians)
    pub spread: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: 14.0,
            max_age: 90,
            soft_cap: 10,
            radius: 5.0,
            off_field_margin: 10.0,
            cooldown: 10,
            rapid_cooldown: 5,
            spread: 0.2,
        }
    }
}

/// Asteroid generation, splitting and difficulty scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    pub min_size: f32,
    pub max_size: f32,
    /// Asteroids larger than this split in two when shot
    pub split_threshold: f32,
    /// Child diameter as a fraction of the parent
    pub split_ratio: f32,
    pub child_speed: f32,
    /// Asteroid cap (and initial spawn count) at zero score
    pub base_cap: usize,
    /// Score needed to raise the cap by one
    pub cap_score_step: u64,
    /// Score at which spawn speed has doubled
    pub speed_score_step: u64,
    /// Frames between spawn attempts
    pub spawn_interval: u64,
    pub max_lateral_speed: f32,
    pub max_rotation_speed: f32,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            min_size: 40.0,
            max_size: 96.0,
            split_threshold: 20.0,
            split_ratio: 0.6,
            child_speed: 2.0,
            base_cap: 12,
            cap_score_step: 1000,
            speed_score_step: 5000,
            spawn_interval: 60,
            max_lateral_speed: 1.5,
            max_rotation_speed: 0.04,
        }
    }
}

/// Power-up drops
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    /// Frames between drops
    pub spawn_interval: u64,
    pub size: f32,
    /// Frames a drop stays collectable
    pub max_age: u32,
    /// Frames a timed effect (shield, rapid fire, multi-shot) lasts
    pub effect_frames: u32,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 500,
            size: 20.0,
            max_age: 600,
            effect_frames: 600,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub player: PlayerConfig,
    pub bullet: BulletConfig,
    pub asteroid: AsteroidConfig,
    pub power_up: PowerUpConfig,
    /// Frames an explosion plays for
    pub explosion_frames: u32,
    /// Frames a HUD message stays on screen
    pub message_frames: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            player: PlayerConfig::default(),
            bullet: BulletConfig::default(),
            asteroid: AsteroidConfig::default(),
            power_up: PowerUpConfig::default(),
            explosion_frames: 15,
            message_frames: 120,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document. Missing keys fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: field {}x{}, asteroid cap {}",
            config.field.width,
            config.field.height,
            config.asteroid.base_cap
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.field.width > 0.0 && self.field.height > 0.0) {
            return Err(invalid("field", "width and height must be positive"));
        }
        if !(self.player.friction >= 0.0 && self.player.friction < 1.0) {
            return Err(invalid("player.friction", "must lie in [0, 1)"));
        }
        if self.player.max_speed <= 0.0 {
            return Err(invalid("player.max_speed", "must be positive"));
        }
        if self.bullet.radius < 0.0 {
            return Err(invalid("bullet.radius", "must not be negative"));
        }
        if self.bullet.max_age == 0 {
            return Err(invalid("bullet.max_age", "must be at least one frame"));
        }
        let asteroid = &self.asteroid;
        if !(asteroid.min_size > 0.0 && asteroid.min_size <= asteroid.max_size) {
            return Err(invalid(
                "asteroid.min_size",
                format!(
                    "need 0 < min_size <= max_size, got {} / {}",
                    asteroid.min_size, asteroid.max_size
                ),
            ));
        }
        if asteroid.split_threshold <= 0.0 {
            return Err(invalid("asteroid.split_threshold", "must be positive"));
        }
        if !(asteroid.split_ratio > 0.0 && asteroid.split_ratio < 1.0) {
            return Err(invalid("asteroid.split_ratio", "must lie in (0, 1)"));
        }
        if asteroid.spawn_interval == 0 {
            return Err(invalid("asteroid.spawn_interval", "must be non-zero"));
        }
        if asteroid.cap_score_step == 0 || asteroid.speed_score_step == 0 {
            return Err(invalid("asteroid", "score steps must be non-zero"));
        }
        if self.power_up.size <= 0.0 {
            return Err(invalid("power_up.size", "must be positive"));
        }
        if self.power_up.spawn_interval == 0 {
            return Err(invalid("power_up.spawn_interval", "must be non-zero"));
        }
        if self.explosion_frames == 0 {
            return Err(invalid("explosion_frames", "must be non-zero"));
        }
        Ok(())
    }
}
