//! Sprite metadata shared by the simulation and the renderer
//!
//! The simulation only needs sprite extents (the ship's bounding box comes
//! from its image). Pixel data stays with the external renderer, which
//! looks sprites up by `SpriteId`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Every sprite the core asks the renderer to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Player,
    Thruster,
    Asteroid,
    Bullet,
    Explosion,
    PowerUp,
}

impl SpriteId {
    pub const ALL: [SpriteId; 6] = [
        SpriteId::Player,
        SpriteId::Thruster,
        SpriteId::Asteroid,
        SpriteId::Bullet,
        SpriteId::Explosion,
        SpriteId::PowerUp,
    ];

    fn slot(self) -> usize {
        self as usize
    }

    /// Atlas index handed to GPU renderers
    pub fn index(self) -> u32 {
        self as u32
    }
}

/// Native pixel size of a sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteInfo {
    pub width: f32,
    pub height: f32,
}

impl SpriteInfo {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Sprite extents handed to the session at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetCache {
    sprites: [SpriteInfo; 6],
}

impl Default for AssetCache {
    fn default() -> Self {
        Self {
            sprites: [
                SpriteInfo::new(64.0, 64.0), // Player
                SpriteInfo::new(16.0, 16.0), // Thruster
                SpriteInfo::new(64.0, 64.0), // Asteroid (scaled to diameter)
                SpriteInfo::new(12.0, 12.0), // Bullet
                SpriteInfo::new(40.0, 40.0), // Explosion
                SpriteInfo::new(20.0, 20.0), // PowerUp
            ],
        }
    }
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override one sprite's extents (e.g. after the host decoded the image)
    pub fn with_sprite(mut self, id: SpriteId, info: SpriteInfo) -> Self {
        assert!(
            info.width > 0.0 && info.height > 0.0,
            "sprite {id:?} must have a positive size"
        );
        self.sprites[id.slot()] = info;
        self
    }

    pub fn sprite(&self, id: SpriteId) -> SpriteInfo {
        self.sprites[id.slot()]
    }

    /// Half-extents of the ship's bounding box
    pub fn player_half_extents(&self) -> Vec2 {
        self.sprite(SpriteId::Player).size() / 2.0
    }

    /// Scale factor that draws `id` at `diameter` pixels wide
    pub fn scale_to(&self, id: SpriteId, diameter: f32) -> f32 {
        diameter / self.sprite(id).width
    }
}
