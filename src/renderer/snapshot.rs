//! Read-only render snapshot
//!
//! Everything an external renderer needs for one frame, copied out of the
//! session so it can be shipped to another thread or serialized.

use glam::Vec2;
use serde::Serialize;

use crate::assets::SpriteId;
use crate::sim::{GamePhase, GameSession, PowerUpKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub pos: Vec2,
    pub angle: f32,
    /// Bounding box width/height
    pub size: Vec2,
    pub health: u8,
    pub shield_ticks: u32,
    pub rapid_fire_ticks: u32,
    pub multi_shot_ticks: u32,
    pub thrusting: bool,
    pub thruster_size: f32,
    /// 1.0 right after firing, 0.0 when ready
    pub cooldown_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsteroidSnapshot {
    pub pos: Vec2,
    pub size: f32,
    pub angle: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletSnapshot {
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplosionSnapshot {
    pub pos: Vec2,
    pub size: f32,
    pub frame: u32,
    pub max_frame: u32,
    pub fade: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpSnapshot {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub size: f32,
}

/// Full frame state for a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub field: Vec2,
    pub frame: u64,
    pub score: u64,
    pub high_score: u64,
    /// Leaderboard rank of the last finished run
    pub last_rank: Option<usize>,
    pub player: PlayerSnapshot,
    pub bullets: Vec<BulletSnapshot>,
    pub asteroids: Vec<AsteroidSnapshot>,
    pub explosions: Vec<ExplosionSnapshot>,
    pub power_ups: Vec<PowerUpSnapshot>,
    /// Active HUD message text
    pub message: Option<String>,
}

impl RenderSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        let config = session.config();
        let assets = session.assets();
        let player = session.player();

        let explosion_size = assets.sprite(SpriteId::Explosion).width;

        Self {
            phase: session.phase(),
            field: config.field.size(),
            frame: session.frame(),
            score: session.score(),
            high_score: session.high_score(),
            last_rank: session.last_rank(),
            player: PlayerSnapshot {
                pos: player.pos,
                angle: player.angle,
                size: player.half_extents * 2.0,
                health: player.health,
                shield_ticks: player.shield_ticks,
                rapid_fire_ticks: player.rapid_fire_ticks,
                multi_shot_ticks: player.multi_shot_ticks,
                thrusting: player.thrusting,
                thruster_size: assets.sprite(SpriteId::Thruster).width,
                cooldown_ratio: player.cooldown_ratio(&config.bullet),
            },
            bullets: session
                .bullets()
                .map(|b| BulletSnapshot {
                    pos: b.pos,
                    size: config.bullet.radius * 2.0,
                })
                .collect(),
            asteroids: session
                .asteroids()
                .iter()
                .map(|a| AsteroidSnapshot {
                    pos: a.pos,
                    size: a.size,
                    angle: a.angle,
                })
                .collect(),
            explosions: session
                .explosions()
                .map(|e| ExplosionSnapshot {
                    pos: e.pos,
                    size: explosion_size,
                    frame: e.frame,
                    max_frame: e.max_frame,
                    fade: e.fade(),
                })
                .collect(),
            power_ups: session
                .power_ups()
                .map(|p| PowerUpSnapshot {
                    pos: p.pos,
                    kind: p.kind,
                    size: p.size,
                })
                .collect(),
            message: session.message().map(|m| m.text().to_string()),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl GameSession {
    /// Copy of everything a renderer needs for this frame
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCache;
    use crate::config::GameConfig;
    use crate::sim::InputState;

    #[test]
    fn test_capture_mirrors_session() {
        let mut session = GameSession::new(GameConfig::default(), AssetCache::default(), 5);
        session.update(&InputState {
            confirm: true,
            ..Default::default()
        });
        session.update(&InputState {
            fire: true,
            ..Default::default()
        });

        let snap = session.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.frame, 1);
        assert_eq!(snap.asteroids.len(), session.asteroids().len());
        assert_eq!(snap.bullets.len(), session.bullet_count());
        assert_eq!(snap.player.size, Vec2::new(64.0, 64.0));
        assert_eq!(snap.player.health, 3);
        assert!(snap.player.cooldown_ratio > 0.0 && snap.player.cooldown_ratio <= 1.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = GameSession::new(GameConfig::default(), AssetCache::default(), 5);
        let json = session.snapshot().to_json().expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["phase"], "Menu");
        assert_eq!(value["player"]["health"], 3);
        assert!(value["message"].is_null());
    }
}
