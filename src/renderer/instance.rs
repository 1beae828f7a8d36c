//! Flat sprite instances for GPU renderers
//!
//! One instance per drawn sprite, laid out for a single instanced draw
//! call against a sprite atlas indexed by `SpriteId::index`.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::colors;
use super::snapshot::RenderSnapshot;
use crate::assets::SpriteId;
use crate::sim::vector::heading;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2], // offset 0
    pub size: [f32; 2],     // offset 8
    pub rotation: f32,      // offset 16
    pub sprite: u32,        // offset 20
    pub color: [f32; 4],    // offset 24, 40 bytes total
}

impl SpriteInstance {
    pub fn new(sprite: SpriteId, pos: Vec2, size: Vec2, rotation: f32, color: [u8; 4]) -> Self {
        Self {
            position: pos.to_array(),
            size: size.to_array(),
            rotation,
            sprite: sprite.index(),
            color: colors::to_linear(color),
        }
    }
}

/// Explosion tint alpha: 180 at the first frame fading to 0
pub fn explosion_alpha(fade: f32) -> u8 {
    (180.0 * fade.clamp(0.0, 1.0)).round() as u8
}

/// Build the instance list in draw order (thruster under the ship, then
/// bullets, asteroids, explosions, power-ups)
pub fn instances_from_snapshot(snapshot: &RenderSnapshot) -> Vec<SpriteInstance> {
    let mut out = Vec::with_capacity(
        2 + snapshot.bullets.len()
            + snapshot.asteroids.len()
            + snapshot.explosions.len()
            + snapshot.power_ups.len(),
    );

    let player = &snapshot.player;
    if player.thrusting {
        let tail = player.pos - heading(player.angle) * (player.size.y / 2.0);
        out.push(SpriteInstance::new(
            SpriteId::Thruster,
            tail,
            Vec2::splat(player.thruster_size),
            player.angle,
            colors::WHITE,
        ));
    }
    out.push(SpriteInstance::new(
        SpriteId::Player,
        player.pos,
        player.size,
        player.angle,
        colors::WHITE,
    ));

    out.extend(snapshot.bullets.iter().map(|b| {
        SpriteInstance::new(SpriteId::Bullet, b.pos, Vec2::splat(b.size), 0.0, colors::WHITE)
    }));

    out.extend(snapshot.asteroids.iter().map(|a| {
        SpriteInstance::new(SpriteId::Asteroid, a.pos, Vec2::splat(a.size), a.angle, colors::WHITE)
    }));

    out.extend(snapshot.explosions.iter().map(|e| {
        let [r, g, b, _] = colors::WHITE;
        SpriteInstance::new(
            SpriteId::Explosion,
            e.pos,
            Vec2::splat(e.size),
            0.0,
            [r, g, b, explosion_alpha(e.fade)],
        )
    }));

    out.extend(snapshot.power_ups.iter().map(|p| {
        SpriteInstance::new(SpriteId::PowerUp, p.pos, Vec2::splat(p.size), 0.0, p.kind.color())
    }));

    out
}

/// Raw bytes for a vertex/instance buffer upload
pub fn as_bytes(instances: &[SpriteInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCache;
    use crate::config::GameConfig;
    use crate::sim::{GameSession, InputState};

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 40);
        let one = [SpriteInstance::zeroed(); 3];
        assert_eq!(as_bytes(&one).len(), 120);
    }

    #[test]
    fn test_explosion_alpha_fades() {
        assert_eq!(explosion_alpha(1.0), 180);
        assert_eq!(explosion_alpha(0.0), 0);
        assert_eq!(explosion_alpha(0.5), 90);
    }

    #[test]
    fn test_instances_cover_every_entity() {
        let mut session = GameSession::new(GameConfig::default(), AssetCache::default(), 11);
        session.update(&InputState {
            confirm: true,
            ..Default::default()
        });
        session.update(&InputState {
            accelerate: true,
            fire: true,
            ..Default::default()
        });

        let snap = session.snapshot();
        let instances = instances_from_snapshot(&snap);
        // Thruster + ship + bullet + rocks
        assert_eq!(instances.len(), 2 + 1 + snap.asteroids.len());
        assert_eq!(instances[0].sprite, SpriteId::Thruster.index());
        assert_eq!(instances[1].sprite, SpriteId::Player.index());
        assert_eq!(instances[2].sprite, SpriteId::Bullet.index());
        assert_eq!(instances[2].size, [10.0, 10.0]);
    }
}
