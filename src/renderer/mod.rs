//! Render surface
//!
//! The simulation never draws. Hosts either implement [`Renderer`] and let
//! the session walk its entities into it, or take a [`RenderSnapshot`] and
//! build a GPU instance buffer from it.

pub mod instance;
pub mod snapshot;

use glam::Vec2;

pub use instance::{SpriteInstance, as_bytes, explosion_alpha, instances_from_snapshot};
pub use snapshot::RenderSnapshot;

use crate::assets::{AssetCache, SpriteId};
use crate::sim::vector::heading;
use crate::sim::{EntityView, GameSession};

/// Colors for game elements (RGBA, 0-255)
pub mod colors {
    pub const BACKGROUND: [u8; 4] = [0, 0, 0, 255];
    pub const WHITE: [u8; 4] = [255, 255, 255, 255];
    pub const TEXT: [u8; 4] = [255, 255, 255, 255];
    pub const HEALTH_BAR: [u8; 4] = [0, 200, 60, 255];
    pub const SHIELD_RING: [u8; 4] = [0, 255, 255, 90];
    pub const MESSAGE: [u8; 4] = [255, 220, 0, 255];

    pub fn to_linear(color: [u8; 4]) -> [f32; 4] {
        color.map(|c| c as f32 / 255.0)
    }
}

/// Measured size of a line of text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    pub width: f32,
    pub height: f32,
}

/// Text measurement, provided by whoever owns the font
pub trait TextLayout {
    fn measure(&self, text: &str, size: f32) -> TextBounds;
}

/// Fixed-advance layout for headless hosts and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceLayout {
    /// Glyph advance as a fraction of the font size
    pub advance: f32,
}

impl Default for MonospaceLayout {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextLayout for MonospaceLayout {
    fn measure(&self, text: &str, size: f32) -> TextBounds {
        TextBounds {
            width: text.chars().count() as f32 * size * self.advance,
            height: size,
        }
    }
}

/// Draw primitives the core asks of a renderer
pub trait Renderer {
    fn clear(&mut self, color: [u8; 4]);
    /// Sprite centered on `pos`, rotated by `angle` radians, scaled uniformly
    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2, angle: f32, scale: f32, tint: [u8; 4]);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: [u8; 4]);
    /// Horizontal bar at `pos` (top-left) filled to `fill` in [0, 1]
    fn draw_bar(&mut self, pos: Vec2, size: Vec2, fill: f32, color: [u8; 4]);
    /// Text with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: [u8; 4]);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear([u8; 4]),
    Sprite {
        sprite: SpriteId,
        pos: Vec2,
        angle: f32,
        scale: f32,
        tint: [u8; 4],
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [u8; 4],
    },
    Bar {
        pos: Vec2,
        size: Vec2,
        fill: f32,
        color: [u8; 4],
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: [u8; 4],
    },
}

/// Renderer that records draw calls instead of drawing
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn sprites(&self, id: SpriteId) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { sprite, .. } if *sprite == id))
            .count()
    }
}

impl Renderer for DrawList {
    fn clear(&mut self, color: [u8; 4]) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2, angle: f32, scale: f32, tint: [u8; 4]) {
        self.commands.push(DrawCommand::Sprite {
            sprite,
            pos,
            angle,
            scale,
            tint,
        });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: [u8; 4]) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_bar(&mut self, pos: Vec2, size: Vec2, fill: f32, color: [u8; 4]) {
        self.commands.push(DrawCommand::Bar {
            pos,
            size,
            fill,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: [u8; 4]) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size,
            color,
        });
    }
}

/// Draw one entity
pub fn draw_entity(renderer: &mut dyn Renderer, assets: &AssetCache, entity: EntityView<'_>) {
    match entity {
        EntityView::Player(player) => {
            if player.thrusting {
                let tail = player.pos - heading(player.angle) * player.half_extents.y;
                renderer.draw_sprite(SpriteId::Thruster, tail, player.angle, 1.0, colors::WHITE);
            }
            renderer.draw_sprite(SpriteId::Player, player.pos, player.angle, 1.0, colors::WHITE);
            if player.shielded() {
                renderer.draw_circle(player.pos, player.radius() + 6.0, colors::SHIELD_RING);
            }
        }
        EntityView::Bullet(bullet) => {
            renderer.draw_sprite(SpriteId::Bullet, bullet.pos, 0.0, 1.0, colors::WHITE);
        }
        EntityView::Asteroid(rock) => {
            let scale = assets.scale_to(SpriteId::Asteroid, rock.size);
            renderer.draw_sprite(SpriteId::Asteroid, rock.pos, rock.angle, scale, colors::WHITE);
        }
        EntityView::Explosion(boom) => {
            let [r, g, b, _] = colors::WHITE;
            let tint = [r, g, b, explosion_alpha(boom.fade())];
            renderer.draw_sprite(SpriteId::Explosion, boom.pos, 0.0, 1.0, tint);
        }
        EntityView::PowerUp(orb) => {
            renderer.draw_circle(orb.pos, orb.radius(), orb.kind.color());
        }
    }
}

impl GameSession {
    /// Draw the frame: entities in pipeline order, then the HUD, then the
    /// screen text for the current phase
    pub fn render(&self, renderer: &mut dyn Renderer, layout: &dyn TextLayout) {
        renderer.clear(colors::BACKGROUND);
        for entity in self.entities() {
            draw_entity(renderer, self.assets(), entity);
        }
        crate::ui::draw_hud(self, renderer, layout);
        crate::ui::draw_phase_screen(self, renderer, layout);
    }
}
