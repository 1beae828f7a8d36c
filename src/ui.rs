//! Screen text: menu, HUD, pause and game-over overlays
//!
//! Lines are built from session state and centered with the host's
//! [`TextLayout`]. Nothing here feeds back into the simulation.

use glam::Vec2;

use crate::renderer::{Renderer, TextLayout, colors};
use crate::sim::{GamePhase, GameSession};

pub const TITLE: &str = "ASTEROIDS";
pub const TEXT_SIZE: f32 = 20.0;
pub const TITLE_SIZE: f32 = 36.0;
const LINE_SPACING: f32 = 32.0;
const HUD_MARGIN: f32 = 24.0;
const BAR_SIZE: Vec2 = Vec2::new(200.0, 20.0);

const GAME_OVER_COLOR: [u8; 4] = [255, 69, 0, 255];
const HIT_MESSAGE_COLOR: [u8; 4] = [255, 0, 0, 255];
const COOLDOWN_COLOR: [u8; 4] = [255, 255, 0, 255];

/// Centered lines for the current phase (empty while playing)
pub fn screen_lines(session: &GameSession) -> Vec<String> {
    match session.phase() {
        GamePhase::Menu => vec![
            format!("High score: {}", session.high_score()),
            "Left/Right to turn, Up to thrust".to_string(),
            "Space to fire".to_string(),
            "Press ENTER to start".to_string(),
        ],
        GamePhase::Playing => Vec::new(),
        GamePhase::Paused => vec!["PAUSED - press P to continue".to_string()],
        GamePhase::GameOver => {
            let mut lines = vec![
                "GAME OVER".to_string(),
                format!("Final score: {}", session.score()),
                format!("High score: {}", session.high_score()),
            ];
            if let Some(rank) = session.last_rank() {
                lines.push(format!("Leaderboard rank: #{rank}"));
            }
            lines.push("Press R to try again".to_string());
            lines
        }
    }
}

/// Top-left x that centers `text` on the field
fn centered_x(layout: &dyn TextLayout, text: &str, size: f32, field_width: f32) -> f32 {
    (field_width - layout.measure(text, size).width) / 2.0
}

/// Score, high score, health and cooldown bars, and the transient message
pub fn draw_hud(session: &GameSession, renderer: &mut dyn Renderer, layout: &dyn TextLayout) {
    if !matches!(session.phase(), GamePhase::Playing | GamePhase::Paused) {
        return;
    }

    let player = session.player();
    let field = session.config().field.size();

    renderer.draw_text(
        &format!("Score: {}", session.score()),
        Vec2::new(HUD_MARGIN, HUD_MARGIN),
        TEXT_SIZE,
        colors::TEXT,
    );
    renderer.draw_text(
        &format!("Best: {}", session.high_score()),
        Vec2::new(HUD_MARGIN, HUD_MARGIN + 30.0),
        TEXT_SIZE,
        colors::TEXT,
    );

    let health = player.health as f32 / crate::consts::MAX_HEALTH as f32;
    renderer.draw_bar(Vec2::new(HUD_MARGIN, 100.0), BAR_SIZE, health, colors::HEALTH_BAR);
    renderer.draw_bar(
        Vec2::new(HUD_MARGIN, 130.0),
        BAR_SIZE,
        player.cooldown_ratio(&session.config().bullet),
        COOLDOWN_COLOR,
    );

    if let Some(message) = session.message() {
        let text = message.text();
        let bounds = layout.measure(text, TEXT_SIZE);
        let pos = Vec2::new(
            (field.x - bounds.width) / 2.0,
            (field.y - bounds.height) / 2.0,
        );
        let color = match message.kind {
            crate::sim::MessageKind::Hit => HIT_MESSAGE_COLOR,
            _ => colors::MESSAGE,
        };
        renderer.draw_text(text, pos, TEXT_SIZE, color);
    }
}

/// Menu title, pause banner or game-over summary
pub fn draw_phase_screen(session: &GameSession, renderer: &mut dyn Renderer, layout: &dyn TextLayout) {
    let field = session.config().field.size();
    let mut y = field.y / 2.0;

    let color = match session.phase() {
        GamePhase::Playing => return,
        GamePhase::GameOver => GAME_OVER_COLOR,
        GamePhase::Menu => {
            let x = centered_x(layout, TITLE, TITLE_SIZE, field.x);
            renderer.draw_text(TITLE, Vec2::new(x, y - 120.0), TITLE_SIZE, colors::TEXT);
            y -= 60.0;
            colors::TEXT
        }
        GamePhase::Paused => colors::TEXT,
    };

    for line in screen_lines(session) {
        let x = centered_x(layout, &line, TEXT_SIZE, field.x);
        renderer.draw_text(&line, Vec2::new(x, y), TEXT_SIZE, color);
        y += LINE_SPACING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCache;
    use crate::config::GameConfig;
    use crate::renderer::{DrawCommand, DrawList, MonospaceLayout};
    use crate::sim::InputState;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default(), AssetCache::default(), 21)
    }

    #[test]
    fn test_menu_lines() {
        let lines = screen_lines(&session());
        assert_eq!(lines[0], "High score: 0");
        assert!(lines.iter().any(|l| l.contains("ENTER")));
    }

    #[test]
    fn test_menu_title_is_centered() {
        let session = session();
        let layout = MonospaceLayout::default();
        let mut list = DrawList::new();
        draw_phase_screen(&session, &mut list, &layout);

        let Some(DrawCommand::Text { text, pos, size, .. }) = list.commands.first() else {
            panic!("expected title text");
        };
        assert_eq!(text, TITLE);
        let width = layout.measure(TITLE, *size).width;
        assert!((pos.x + width / 2.0 - 640.0).abs() < 1e-3);
    }

    #[test]
    fn test_hud_only_while_in_a_run() {
        let mut session = session();
        let layout = MonospaceLayout::default();

        let mut list = DrawList::new();
        draw_hud(&session, &mut list, &layout);
        assert!(list.commands.is_empty());

        session.update(&InputState {
            confirm: true,
            ..Default::default()
        });
        draw_hud(&session, &mut list, &layout);
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts, vec!["Score: 0", "Best: 0"]);
        assert!(list.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Bar { fill, .. } if *fill == 1.0
        )));
    }

    #[test]
    fn test_pause_banner() {
        let mut session = session();
        session.update(&InputState {
            confirm: true,
            ..Default::default()
        });
        session.update(&InputState::default());
        session.update(&InputState {
            pause: true,
            ..Default::default()
        });
        assert_eq!(screen_lines(&session), vec!["PAUSED - press P to continue"]);
    }
}
