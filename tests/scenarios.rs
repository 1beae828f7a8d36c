use std::cell::RefCell;
use std::rc::Rc;

use asteroid_shooter::audio::{MixerSink, SoundLog};
use asteroid_shooter::renderer::{DrawList, MonospaceLayout, instances_from_snapshot};
use asteroid_shooter::sim::SeededRng;
use asteroid_shooter::{
    AssetCache, ConfigError, GameConfig, GamePhase, GameSession, InputState, SoundId,
};

fn press_confirm() -> InputState {
    InputState {
        confirm: true,
        ..Default::default()
    }
}

fn press_restart() -> InputState {
    InputState {
        restart: true,
        ..Default::default()
    }
}

/// A field so small the starting rocks cannot miss the ship
fn crowded_config() -> GameConfig {
    GameConfig::from_json(r#"{ "field": { "width": 200, "height": 200 } }"#)
        .expect("crowded config")
}

fn run_until_game_over(session: &mut GameSession, limit: u32) -> bool {
    for _ in 0..limit {
        session.update(&InputState::default());
        if session.phase() == GamePhase::GameOver {
            return true;
        }
    }
    false
}

#[test]
fn menu_to_playing_plays_start_sound() {
    let sounds = Rc::new(RefCell::new(SoundLog::default()));
    let mut session = GameSession::with_parts(
        GameConfig::default(),
        AssetCache::default(),
        Box::new(SeededRng::new(77)),
        Box::new(sounds.clone()),
    );
    assert_eq!(session.phase(), GamePhase::Menu);
    session.update(&press_confirm());

    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.asteroids().len(), 12);
    assert_eq!(sounds.borrow().played, vec![SoundId::Start]);
}

#[test]
fn partial_config_drives_the_session() {
    let config = GameConfig::from_json(r#"{ "asteroid": { "base_cap": 3 } }"#).expect("config");
    let mut session = GameSession::new(config, AssetCache::default(), 1);
    session.update(&press_confirm());
    assert_eq!(session.asteroids().len(), 3);
}

#[test]
fn bad_config_is_rejected() {
    let err = GameConfig::from_json(r#"{ "asteroid": { "split_ratio": 1.5 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "asteroid.split_ratio", .. }));

    let err = GameConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn crowded_run_ends_and_restarts() {
    let sounds = Rc::new(RefCell::new(SoundLog::default()));
    let mut session = GameSession::with_parts(
        crowded_config(),
        AssetCache::default(),
        Box::new(SeededRng::new(3)),
        Box::new(sounds.clone()),
    );
    session.update(&press_confirm());
    assert!(run_until_game_over(&mut session, 2_000));

    assert_eq!(session.player().health, 0);
    assert!(session.high_score() >= session.score());
    assert!(session.explosions().count() >= 1);
    assert_eq!(sounds.borrow().count(SoundId::GameOver), 1);
    assert_eq!(sounds.borrow().count(SoundId::PlayerHit), 2);

    let high = session.high_score();
    let frozen = session.frame();
    for _ in 0..10 {
        session.update(&InputState::default());
    }
    assert_eq!(session.frame(), frozen);

    session.update(&press_restart());
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.score(), 0);
    assert_eq!(session.player().health, 3);
    assert_eq!(session.high_score(), high);
    assert_eq!(session.last_rank(), None);
    assert_eq!(sounds.borrow().count(SoundId::Start), 2);
}

#[test]
fn game_over_screen_is_rendered() {
    let mut session = GameSession::new(crowded_config(), AssetCache::default(), 8);
    session.update(&press_confirm());
    assert!(run_until_game_over(&mut session, 2_000));

    let mut frame = DrawList::new();
    session.render(&mut frame, &MonospaceLayout::default());
    let texts: Vec<&str> = frame.texts().collect();
    assert!(texts.contains(&"GAME OVER"));
    assert!(texts.iter().any(|t| t.starts_with("Final score:")));
    assert!(texts.iter().any(|t| t.contains("Press R")));
}

#[test]
fn muted_mixer_swallows_sounds() {
    let sounds = Rc::new(RefCell::new(SoundLog::default()));
    let mut mixer = MixerSink::new(sounds.clone());
    mixer.set_muted(true);

    let mut session = GameSession::new(GameConfig::default(), AssetCache::default(), 4);
    session.set_sound_sink(Box::new(mixer));
    session.update(&press_confirm());
    session.update(&InputState {
        fire: true,
        ..Default::default()
    });
    assert!(sounds.borrow().played.is_empty());
    assert_eq!(session.bullet_count(), 1);
}

#[test]
fn snapshot_feeds_gpu_instances() {
    let mut session = GameSession::new(GameConfig::default(), AssetCache::default(), 12);
    session.update(&press_confirm());
    for _ in 0..30 {
        session.update(&InputState {
            rotate_left: true,
            fire: true,
            ..Default::default()
        });
    }

    let snap = session.snapshot();
    let instances = instances_from_snapshot(&snap);
    let expected = 1
        + snap.bullets.len()
        + snap.asteroids.len()
        + snap.explosions.len()
        + snap.power_ups.len();
    assert_eq!(instances.len(), expected);
    assert_eq!(snap.frame, 30);
}
