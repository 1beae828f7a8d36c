//! Game session: owns every entity and runs the per-frame pipeline
//!
//! Playing-frame order is fixed: player, firing, bullets (with bullet vs
//! asteroid resolution), asteroids, explosions, power-ups, player vs
//! asteroid, power-up pickup, spawner.

use glam::Vec2;

use super::collision::{first_overlap, overlaps};
use super::phase::{GamePhase, PhaseChange};
use super::pool::{Handle, Pool};
use super::rng::{RandomSource, SeededRng};
use super::spawner::Spawner;
use super::state::{
    Asteroid, Bullet, EntityView, Explosion, HudMessage, MessageKind, Player, PowerUp,
};
use super::tick::{InputState, tick};
use super::vector::heading;
use crate::assets::AssetCache;
use crate::audio::{NullSink, SoundId, SoundSink};
use crate::config::GameConfig;
use crate::consts::MAX_HEALTH;
use crate::highscores::HighScores;

/// One game session: the player, every live entity, the pools behind the
/// short-lived ones, scoring and the current phase
pub struct GameSession {
    config: GameConfig,
    assets: AssetCache,
    spawner: Spawner,
    sound: Box<dyn SoundSink>,
    phase: GamePhase,
    player: Player,
    bullets: Vec<Handle<Bullet>>,
    asteroids: Vec<Asteroid>,
    explosions: Vec<Handle<Explosion>>,
    power_ups: Vec<Handle<PowerUp>>,
    bullet_pool: Pool<Bullet>,
    explosion_pool: Pool<Explosion>,
    power_up_pool: Pool<PowerUp>,
    score: u64,
    /// Best final score this process has seen; never decreases
    high_score: u64,
    leaderboard: HighScores,
    /// Leaderboard rank of the last finished run
    last_rank: Option<usize>,
    /// Playing frames since the last reset
    frame: u64,
    message: Option<HudMessage>,
    /// Input held on the previous update, for edge detection
    previous_input: InputState,
}

impl GameSession {
    /// Session seeded with a PCG generator and a silent sound sink
    pub fn new(config: GameConfig, assets: AssetCache, seed: u64) -> Self {
        Self::with_parts(config, assets, Box::new(SeededRng::new(seed)), Box::new(NullSink))
    }

    /// Session with an explicit random source and sound sink
    pub fn with_parts(
        config: GameConfig,
        assets: AssetCache,
        rng: Box<dyn RandomSource>,
        sound: Box<dyn SoundSink>,
    ) -> Self {
        if let Err(err) = config.validate() {
            panic!("session built from an invalid config: {err}");
        }
        let player = Player::new(config.field.center(), assets.player_half_extents());
        let bullet_cap = config.bullet.soft_cap + 2;

        Self {
            spawner: Spawner::new(rng),
            sound,
            phase: GamePhase::Menu,
            player,
            bullets: Vec::with_capacity(bullet_cap),
            asteroids: Vec::with_capacity(config.asteroid.base_cap * 4),
            explosions: Vec::with_capacity(20),
            power_ups: Vec::with_capacity(10),
            bullet_pool: Pool::with_capacity(bullet_cap),
            explosion_pool: Pool::with_capacity(20),
            power_up_pool: Pool::with_capacity(10),
            score: 0,
            high_score: 0,
            leaderboard: HighScores::new(),
            last_rank: None,
            frame: 0,
            message: None,
            previous_input: InputState::default(),
            config,
            assets,
        }
    }

    pub fn set_sound_sink(&mut self, sound: Box<dyn SoundSink>) {
        self.sound = sound;
    }

    /// Advance one frame with the currently held inputs
    pub fn update(&mut self, input: &InputState) {
        tick(self, input);
    }

    /// Start a fresh run: clear entities and pools, reseed asteroids,
    /// zero the score and frame counter, enter Playing
    pub fn reset(&mut self) {
        self.player = Player::new(self.config.field.center(), self.assets.player_half_extents());

        self.bullets.clear();
        self.asteroids.clear();
        self.explosions.clear();
        self.power_ups.clear();
        self.bullet_pool.clear();
        self.explosion_pool.clear();
        self.power_up_pool.clear();

        self.score = 0;
        self.frame = 0;
        self.message = None;
        self.last_rank = None;

        for _ in 0..self.config.asteroid.base_cap {
            let rock = self.spawner.asteroid(0, &self.config);
            self.asteroids.push(rock);
        }

        self.phase = GamePhase::Playing;
        self.play(SoundId::Start);
        log::info!(
            "New run: {} asteroids, high score {}",
            self.asteroids.len(),
            self.high_score
        );
    }

    // === Accessors ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn bullets(&self) -> impl Iterator<Item = &Bullet> + '_ {
        self.bullets.iter().map(|&h| self.bullet_pool.get(h))
    }

    pub fn bullet_count(&self) -> usize {
        self.bullets.len()
    }

    pub fn explosions(&self) -> impl Iterator<Item = &Explosion> + '_ {
        self.explosions.iter().map(|&h| self.explosion_pool.get(h))
    }

    pub fn power_ups(&self) -> impl Iterator<Item = &PowerUp> + '_ {
        self.power_ups.iter().map(|&h| self.power_up_pool.get(h))
    }

    pub fn bullet_pool(&self) -> &Pool<Bullet> {
        &self.bullet_pool
    }

    pub fn explosion_pool(&self) -> &Pool<Explosion> {
        &self.explosion_pool
    }

    pub fn power_up_pool(&self) -> &Pool<PowerUp> {
        &self.power_up_pool
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn leaderboard(&self) -> &HighScores {
        &self.leaderboard
    }

    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn message(&self) -> Option<&HudMessage> {
        self.message.as_ref()
    }

    /// Every live entity as a closed sum type, in pipeline order
    pub fn entities(&self) -> impl Iterator<Item = EntityView<'_>> + '_ {
        std::iter::once(EntityView::Player(&self.player))
            .chain(self.bullets().map(EntityView::Bullet))
            .chain(self.asteroids.iter().map(EntityView::Asteroid))
            .chain(self.explosions().map(EntityView::Explosion))
            .chain(self.power_ups().map(EntityView::PowerUp))
    }

    // === Frame driver hooks ===

    pub(crate) fn previous_input(&self) -> &InputState {
        &self.previous_input
    }

    pub(crate) fn remember_input(&mut self, input: InputState) {
        self.previous_input = input;
    }

    pub(crate) fn apply_phase_change(&mut self, change: PhaseChange) {
        log::debug!("Phase {:?} -> {:?}", self.phase, change.to);
        if change.reset {
            self.reset();
        }
        self.phase = change.to;
    }

    /// One Playing frame
    pub(crate) fn play_frame(&mut self, input: &InputState) {
        debug_assert!(self.phase.is_playing());
        self.frame += 1;
        self.tick_message();

        let field = self.config.field.size();
        self.player.update(input, &self.config.player, field);
        self.try_fire(input);

        self.update_bullets();
        self.update_asteroids();
        self.update_explosions();
        self.update_power_ups();

        if self.resolve_player_hit() {
            return;
        }
        self.collect_power_up();
        self.run_spawner();
    }

    /// Panics if the session's structural invariants are broken
    pub(crate) fn check_invariants(&self) {
        assert!(
            self.player.health <= MAX_HEALTH,
            "player health {} above max {MAX_HEALTH}",
            self.player.health
        );
        debug_assert_eq!(self.bullet_pool.in_use(), self.bullets.len(), "bullet pool leak");
        debug_assert_eq!(
            self.explosion_pool.in_use(),
            self.explosions.len(),
            "explosion pool leak"
        );
        debug_assert_eq!(
            self.power_up_pool.in_use(),
            self.power_ups.len(),
            "power-up pool leak"
        );
        debug_assert!(self.high_score >= self.leaderboard.top_score().unwrap_or(0));
    }

    // === Pipeline stages ===

    fn try_fire(&mut self, input: &InputState) {
        let tuning = &self.config.bullet;
        if !input.fire
            || self.player.fire_cooldown > 0
            || self.bullets.len() >= tuning.soft_cap
        {
            return;
        }

        let origin = self.player.tip();
        let angle = self.player.angle;
        let fan = [angle, angle - tuning.spread, angle + tuning.spread];
        let volley = if self.player.multi_shot_ticks > 0 {
            &fan[..]
        } else {
            &fan[..1]
        };

        for &shot_angle in volley {
            let handle = self.bullet_pool.acquire();
            let bullet = self.bullet_pool.get_mut(handle);
            bullet.pos = origin;
            bullet.vel = heading(shot_angle) * tuning.speed;
            bullet.age = 0;
            self.bullets.push(handle);
        }

        self.player.fire_cooldown = if self.player.rapid_fire_ticks > 0 {
            tuning.rapid_cooldown
        } else {
            tuning.cooldown
        };
        self.play(SoundId::Fire);
    }

    fn update_bullets(&mut self) {
        let field = self.config.field.size();
        let tuning = self.config.bullet;
        let mut kept = Vec::with_capacity(self.bullets.len());

        for handle in std::mem::take(&mut self.bullets) {
            let bullet = self.bullet_pool.get_mut(handle);
            bullet.advance();
            if bullet.is_expired(tuning.max_age)
                || bullet.is_off_field(field, tuning.off_field_margin)
            {
                self.bullet_pool.release(handle);
                continue;
            }

            let pos = bullet.pos;
            let hit = first_overlap(
                pos,
                tuning.radius,
                self.asteroids.iter().map(|a| (a.pos, a.radius())),
            );
            match hit {
                Some(index) => {
                    self.bullet_pool.release(handle);
                    let rock = self.asteroids.remove(index);
                    self.destroy_asteroid(rock);
                }
                None => kept.push(handle),
            }
        }

        self.bullets = kept;
    }

    /// Score, explode and (if large enough) split a shot asteroid
    fn destroy_asteroid(&mut self, rock: Asteroid) {
        self.spawn_explosion(rock.pos);
        self.score += rock.score_value();

        if rock.size > self.config.asteroid.split_threshold {
            let children = self.spawner.split(&rock, &self.config.asteroid);
            log::debug!(
                "Asteroid {:.1} split into two of {:.1}",
                rock.size,
                children[0].size
            );
            self.asteroids.extend(children);
        }
        self.play(SoundId::Explosion);
    }

    fn update_asteroids(&mut self) {
        let field = self.config.field.size();
        for rock in &mut self.asteroids {
            rock.update(field);
        }
    }

    fn update_explosions(&mut self) {
        let pool = &mut self.explosion_pool;
        self.explosions.retain(|&handle| {
            let boom = pool.get_mut(handle);
            boom.advance();
            if boom.is_finished() {
                pool.release(handle);
                false
            } else {
                true
            }
        });
    }

    fn update_power_ups(&mut self) {
        let field = self.config.field.size();
        let pool = &mut self.power_up_pool;
        self.power_ups.retain(|&handle| {
            let orb = pool.get_mut(handle);
            orb.update(field);
            if orb.is_expired() {
                pool.release(handle);
                false
            } else {
                true
            }
        });
    }

    /// First overlapping asteroid only. Returns true on a fatal hit.
    fn resolve_player_hit(&mut self) -> bool {
        let hit = first_overlap(
            self.player.pos,
            self.player.radius(),
            self.asteroids.iter().map(|a| (a.pos, a.radius())),
        );
        if hit.is_none() {
            return false;
        }

        if self.player.shielded() {
            self.show_message(MessageKind::ShieldBlocked);
            self.play(SoundId::ShieldBlock);
            return false;
        }

        if self.player.take_hit() {
            self.game_over();
            return true;
        }
        self.show_message(MessageKind::Hit);
        self.play(SoundId::PlayerHit);
        false
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.spawn_explosion(self.player.pos);

        if self.score > self.high_score {
            log::info!("New high score: {} (was {})", self.score, self.high_score);
            self.high_score = self.score;
        }
        self.last_rank = self.leaderboard.add_score(self.score, self.frame);
        self.play(SoundId::GameOver);
        log::info!(
            "Game over at frame {} with score {}",
            self.frame,
            self.score
        );
    }

    /// At most one pickup per frame
    fn collect_power_up(&mut self) {
        let player_pos = self.player.pos;
        let player_radius = self.player.radius();
        let pool = &self.power_up_pool;
        let Some(index) = self.power_ups.iter().position(|&handle| {
            let orb = pool.get(handle);
            overlaps(player_pos, player_radius, orb.pos, orb.radius())
        }) else {
            return;
        };

        let handle = self.power_ups.remove(index);
        let kind = self.power_up_pool.get(handle).kind;
        self.power_up_pool.release(handle);

        self.player
            .apply_power_up(kind, self.config.power_up.effect_frames);
        self.show_message(MessageKind::PowerUp(kind));
        self.play(SoundId::PowerUp);
        log::debug!("Collected {kind:?} at frame {}", self.frame);
    }

    fn run_spawner(&mut self) {
        if self
            .spawner
            .asteroid_due(self.frame, self.asteroids.len(), self.score, &self.config.asteroid)
        {
            let rock = self.spawner.asteroid(self.score, &self.config);
            log::debug!("Spawned asteroid {:.1} at frame {}", rock.size, self.frame);
            self.asteroids.push(rock);
        }

        if self.spawner.power_up_due(self.frame, &self.config.power_up) {
            let handle = self.power_up_pool.acquire();
            let orb = self.power_up_pool.get_mut(handle);
            self.spawner.fill_power_up(orb, &self.config);
            log::debug!("Dropped {:?} at frame {}", orb.kind, self.frame);
            self.power_ups.push(handle);
        }
    }

    // === Helpers ===

    fn spawn_explosion(&mut self, pos: Vec2) {
        let handle = self.explosion_pool.acquire();
        let boom = self.explosion_pool.get_mut(handle);
        boom.pos = pos;
        boom.frame = 0;
        boom.max_frame = self.config.explosion_frames;
        self.explosions.push(handle);
    }

    fn show_message(&mut self, kind: MessageKind) {
        self.message = Some(HudMessage {
            kind,
            frames_left: self.config.message_frames,
        });
    }

    fn tick_message(&mut self) {
        if let Some(message) = &mut self.message {
            message.frames_left = message.frames_left.saturating_sub(1);
            if message.frames_left == 0 {
                self.message = None;
            }
        }
    }

    fn play(&mut self, sound: SoundId) {
        log::trace!("sound {sound:?}");
        self.sound.play_once(sound);
    }
}
