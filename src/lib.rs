//! Asteroid Shooter - simulation core for a 2D arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, pooling, collisions, game phases)
//! - `renderer`: Render surface handed to an external renderer
//! - `ui`: Text layout for the menu, pause and game-over screens
//! - `audio`: Fire-and-forget sound collaborator
//! - `config`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod config;
pub mod highscores;
pub mod renderer;
pub mod sim;
pub mod ui;

pub use assets::{AssetCache, SpriteId};
pub use audio::{NullSink, SoundId, SoundSink};
pub use config::{ConfigError, GameConfig};
pub use highscores::HighScores;
pub use sim::{GamePhase, GameSession, InputState};

/// Fixed gameplay constants that are not exposed as tunables
pub mod consts {
    /// Player health ceiling (and starting health)
    pub const MAX_HEALTH: u8 = 3;
    /// Frame rate the frame-based timers are tuned for
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Default session seed used by the demo runner
    pub const DEFAULT_SEED: u64 = 0x5EED_A57E;
}
