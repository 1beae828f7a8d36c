//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per frame, no wall-clock time
//! - Seeded RNG only, injected into the spawner
//! - Stable iteration order (insertion order decides tie-breaks)
//! - No rendering or platform dependencies

pub mod collision;
pub mod phase;
pub mod pool;
pub mod rng;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::circles_overlap;
pub use phase::{GamePhase, PhaseChange};
pub use pool::{Handle, Pool, Poolable};
pub use rng::{RandomSource, SeededRng};
pub use session::GameSession;
pub use spawner::Spawner;
pub use state::{
    Asteroid, Bullet, EntityView, Explosion, HudMessage, MessageKind, Player, PowerUp,
    PowerUpKind,
};
pub use tick::InputState;
pub use vector::Vector2;
