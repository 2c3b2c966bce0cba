//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (the power-up window is the one wall-clock input,
//!   passed in as a parameter)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use state::{
    ActivePowerUp, Egg, Enemy, Explosion, GameEvent, GamePhase, GameState, Player, PowerUp,
    PowerUpKind, Projectile, ProjectileKind,
};
pub use tick::{TickInput, spawn_wave, tick};
