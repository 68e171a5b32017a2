//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the world
//! - Stable iteration order (insertion order, which is generation order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod reach;
pub mod rect;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{EnemyContact, enemy_contact, lands_on, touches};
pub use difficulty::{Theme, difficulty_level, difficulty_name, music_intensity};
pub use reach::ReachOracle;
pub use rect::Rect;
pub use snapshot::FrameSnapshot;
pub use state::{
    ActiveEffect, EffectKind, Enemy, EnemyKind, EntityIds, GameEvent, GamePhase, Platform, PlatformKind,
    PlatformState, Player, PowerUp, PowerUpKind, Projectile, World,
};
pub use tick::{TickInput, tick};
