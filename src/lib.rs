//! Sky Hop - an endless vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, generation, game state)
//! - `config`: Tunable world bounds and player motion, loadable from JSON
//! - `input`: Device-agnostic command latching
//! - `highscores`: Single high-score persistence behind a store trait

pub mod config;
pub mod highscores;
pub mod input;
pub mod sim;

pub use config::{ConfigError, GameConfig, PlayerTuning};
pub use highscores::{HighScoreStore, JsonFileStore, MemoryStore, StoreError};
pub use input::{Command, InputState};

/// Game constants that are not exposed through `GameConfig`
pub mod consts {
    /// Ticks per second the timers below are expressed in
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Safety factor applied to the theoretical jump reach
    pub const REACH_SAFETY_FACTOR: f32 = 0.7;
    /// Random x attempts before falling back to a placement near a recent platform
    pub const REACH_MAX_ATTEMPTS: u32 = 20;
    /// Fallback offset as a fraction of max reach
    pub const REACH_FALLBACK_FRACTION: f32 = 0.6;
    /// Platforms considered as launch points for a new platform
    pub const RECENT_PLATFORMS: usize = 3;
    /// Platforms considered as monster perches
    pub const RECENT_PLATFORMS_FOR_ENEMY: usize = 5;

    /// Moving platforms
    pub const MOVING_PLATFORM_SPEED: f32 = 2.0;
    pub const MOVING_PLATFORM_RANGE: f32 = 100.0;
    /// Ticks a touched disappearing platform survives
    pub const DISAPPEAR_TICKS: u32 = 30;

    /// Spring attached to a fresh normal platform
    pub const SPRING_CHANCE: f64 = 0.15;
    pub const SPRING_SIZE: (f32, f32) = (20.0, 15.0);
    pub const SPRING_BOOST: f32 = 1.8;

    /// Floating power-ups (jetpack / propeller)
    pub const FLOATING_POWERUP_MIN_SCORE: u64 = 100;
    pub const FLOATING_POWERUP_CHANCE: f64 = 0.05;
    pub const JETPACK_WEIGHT: f64 = 0.6;
    pub const FLOATING_POWERUP_SIZE: f32 = 35.0;
    /// Vertical offset above the new platform where floating power-ups appear
    pub const FLOATING_POWERUP_LIFT: f32 = 40.0;
    pub const JETPACK_TICKS: u32 = 3 * TICKS_PER_SECOND;
    pub const PROPELLER_TICKS: u32 = 4 * TICKS_PER_SECOND;
    /// Upward velocity while an override effect is active
    pub const JETPACK_VELOCITY: f32 = -15.0;
    pub const PROPELLER_VELOCITY: f32 = -5.0;
    /// Jetpack thrust cue cadence
    pub const JETPACK_THRUST_INTERVAL: u32 = 10;

    /// Enemies
    pub const ENEMY_MIN_SCORE: u64 = 150;
    pub const ENEMY_CHANCE: f64 = 0.08;
    /// Score at which the UFO share would reach 100% (before the cap)
    pub const UFO_SCORE_SCALE: f32 = 5000.0;
    pub const UFO_MAX_CHANCE: f32 = 0.6;
    pub const UFO_ATTEMPTS: u32 = 5;
    pub const MONSTER_SIZE: (f32, f32) = (40.0, 40.0);
    pub const UFO_SIZE: (f32, f32) = (45.0, 35.0);
    /// Monster perch height above its platform top
    pub const MONSTER_PERCH: f32 = 45.0;
    /// Vertical offset above the new platform where UFOs appear
    pub const UFO_LIFT: f32 = 60.0;
    pub const MONSTER_SPRING_RADIUS: f32 = 150.0;
    pub const UFO_SPRING_RADIUS: f32 = 120.0;
    pub const UFO_SPEED: f32 = 1.0;
    pub const UFO_FLOAT_STEP: f32 = 0.05;
    pub const UFO_FLOAT_LIMIT: f32 = 10.0;
    pub const ENEMY_POINTS: u64 = 50;
    pub const STOMP_BOOST: f32 = 1.2;

    /// Forgiveness inset for player-vs-enemy and player-vs-powerup overlap
    pub const COLLISION_INSET: f32 = 5.0;

    /// Projectiles
    pub const PROJECTILE_SIZE: (f32, f32) = (4.0, 12.0);
    pub const PROJECTILE_VELOCITY: f32 = -15.0;
    /// Projectiles above this y are spent
    pub const PROJECTILE_CEILING: f32 = -50.0;
    /// Culling bound for projectiles during scroll
    pub const PROJECTILE_CULL: f32 = -100.0;

    /// Horizontal velocity below which the player snaps to rest
    pub const VELOCITY_EPSILON: f32 = 0.1;
    /// Scroll pixels per score point
    pub const SCROLL_PER_POINT: f64 = 10.0;
}

/// Horizontal distance between two x coordinates on a world that wraps at `width`
#[inline]
pub fn wrapped_distance(a: f32, b: f32, width: f32) -> f32 {
    let direct = (a - b).abs();
    direct.min(width - direct)
}

/// Wrap an entity's left edge so that leaving one side re-enters from the other
#[inline]
pub fn wrap_horizontal(x: f32, entity_width: f32, world_width: f32) -> f32 {
    if x + entity_width < 0.0 {
        world_width
    } else if x > world_width {
        -entity_width
    } else {
        x
    }
}
