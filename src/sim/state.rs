//! Game state and core simulation types
//!
//! Everything a run needs lives on `World`; there is no ambient state, so
//! independent worlds can run side by side.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a start command
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Discrete notifications for the audio layer, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    SpringBounce,
    PowerUpCollected(PowerUpKind),
    PlatformBreak,
    EnemyHit,
    Shoot,
    /// Periodic cue while a jetpack burns
    JetpackThrust,
    GameOver,
    NewHighScore(u64),
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// 1.0 facing right, -1.0 facing left
    pub facing: f32,
    pub on_ground: bool,
}

impl Player {
    /// Spawn position near the bottom of the canvas
    pub fn new(config: &GameConfig) -> Self {
        let size = config.player.size;
        Self {
            pos: Vec2::new(config.width / 2.0 - size / 2.0, config.height - 150.0),
            vel: Vec2::ZERO,
            size: Vec2::splat(size),
            facing: 1.0,
            on_ground: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Platform type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformKind {
    Normal,
    Moving,
    Breakable,
    Disappearing,
}

/// Per-type platform state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformState {
    Normal,
    /// Shuttles around `origin_x` by up to `range` each way
    Moving {
        origin_x: f32,
        direction: f32,
        speed: f32,
        range: f32,
    },
    /// One landing, then gone
    Breakable { broken: bool },
    /// Counts down once touched, then gone
    Disappearing { touched: bool, timer: u32, gone: bool },
}

/// A platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub state: PlatformState,
    /// A spring was attached at creation
    pub has_spring: bool,
}

impl Platform {
    pub fn kind(&self) -> PlatformKind {
        match self.state {
            PlatformState::Normal => PlatformKind::Normal,
            PlatformState::Moving { .. } => PlatformKind::Moving,
            PlatformState::Breakable { .. } => PlatformKind::Breakable,
            PlatformState::Disappearing { .. } => PlatformKind::Disappearing,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Broken and vanished platforms stay in the world until culled but are
    /// ignored by collision and reachability.
    pub fn is_solid(&self) -> bool {
        match self.state {
            PlatformState::Breakable { broken } => !broken,
            PlatformState::Disappearing { gone, .. } => !gone,
            _ => true,
        }
    }

    /// Left edges the player may launch from
    ///
    /// A moving platform is a launch point anywhere in its cycle, so both travel
    /// extremes and the rest position count.
    pub fn launch_xs(&self) -> [f32; 3] {
        match self.state {
            PlatformState::Moving { origin_x, range, .. } => {
                [origin_x - range, origin_x + range, origin_x]
            }
            _ => [self.pos.x; 3],
        }
    }

    /// Stable left edge: the rest position for moving platforms, x otherwise
    pub fn anchor_x(&self) -> f32 {
        match self.state {
            PlatformState::Moving { origin_x, .. } => origin_x,
            _ => self.pos.x,
        }
    }

    /// Advance per-tick platform behavior
    pub fn advance(&mut self, world_width: f32) {
        match &mut self.state {
            PlatformState::Moving {
                origin_x,
                direction,
                speed,
                range,
            } => {
                self.pos.x += *speed * *direction;
                if self.pos.x < *origin_x - *range || self.pos.x > *origin_x + *range {
                    *direction = -*direction;
                }
                // Screen edges bind before the travel range does
                if self.pos.x < 0.0 {
                    self.pos.x = 0.0;
                    *direction = 1.0;
                } else if self.pos.x + self.size.x > world_width {
                    self.pos.x = world_width - self.size.x;
                    *direction = -1.0;
                }
            }
            PlatformState::Disappearing { touched: true, timer, gone } => {
                *timer += 1;
                if *timer > DISAPPEAR_TICKS {
                    *gone = true;
                }
            }
            _ => {}
        }
    }

    /// React to the player landing; returns the event to emit beyond the jump
    pub fn on_landed(&mut self) -> Option<GameEvent> {
        match &mut self.state {
            PlatformState::Breakable { broken } => {
                *broken = true;
                Some(GameEvent::PlatformBreak)
            }
            PlatformState::Disappearing { touched, .. } => {
                *touched = true;
                None
            }
            _ => None,
        }
    }

    /// Render opacity: fades out over a disappearing platform's countdown
    pub fn opacity(&self) -> f32 {
        match self.state {
            PlatformState::Breakable { broken: true } => 0.0,
            PlatformState::Disappearing { gone: true, .. } => 0.0,
            PlatformState::Disappearing { touched: true, timer, .. } => {
                (1.0 - timer as f32 / DISAPPEAR_TICKS as f32).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// One-shot strong bounce, always sits on a platform
    Spring,
    /// Strong gravity override
    Jetpack,
    /// Gentle gravity override
    Propeller,
}

/// A power-up entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub collected: bool,
    /// Platform this rides on (springs only); looked up by id, never owned
    pub platform_id: Option<u32>,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn is_live_spring(&self) -> bool {
        self.kind == PowerUpKind::Spring && !self.collected
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Sits on a platform, riding it if it moves
    Monster,
    /// Floats freely and drifts side to side
    Ufo,
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub destroyed: bool,
    /// Perch platform (monsters only)
    pub platform_id: Option<u32>,
    /// Visual bob offset (UFOs)
    pub float_offset: f32,
    pub float_direction: f32,
    /// Horizontal drift direction and speed (UFOs)
    pub direction: f32,
    pub speed: f32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A player shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative, travels up)
    pub vel_y: f32,
    pub active: bool,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Gravity-overriding effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Jetpack,
    Propeller,
}

impl EffectKind {
    pub fn duration(&self) -> u32 {
        match self {
            EffectKind::Jetpack => JETPACK_TICKS,
            EffectKind::Propeller => PROPELLER_TICKS,
        }
    }

    /// Vertical velocity held while active
    pub fn velocity(&self) -> f32 {
        match self {
            EffectKind::Jetpack => JETPACK_VELOCITY,
            EffectKind::Propeller => PROPELLER_VELOCITY,
        }
    }
}

/// The single active override effect; absence means inactive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub remaining: u32,
}

impl ActiveEffect {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            remaining: kind.duration(),
        }
    }
}

/// Monotonic entity id allocator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Injected random source; every random draw in the simulation goes through it
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Ticks since the run started
    pub ticks: u64,
    /// Never decreases during a run
    pub score: u64,
    pub high_score: u64,
    /// Cumulative camera offset
    pub scroll: f64,
    pub player: Player,
    /// Insertion order, which is also bottom-to-top generation order
    pub platforms: Vec<Platform>,
    pub powerups: Vec<PowerUp>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub effect: Option<ActiveEffect>,
    /// Events raised since the caller last drained them
    pub events: Vec<GameEvent>,
    pub ids: EntityIds,
}

impl World {
    /// Create a world waiting in the start phase
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            player: Player::new(&config),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            ticks: 0,
            score: 0,
            high_score: 0,
            scroll: 0.0,
            platforms: Vec::new(),
            powerups: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            effect: None,
            events: Vec::new(),
            ids: EntityIds::default(),
        }
    }

    /// Reset player, world and score, build the opening stretch, and start playing
    ///
    /// The high score survives restarts.
    pub fn start(&mut self) {
        self.phase = GamePhase::Playing;
        self.ticks = 0;
        self.score = 0;
        self.scroll = 0.0;
        self.player = Player::new(&self.config);
        self.platforms.clear();
        self.powerups.clear();
        self.enemies.clear();
        self.projectiles.clear();
        self.effect = None;
        self.events.clear();
        self.ids = EntityIds::default();

        super::spawn::generate_initial_world(self);
        log::info!(
            "Run started (seed {}, {} platforms)",
            self.seed,
            self.platforms.len()
        );
    }

    /// Look up a platform by id
    pub fn platform(&self, id: u32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn effect_kind(&self) -> Option<EffectKind> {
        self.effect.map(|e| e.kind)
    }

    /// End the run, raising the high score if beaten
    pub fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver);
        self.settle_high_score();
        log::info!("Game over at score {} after {} ticks", self.score, self.ticks);
    }

    /// Raise the high score to the current score if beaten; true when raised
    ///
    /// Called on game over, and by callers that stop a run while it is still
    /// playing.
    pub fn settle_high_score(&mut self) -> bool {
        if self.score <= self.high_score {
            return false;
        }
        self.high_score = self.score;
        self.events.push(GameEvent::NewHighScore(self.score));
        log::info!("New high score: {}", self.score);
        true
    }
}
