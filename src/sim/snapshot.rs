//! Read-only per-frame view of the world
//!
//! The renderer and audio layers consume this instead of reaching into
//! `World`. It serializes to JSON for the headless runner.

use glam::Vec2;
use serde::Serialize;

use super::difficulty::{Theme, difficulty_level, difficulty_name, music_intensity};
use super::state::{EffectKind, EnemyKind, GamePhase, PlatformKind, PowerUpKind, World};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub facing: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformView {
    pub id: u32,
    pub kind: PlatformKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// False once broken or vanished
    pub solid: bool,
    /// Fade fraction; 0.0 once broken or vanished
    pub opacity: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerUpView {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical draw offset for the bob animation
    pub float_offset: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectView {
    pub kind: EffectKind,
    pub remaining: u32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub ticks: u64,
    pub score: u64,
    pub high_score: u64,
    pub level: u8,
    pub level_name: &'static str,
    pub music_intensity: u8,
    pub theme: Theme,
    pub effect: Option<EffectView>,
    pub player: PlayerView,
    pub platforms: Vec<PlatformView>,
    pub powerups: Vec<PowerUpView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<Vec2>,
}

impl World {
    /// Capture the drawable state; dead entities are left out
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase,
            ticks: self.ticks,
            score: self.score,
            high_score: self.high_score,
            level: difficulty_level(self.score),
            level_name: difficulty_name(self.score),
            music_intensity: music_intensity(self.score),
            theme: Theme::for_score(self.score),
            effect: self.effect.map(|e| EffectView {
                kind: e.kind,
                remaining: e.remaining,
            }),
            player: PlayerView {
                pos: self.player.pos,
                vel: self.player.vel,
                size: self.player.size,
                facing: self.player.facing,
            },
            platforms: self
                .platforms
                .iter()
                .map(|p| PlatformView {
                    id: p.id,
                    kind: p.kind(),
                    pos: p.pos,
                    size: p.size,
                    solid: p.is_solid(),
                    opacity: p.opacity(),
                })
                .collect(),
            powerups: self
                .powerups
                .iter()
                .filter(|p| !p.collected)
                .map(|p| PowerUpView {
                    id: p.id,
                    kind: p.kind,
                    pos: p.pos,
                    size: p.size,
                })
                .collect(),
            enemies: self
                .enemies
                .iter()
                .filter(|e| !e.destroyed)
                .map(|e| EnemyView {
                    id: e.id,
                    kind: e.kind,
                    pos: e.pos,
                    size: e.size,
                    float_offset: e.float_offset,
                })
                .collect(),
            projectiles: self.projectiles.iter().filter(|p| p.active).map(|p| p.pos).collect(),
        }
    }
}
