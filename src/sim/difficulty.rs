//! Score-driven difficulty
//!
//! Five bands share one set of thresholds: platform mix, the displayed level,
//! music intensity and background theme all step up together.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::PlatformKind;
use crate::consts::{UFO_MAX_CHANCE, UFO_SCORE_SCALE};

/// Lower score bound of each band
pub const BAND_THRESHOLDS: [u64; 5] = [0, 300, 800, 1400, 2000];

// Entries are walked in this order when sampling
const BAND_1: &[(PlatformKind, f64)] = &[(PlatformKind::Normal, 1.0)];
const BAND_2: &[(PlatformKind, f64)] = &[(PlatformKind::Normal, 0.75), (PlatformKind::Moving, 0.25)];
const BAND_3: &[(PlatformKind, f64)] = &[
    (PlatformKind::Normal, 0.60),
    (PlatformKind::Moving, 0.25),
    (PlatformKind::Breakable, 0.15),
];
const BAND_4: &[(PlatformKind, f64)] = &[
    (PlatformKind::Normal, 0.55),
    (PlatformKind::Moving, 0.25),
    (PlatformKind::Breakable, 0.10),
    (PlatformKind::Disappearing, 0.10),
];
const BAND_5: &[(PlatformKind, f64)] = &[
    (PlatformKind::Normal, 0.45),
    (PlatformKind::Moving, 0.30),
    (PlatformKind::Breakable, 0.12),
    (PlatformKind::Disappearing, 0.13),
];

/// Difficulty level 1..=5 for a score
pub fn difficulty_level(score: u64) -> u8 {
    BAND_THRESHOLDS.iter().filter(|&&t| score >= t).count() as u8
}

/// Display label for the difficulty level
pub fn difficulty_name(score: u64) -> &'static str {
    match difficulty_level(score) {
        1 => "Easy",
        2 => "Normal",
        3 => "Medium",
        4 => "Hard",
        _ => "Expert",
    }
}

/// Music intensity 1..=5 for the audio layer
pub fn music_intensity(score: u64) -> u8 {
    difficulty_level(score)
}

/// Platform type probabilities for a score, in stable sampling order
pub fn platform_distribution(score: u64) -> &'static [(PlatformKind, f64)] {
    match difficulty_level(score) {
        1 => BAND_1,
        2 => BAND_2,
        3 => BAND_3,
        4 => BAND_4,
        _ => BAND_5,
    }
}

/// Walk cumulative mass; `None` if the draw lands past the accumulated total
pub fn pick_from(distribution: &[(PlatformKind, f64)], draw: f64) -> Option<PlatformKind> {
    let mut cumulative = 0.0;
    for &(kind, probability) in distribution {
        cumulative += probability;
        if draw < cumulative {
            return Some(kind);
        }
    }
    None
}

/// Map a uniform draw in [0, 1) to a platform type for this score
pub fn sample_platform_kind(score: u64, draw: f64) -> PlatformKind {
    pick_from(platform_distribution(score), draw).unwrap_or_else(|| {
        log::warn!("Platform distribution left mass unassigned (score {score}, draw {draw})");
        PlatformKind::Normal
    })
}

/// Draw a platform type for this score
pub fn random_platform_kind<R: Rng + ?Sized>(rng: &mut R, score: u64) -> PlatformKind {
    sample_platform_kind(score, rng.random::<f64>())
}

/// Share of enemy spawns that are UFOs; grows with score, capped
pub fn ufo_chance(score: u64) -> f32 {
    (score as f32 / UFO_SCORE_SCALE).min(UFO_MAX_CHANCE)
}

/// Background theme for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Notebook,
    Sky,
    Sunset,
    Night,
    Space,
}

impl Theme {
    pub fn for_score(score: u64) -> Self {
        match difficulty_level(score) {
            1 => Theme::Notebook,
            2 => Theme::Sky,
            3 => Theme::Sunset,
            4 => Theme::Night,
            _ => Theme::Space,
        }
    }
}
