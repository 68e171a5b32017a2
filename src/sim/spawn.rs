//! Entity factory and world generation
//!
//! Platforms come from the reachability oracle plus the difficulty model.
//! Power-ups and enemies are best-effort: when no safe site exists they are
//! simply skipped this cycle.

use glam::Vec2;
use rand::Rng;

use super::difficulty::{random_platform_kind, ufo_chance};
use super::reach::ReachOracle;
use super::state::{
    Enemy, EnemyKind, EntityIds, Platform, PlatformKind, PlatformState, PowerUp, PowerUpKind, World,
};
use crate::config::GameConfig;
use crate::consts::*;

/// Build a platform at (x, y), sampling its type from the score unless forced normal
///
/// Fresh normal platforms carry a spring 15% of the time; it is returned
/// alongside and references the platform by id.
pub fn create_platform<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
    ids: &mut EntityIds,
    x: f32,
    y: f32,
    score: u64,
    force_normal: bool,
) -> (Platform, Option<PowerUp>) {
    let kind = if force_normal {
        PlatformKind::Normal
    } else {
        random_platform_kind(rng, score)
    };

    let state = match kind {
        PlatformKind::Normal => PlatformState::Normal,
        PlatformKind::Moving => PlatformState::Moving {
            origin_x: x,
            direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            speed: MOVING_PLATFORM_SPEED,
            range: MOVING_PLATFORM_RANGE,
        },
        PlatformKind::Breakable => PlatformState::Breakable { broken: false },
        PlatformKind::Disappearing => PlatformState::Disappearing {
            touched: false,
            timer: 0,
            gone: false,
        },
    };

    let mut platform = Platform {
        id: ids.next_id(),
        pos: Vec2::new(x, y),
        size: Vec2::new(config.platform_width, config.platform_height),
        state,
        has_spring: false,
    };

    let spring = if kind == PlatformKind::Normal && rng.random_bool(SPRING_CHANCE) {
        platform.has_spring = true;
        Some(create_powerup(
            ids,
            PowerUpKind::Spring,
            spring_position(&platform),
            Some(platform.id),
        ))
    } else {
        None
    };

    (platform, spring)
}

/// Where a spring sits on its platform: centered on the top surface
pub fn spring_position(platform: &Platform) -> Vec2 {
    Vec2::new(
        platform.center_x() - SPRING_SIZE.0 / 2.0,
        platform.pos.y - SPRING_SIZE.1,
    )
}

/// Where a monster perches on its platform
pub fn monster_position(platform: &Platform) -> Vec2 {
    Vec2::new(
        platform.center_x() - MONSTER_SIZE.0 / 2.0,
        platform.pos.y - MONSTER_PERCH,
    )
}

pub fn create_powerup(ids: &mut EntityIds, kind: PowerUpKind, pos: Vec2, platform_id: Option<u32>) -> PowerUp {
    let size = match kind {
        PowerUpKind::Spring => Vec2::new(SPRING_SIZE.0, SPRING_SIZE.1),
        PowerUpKind::Jetpack | PowerUpKind::Propeller => Vec2::splat(FLOATING_POWERUP_SIZE),
    };
    PowerUp {
        id: ids.next_id(),
        kind,
        pos,
        size,
        collected: false,
        platform_id,
    }
}

pub fn create_enemy<R: Rng + ?Sized>(
    rng: &mut R,
    ids: &mut EntityIds,
    kind: EnemyKind,
    pos: Vec2,
    platform_id: Option<u32>,
) -> Enemy {
    let size = match kind {
        EnemyKind::Monster => Vec2::new(MONSTER_SIZE.0, MONSTER_SIZE.1),
        EnemyKind::Ufo => Vec2::new(UFO_SIZE.0, UFO_SIZE.1),
    };
    Enemy {
        id: ids.next_id(),
        kind,
        pos,
        size,
        destroyed: false,
        platform_id,
        float_offset: 0.0,
        float_direction: 1.0,
        direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
        speed: UFO_SPEED,
    }
}

/// Maybe spawn a jetpack or propeller at height `y`
pub fn floating_powerup<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
    ids: &mut EntityIds,
    y: f32,
    score: u64,
) -> Option<PowerUp> {
    if score < FLOATING_POWERUP_MIN_SCORE || !rng.random_bool(FLOATING_POWERUP_CHANCE) {
        return None;
    }
    let kind = if rng.random_bool(JETPACK_WEIGHT) {
        PowerUpKind::Jetpack
    } else {
        PowerUpKind::Propeller
    };
    let x = rng.random::<f32>() * (config.width - FLOATING_POWERUP_SIZE).max(0.0);
    Some(create_powerup(ids, kind, Vec2::new(x, y), None))
}

/// Any uncollected spring whose top-left corner lies within `radius` of `point`
pub fn spring_nearby(point: Vec2, radius: f32, powerups: &[PowerUp]) -> bool {
    powerups
        .iter()
        .filter(|p| p.is_live_spring())
        .any(|p| p.pos.distance(point) < radius)
}

/// Whether an uncollected spring rides on this platform
pub fn platform_has_spring(platform: &Platform, powerups: &[PowerUp]) -> bool {
    powerups
        .iter()
        .any(|p| p.is_live_spring() && p.platform_id == Some(platform.id))
}

/// A monster may only sit where the player can deal with it without being
/// launched into it: a plain or moving platform with no spring on or near it.
pub fn is_safe_perch(platform: &Platform, powerups: &[PowerUp]) -> bool {
    if !matches!(platform.kind(), PlatformKind::Normal | PlatformKind::Moving) {
        return false;
    }
    if platform_has_spring(platform, powerups) {
        return false;
    }
    let perch = Vec2::new(platform.center_x(), platform.pos.y - MONSTER_PERCH);
    !spring_nearby(perch, MONSTER_SPRING_RADIUS, powerups)
}

/// Maybe spawn an enemy near height `y`
///
/// Monsters need a safe perch among `recent`; UFOs retry a few x positions
/// away from springs. Either may come back empty.
pub fn generate_enemy<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
    ids: &mut EntityIds,
    y: f32,
    score: u64,
    recent: &[Platform],
    powerups: &[PowerUp],
) -> Option<Enemy> {
    if score < ENEMY_MIN_SCORE || !rng.random_bool(ENEMY_CHANCE) {
        return None;
    }

    let kind = if rng.random::<f32>() < ufo_chance(score) {
        EnemyKind::Ufo
    } else {
        EnemyKind::Monster
    };

    match kind {
        EnemyKind::Monster => {
            let perches: Vec<&Platform> = recent.iter().filter(|p| is_safe_perch(p, powerups)).collect();
            if perches.is_empty() {
                log::debug!("No safe perch for a monster at score {score}");
                return None;
            }
            let perch = perches[rng.random_range(0..perches.len())];
            Some(create_enemy(
                rng,
                ids,
                EnemyKind::Monster,
                monster_position(perch),
                Some(perch.id),
            ))
        }
        EnemyKind::Ufo => {
            for _ in 0..UFO_ATTEMPTS {
                let x = rng.random::<f32>() * (config.width - UFO_SIZE.0).max(0.0);
                if !spring_nearby(Vec2::new(x, y), UFO_SPRING_RADIUS, powerups) {
                    return Some(create_enemy(rng, ids, EnemyKind::Ufo, Vec2::new(x, y), None));
                }
            }
            log::debug!("UFO spawn skipped, springs everywhere near y={y}");
            None
        }
    }
}

fn recent_tail(platforms: &[Platform], count: usize) -> &[Platform] {
    &platforms[platforms.len().saturating_sub(count)..]
}

/// Add one platform above the current topmost, returning its y
fn push_platform_above(world: &mut World, oracle: &ReachOracle, score: u64) -> f32 {
    let World {
        config,
        rng,
        ids,
        platforms,
        powerups,
        ..
    } = world;

    let Some(top) = platforms.last() else {
        // Nothing left to build from: restart the column with a safe platform
        let x = config.width / 2.0 - config.platform_width / 2.0;
        let y = config.height - 50.0;
        let (platform, spring) = create_platform(rng, config, ids, x, y, score, true);
        platforms.push(platform);
        powerups.extend(spring);
        return y;
    };

    let y = top.pos.y - config.platform_gap - rng.random::<f32>() * config.platform_gap_jitter;
    let x = oracle.place(rng, recent_tail(platforms, RECENT_PLATFORMS));
    let (platform, spring) = create_platform(rng, config, ids, x, y, score, false);
    platforms.push(platform);
    powerups.extend(spring);
    y
}

/// Top the world up to the target platform count, spawning extras as it goes
pub fn extend_world(world: &mut World) {
    let oracle = ReachOracle::new(&world.config);
    let score = world.score;

    while world.platforms.len() < world.config.target_platforms {
        let y = push_platform_above(world, &oracle, score);

        let World {
            config,
            rng,
            ids,
            platforms,
            powerups,
            enemies,
            ..
        } = world;

        if let Some(powerup) = floating_powerup(rng, config, ids, y - FLOATING_POWERUP_LIFT, score) {
            powerups.push(powerup);
        }
        let recent = recent_tail(platforms, RECENT_PLATFORMS_FOR_ENEMY);
        if let Some(enemy) = generate_enemy(rng, config, ids, y - UFO_LIFT, score, recent, powerups) {
            enemies.push(enemy);
        }
    }
}

/// The opening stretch: a guaranteed normal platform under the player, then
/// platforms up to `initial_extent` above the canvas, all at score 0
pub fn generate_initial_world(world: &mut World) {
    let oracle = ReachOracle::new(&world.config);
    let ceiling = -world.config.initial_extent;

    let mut y = push_platform_above(world, &oracle, 0);
    while y > ceiling {
        let next = push_platform_above(world, &oracle, 0);
        if next >= y {
            log::warn!("Platform spacing does not climb (gap {}), stopping generation", world.config.platform_gap);
            break;
        }
        y = next;
    }
}
