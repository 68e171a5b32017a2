//! Fixed-tick simulation step
//!
//! Core game loop that advances the world one frame deterministically. The
//! order of the phases below matters: landing uses post-gravity velocity,
//! stomps are judged after enemies move, and the camera runs last so
//! generation sees the final player position.

use super::collision::{EnemyContact, enemy_contact, lands_on, touches};
use super::difficulty::difficulty_level;
use super::spawn::{extend_world, monster_position, spring_position};
use super::state::{
    ActiveEffect, EffectKind, EnemyKind, GameEvent, GamePhase, PlatformKind, PowerUpKind, Projectile, World,
};
use crate::consts::*;
use crate::wrap_horizontal;
use glam::Vec2;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move-left held
    pub left: bool,
    /// Move-right held
    pub right: bool,
    /// Shoot (one shot per press)
    pub fire: bool,
    /// Start a run from the start screen
    pub start: bool,
    /// Start a fresh run after game over
    pub restart: bool,
}

/// Advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput) {
    match world.phase {
        GamePhase::Start => {
            if input.start || input.restart {
                world.start();
            }
            return;
        }
        GamePhase::GameOver => {
            if input.restart || input.start {
                log::info!("Restarting run");
                world.start();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    world.ticks += 1;

    if input.fire {
        fire(world);
    }

    steer(world, input);

    // Integrate, then apply vertical force
    let player = &mut world.player;
    player.pos += player.vel;
    player.on_ground = false;
    match world.effect {
        Some(effect) => player.vel.y = effect.kind.velocity(),
        None => player.vel.y += world.config.player.gravity,
    }

    tick_effect(world);

    let player = &mut world.player;
    player.pos.x = wrap_horizontal(player.pos.x, player.size.x, world.config.width);

    let width = world.config.width;
    for platform in &mut world.platforms {
        platform.advance(width);
    }

    land_on_platforms(world);
    advance_enemies(world);
    advance_projectiles(world);
    shoot_enemies(world);

    if touch_enemies(world) {
        world.game_over();
        return;
    }

    collect_powerups(world);
    scroll(world);

    world.projectiles.retain(|p| p.active);

    if world.player.pos.y > world.config.height {
        world.game_over();
    }
}

fn fire(world: &mut World) {
    let player = &world.player;
    world.projectiles.push(Projectile {
        pos: Vec2::new(
            player.pos.x + player.size.x / 2.0 - PROJECTILE_SIZE.0 / 2.0,
            player.pos.y,
        ),
        size: Vec2::new(PROJECTILE_SIZE.0, PROJECTILE_SIZE.1),
        vel_y: PROJECTILE_VELOCITY,
        active: true,
    });
    world.events.push(GameEvent::Shoot);
}

/// Accelerate toward max speed while a direction is held, otherwise coast down
fn steer(world: &mut World, input: &TickInput) {
    let tuning = &world.config.player;
    let player = &mut world.player;

    if input.left {
        player.vel.x = (player.vel.x - tuning.acceleration).max(-tuning.max_speed);
        player.facing = -1.0;
    } else if input.right {
        player.vel.x = (player.vel.x + tuning.acceleration).min(tuning.max_speed);
        player.facing = 1.0;
    } else {
        let friction = if player.on_ground {
            tuning.ground_friction
        } else {
            tuning.air_friction
        };
        player.vel.x *= friction;
        if player.vel.x.abs() < VELOCITY_EPSILON {
            player.vel.x = 0.0;
        }
    }
}

/// Count down the override effect; expiry clears it in one step
fn tick_effect(world: &mut World) {
    let Some(effect) = world.effect.as_mut() else {
        return;
    };
    effect.remaining = effect.remaining.saturating_sub(1);
    if effect.kind == EffectKind::Jetpack && effect.remaining % JETPACK_THRUST_INTERVAL == 0 {
        world.events.push(GameEvent::JetpackThrust);
    }
    if effect.remaining == 0 {
        log::debug!("{:?} expired", effect.kind);
        world.effect = None;
    }
}

/// Bounce off any solid platform crossed this frame (falling, no override)
fn land_on_platforms(world: &mut World) {
    let player = &mut world.player;
    if player.vel.y <= 0.0 || world.effect.is_some() {
        return;
    }

    let jump = world.config.player.jump_power;
    for platform in &mut world.platforms {
        if !platform.is_solid() {
            continue;
        }
        if lands_on(&player.rect(), player.vel.y, &platform.rect()) {
            player.vel.y = jump;
            player.on_ground = true;
            world.events.push(GameEvent::Jump);
            if let Some(event) = platform.on_landed() {
                world.events.push(event);
            }
        }
    }
}

fn advance_enemies(world: &mut World) {
    let width = world.config.width;
    for enemy in world.enemies.iter_mut().filter(|e| !e.destroyed) {
        match enemy.kind {
            EnemyKind::Monster => {
                // Ride a moving perch
                let perch = enemy
                    .platform_id
                    .and_then(|id| world.platforms.iter().find(|p| p.id == id))
                    .filter(|p| p.kind() == PlatformKind::Moving);
                if let Some(perch) = perch {
                    enemy.pos.x = monster_position(perch).x;
                }
            }
            EnemyKind::Ufo => {
                enemy.float_offset += UFO_FLOAT_STEP * enemy.float_direction;
                if enemy.float_offset.abs() > UFO_FLOAT_LIMIT {
                    enemy.float_direction = -enemy.float_direction;
                }
                enemy.pos.x += enemy.speed * enemy.direction;
                if enemy.pos.x < 0.0 || enemy.pos.x + enemy.size.x > width {
                    enemy.direction = -enemy.direction;
                }
            }
        }
    }
}

fn advance_projectiles(world: &mut World) {
    for projectile in world.projectiles.iter_mut().filter(|p| p.active) {
        projectile.pos.y += projectile.vel_y;
        if projectile.pos.y < PROJECTILE_CEILING {
            projectile.active = false;
        }
    }
}

/// Projectile vs enemy: both die, points awarded
fn shoot_enemies(world: &mut World) {
    for projectile in world.projectiles.iter_mut().filter(|p| p.active) {
        let hit = world
            .enemies
            .iter_mut()
            .filter(|e| !e.destroyed)
            .find(|e| projectile.rect().overlaps(&e.rect()));
        if let Some(enemy) = hit {
            enemy.destroyed = true;
            projectile.active = false;
            world.score += ENEMY_POINTS;
            world.events.push(GameEvent::EnemyHit);
        }
    }
}

/// Player vs enemy. Returns true when the contact was lethal.
fn touch_enemies(world: &mut World) -> bool {
    let stomp_velocity = world.config.player.jump_power * STOMP_BOOST;
    for enemy in world.enemies.iter_mut().filter(|e| !e.destroyed) {
        let player = &mut world.player;
        match enemy_contact(&player.rect(), player.vel.y, &enemy.rect(), COLLISION_INSET) {
            Some(EnemyContact::Stomp) => {
                enemy.destroyed = true;
                player.vel.y = stomp_velocity;
                world.score += ENEMY_POINTS;
                world.events.push(GameEvent::EnemyHit);
            }
            Some(EnemyContact::Lethal) => return true,
            None => {}
        }
    }
    false
}

fn collect_powerups(world: &mut World) {
    let jump = world.config.player.jump_power;
    for powerup in world.powerups.iter_mut().filter(|p| !p.collected) {
        // Springs ride their platform
        if powerup.kind == PowerUpKind::Spring {
            let perch = powerup
                .platform_id
                .and_then(|id| world.platforms.iter().find(|p| p.id == id))
                .filter(|p| p.kind() == PlatformKind::Moving);
            if let Some(perch) = perch {
                powerup.pos.x = spring_position(perch).x;
            }
        }

        if !touches(&world.player.rect(), &powerup.rect(), COLLISION_INSET) {
            continue;
        }
        powerup.collected = true;
        match powerup.kind {
            PowerUpKind::Spring => {
                world.player.vel.y = jump * SPRING_BOOST;
                world.events.push(GameEvent::SpringBounce);
            }
            PowerUpKind::Jetpack | PowerUpKind::Propeller => {
                let kind = if powerup.kind == PowerUpKind::Jetpack {
                    EffectKind::Jetpack
                } else {
                    EffectKind::Propeller
                };
                // Replaces whatever was running
                world.effect = Some(ActiveEffect::new(kind));
                world.events.push(GameEvent::PowerUpCollected(powerup.kind));
            }
        }
    }
}

/// Pin the player at the midline by shifting the world down, then cull and regenerate
fn scroll(world: &mut World) {
    let midline = world.config.height / 2.0;
    if world.player.pos.y >= midline {
        return;
    }

    let delta = midline - world.player.pos.y;
    world.scroll += f64::from(delta);
    world.player.pos.y = midline;

    let shift = Vec2::new(0.0, delta);
    world.platforms.iter_mut().for_each(|p| p.pos += shift);
    world.powerups.iter_mut().for_each(|p| p.pos += shift);
    world.enemies.iter_mut().for_each(|e| e.pos += shift);
    world.projectiles.iter_mut().for_each(|p| p.pos += shift);

    let level_before = difficulty_level(world.score);
    world.score = world.score.max(score_for_scroll(world.scroll));
    let level_after = difficulty_level(world.score);
    if level_after != level_before {
        log::debug!("Difficulty level {} at score {}", level_after, world.score);
    }

    let floor = world.config.height + world.config.cull_margin;
    world.platforms.retain(|p| p.pos.y < floor);
    world.powerups.retain(|p| !p.collected && p.pos.y < floor);
    world.enemies.retain(|e| !e.destroyed && e.pos.y < floor);
    world.projectiles.retain(|p| p.active && p.pos.y > PROJECTILE_CULL);

    extend_world(world);
}

/// Score earned purely from climbing
pub fn score_for_scroll(scroll: f64) -> u64 {
    (scroll / SCROLL_PER_POINT).floor().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::spawn::create_powerup;
    use crate::sim::state::{Enemy, Platform, PlatformState};
    use proptest::prelude::*;

    /// A playing world with no entities; the player hangs at y=400 (below the midline)
    fn empty_world() -> World {
        let mut world = World::new(GameConfig::default(), 42);
        world.start();
        world.platforms.clear();
        world.powerups.clear();
        world.enemies.clear();
        world.events.clear();
        world.player.pos = Vec2::new(200.0, 400.0);
        world.player.vel = Vec2::ZERO;
        world
    }

    fn add_platform(world: &mut World, x: f32, y: f32, state: PlatformState) -> u32 {
        let id = world.ids.next_id();
        world.platforms.push(Platform {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::new(80.0, 15.0),
            state,
            has_spring: false,
        });
        id
    }

    fn add_enemy(world: &mut World, kind: EnemyKind, pos: Vec2) {
        let id = world.ids.next_id();
        world.enemies.push(Enemy {
            id,
            kind,
            pos,
            size: Vec2::new(40.0, 40.0),
            destroyed: false,
            platform_id: None,
            float_offset: 0.0,
            float_direction: 1.0,
            direction: 1.0,
            speed: UFO_SPEED,
        });
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_start_and_restart_transitions() {
        let mut world = World::new(GameConfig::default(), 1);
        tick(&mut world, &idle());
        assert_eq!(world.phase, GamePhase::Start);
        tick(&mut world, &TickInput { start: true, ..idle() });
        assert_eq!(world.phase, GamePhase::Playing);

        world.player.pos.y = 700.0;
        tick(&mut world, &idle());
        assert_eq!(world.phase, GamePhase::GameOver);
        assert!(world.events.contains(&GameEvent::GameOver));

        // Ignored until restart
        tick(&mut world, &TickInput { fire: true, ..idle() });
        assert_eq!(world.phase, GamePhase::GameOver);
        tick(&mut world, &TickInput { restart: true, ..idle() });
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.score, 0);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_horizontal_acceleration_and_friction() {
        let mut world = empty_world();
        let left = TickInput { left: true, ..idle() };
        // Hold the player mid-air so only air friction applies
        for _ in 0..30 {
            world.player.pos.y = 400.0;
            world.player.vel.y = 0.0;
            tick(&mut world, &left);
        }
        assert_eq!(world.player.vel.x, -6.0);
        assert_eq!(world.player.facing, -1.0);

        world.player.pos.y = 400.0;
        world.player.vel.y = 0.0;
        tick(&mut world, &idle());
        assert!((world.player.vel.x - (-6.0 * 0.92)).abs() < 1e-4);
        for _ in 0..60 {
            world.player.pos.y = 400.0;
            world.player.vel.y = 0.0;
            tick(&mut world, &idle());
        }
        assert_eq!(world.player.vel.x, 0.0);
    }

    #[test]
    fn test_player_wraps_horizontally() {
        let mut world = empty_world();
        world.player.pos.x = 449.0;
        world.player.vel.x = 5.0;
        tick(&mut world, &TickInput { right: true, ..idle() });
        assert_eq!(world.player.pos.x, -50.0);
    }

    #[test]
    fn test_landing_bounces_player() {
        let mut world = empty_world();
        // Player bottom at 450, platform top at 452
        add_platform(&mut world, 180.0, 452.0, PlatformState::Normal);
        world.player.vel.y = 3.0;
        tick(&mut world, &idle());
        assert_eq!(world.player.vel.y, -12.0);
        assert!(world.player.on_ground);
        assert!(world.events.contains(&GameEvent::Jump));
    }

    #[test]
    fn test_fast_fall_does_not_tunnel() {
        for speed in [10.0, 25.0, 49.6] {
            let mut world = empty_world();
            // Bottom starts 1px above the platform top
            add_platform(&mut world, 180.0, 451.0, PlatformState::Normal);
            world.player.vel.y = speed;
            tick(&mut world, &idle());
            assert_eq!(world.player.vel.y, -12.0, "tunneled at {speed}");
        }
    }

    #[test]
    fn test_breakable_platform_breaks_once() {
        let mut world = empty_world();
        let id = add_platform(&mut world, 180.0, 452.0, PlatformState::Breakable { broken: false });
        world.player.vel.y = 3.0;
        tick(&mut world, &idle());
        assert_eq!(world.player.vel.y, -12.0);
        assert!(world.events.contains(&GameEvent::PlatformBreak));
        assert!(!world.platform(id).unwrap().is_solid());

        // Same approach again falls straight through
        world.player.pos = Vec2::new(200.0, 400.0);
        world.player.vel = Vec2::new(0.0, 3.0);
        tick(&mut world, &idle());
        assert!(world.player.vel.y > 0.0);
        // Still in the collection until culled
        assert!(world.platform(id).is_some());
    }

    #[test]
    fn test_disappearing_platform_after_touch() {
        let mut world = empty_world();
        let id = add_platform(
            &mut world,
            180.0,
            452.0,
            PlatformState::Disappearing {
                touched: false,
                timer: 0,
                gone: false,
            },
        );
        world.player.vel.y = 3.0;
        tick(&mut world, &idle());
        assert_eq!(world.player.vel.y, -12.0);
        for _ in 0..=DISAPPEAR_TICKS {
            world.player.pos = Vec2::new(0.0, 400.0);
            world.player.vel = Vec2::ZERO;
            tick(&mut world, &idle());
        }
        assert!(!world.platform(id).unwrap().is_solid());
    }

    #[test]
    fn test_no_landing_while_override_active() {
        let mut world = empty_world();
        add_platform(&mut world, 180.0, 452.0, PlatformState::Normal);
        world.effect = Some(ActiveEffect::new(EffectKind::Propeller));
        world.player.vel.y = 3.0;
        tick(&mut world, &idle());
        assert_eq!(world.player.vel.y, PROPELLER_VELOCITY);
    }

    #[test]
    fn test_jetpack_runs_exactly_its_duration() {
        let mut world = empty_world();
        let jetpack = create_powerup(&mut world.ids, PowerUpKind::Jetpack, Vec2::new(200.0, 400.0), None);
        world.powerups.push(jetpack);

        tick(&mut world, &idle());
        assert_eq!(world.effect, Some(ActiveEffect::new(EffectKind::Jetpack)));
        assert_eq!(world.effect.unwrap().remaining, 180);

        for elapsed in 1..=180 {
            // Keep the sky clear so nothing else interferes
            world.enemies.clear();
            world.powerups.clear();
            tick(&mut world, &idle());
            assert_eq!(world.phase, GamePhase::Playing);
            if elapsed < 180 {
                assert!(world.effect.is_some(), "expired early at {elapsed}");
                assert_eq!(world.player.vel.y, JETPACK_VELOCITY);
            }
        }
        assert!(world.effect.is_none());

        // Gravity is back in charge
        world.enemies.clear();
        world.powerups.clear();
        let before = world.player.vel.y;
        tick(&mut world, &idle());
        assert!((world.player.vel.y - (before + 0.4)).abs() < 1e-4);
    }

    #[test]
    fn test_new_effect_replaces_running_one() {
        let mut world = empty_world();
        world.effect = Some(ActiveEffect {
            kind: EffectKind::Propeller,
            remaining: 37,
        });
        let jetpack = create_powerup(&mut world.ids, PowerUpKind::Jetpack, Vec2::new(200.0, 400.0), None);
        world.powerups.push(jetpack);
        tick(&mut world, &idle());
        assert_eq!(world.effect, Some(ActiveEffect::new(EffectKind::Jetpack)));
        assert!(world.events.contains(&GameEvent::PowerUpCollected(PowerUpKind::Jetpack)));
    }

    #[test]
    fn test_spring_launches_higher() {
        let mut world = empty_world();
        let spring = create_powerup(&mut world.ids, PowerUpKind::Spring, Vec2::new(210.0, 420.0), None);
        world.powerups.push(spring);
        tick(&mut world, &idle());
        assert!((world.player.vel.y - (-12.0 * 1.8)).abs() < 1e-4);
        assert!(world.effect.is_none());
        assert!(world.events.contains(&GameEvent::SpringBounce));
    }

    #[test]
    fn test_stomp_kills_enemy() {
        let mut world = empty_world();
        // Player bottom ends at 454, enemy midline at 460
        add_enemy(&mut world, EnemyKind::Monster, Vec2::new(205.0, 440.0));
        world.player.vel.y = 4.0;
        tick(&mut world, &idle());
        assert_eq!(world.phase, GamePhase::Playing);
        assert!(world.enemies[0].destroyed);
        assert!((world.player.vel.y - (-12.0 * 1.2)).abs() < 1e-4);
        assert_eq!(world.score, ENEMY_POINTS);
    }

    #[test]
    fn test_side_contact_is_lethal() {
        let mut world = empty_world();
        add_enemy(&mut world, EnemyKind::Monster, Vec2::new(230.0, 400.0));
        world.high_score = 10;
        world.score = 30;
        tick(&mut world, &idle());
        assert_eq!(world.phase, GamePhase::GameOver);
        assert_eq!(world.high_score, 30);
        assert!(world.events.contains(&GameEvent::NewHighScore(30)));
    }

    #[test]
    fn test_projectile_destroys_enemy() {
        let mut world = empty_world();
        add_enemy(&mut world, EnemyKind::Ufo, Vec2::new(205.0, 300.0));
        tick(&mut world, &TickInput { fire: true, ..idle() });
        assert!(world.events.contains(&GameEvent::Shoot));
        for _ in 0..10 {
            world.player.pos.y = 400.0;
            world.player.vel.y = 0.0;
            tick(&mut world, &idle());
        }
        assert!(world.enemies[0].destroyed);
        assert!(world.projectiles.is_empty());
        assert_eq!(world.score, ENEMY_POINTS);
    }

    #[test]
    fn test_monster_rides_moving_platform() {
        let mut world = empty_world();
        let id = add_platform(
            &mut world,
            100.0,
            200.0,
            PlatformState::Moving {
                origin_x: 100.0,
                direction: 1.0,
                speed: 2.0,
                range: 100.0,
            },
        );
        add_enemy(&mut world, EnemyKind::Monster, Vec2::new(120.0, 155.0));
        world.enemies[0].platform_id = Some(id);
        for _ in 0..5 {
            world.player.pos.y = 400.0;
            world.player.vel.y = 0.0;
            tick(&mut world, &idle());
        }
        assert_eq!(world.platforms[0].pos.x, 110.0);
        assert_eq!(world.enemies[0].pos.x, 130.0);
    }

    #[test]
    fn test_scroll_shifts_world_and_scores() {
        let mut world = World::new(GameConfig::default(), 5);
        world.start();
        world.player.pos.y = 200.0;
        world.player.vel = Vec2::ZERO;
        let before: Vec<f32> = world.platforms.iter().map(|p| p.pos.y).collect();
        tick(&mut world, &idle());
        // Player moved 0 then got pinned: 100px of scroll
        assert_eq!(world.player.pos.y, 300.0);
        assert!((world.scroll - 100.0).abs() < 1e-3);
        assert_eq!(world.score, 10);
        assert!((world.platforms[1].pos.y - (before[1] + 100.0)).abs() < 1e-3);
        assert!(world.platforms.len() >= 30);
    }

    #[test]
    fn test_scroll_culls_below_window() {
        let mut world = empty_world();
        // 100px of scroll pushes everything at y >= 600 past the 700 cull line
        let sunk_broken = add_platform(&mut world, 300.0, 650.0, PlatformState::Breakable { broken: true });
        let kept_broken = add_platform(&mut world, 300.0, 300.0, PlatformState::Breakable { broken: true });
        let kept = add_platform(&mut world, 0.0, 100.0, PlatformState::Normal);
        add_enemy(&mut world, EnemyKind::Monster, Vec2::new(0.0, 640.0));
        let sunk_enemy = world.enemies[0].id;
        let mut collected = create_powerup(&mut world.ids, PowerUpKind::Jetpack, Vec2::new(0.0, 0.0), None);
        collected.collected = true;
        let collected_id = collected.id;
        world.powerups.push(collected);

        world.player.pos.y = 200.0;
        tick(&mut world, &idle());

        assert!(world.platform(sunk_broken).is_none());
        // Broken but still on screen: stays until it scrolls off
        let broken = world.platform(kept_broken).unwrap();
        assert!(!broken.is_solid());
        assert_eq!(broken.pos.y, 400.0);
        assert_eq!(world.platform(kept).unwrap().pos.y, 200.0);
        assert!(world.enemies.iter().all(|e| e.id != sunk_enemy));
        assert!(world.powerups.iter().all(|p| p.id != collected_id));
        // Topped back up from the highest survivor
        assert_eq!(world.platforms.len(), 30);
    }

    #[test]
    fn test_ufo_bobs_and_bounces_off_edges() {
        let mut world = empty_world();
        add_enemy(&mut world, EnemyKind::Ufo, Vec2::new(409.5, 100.0));
        add_enemy(&mut world, EnemyKind::Ufo, Vec2::new(0.5, 100.0));
        world.enemies[1].direction = -1.0;

        let hold = |world: &mut World| {
            world.player.pos.y = 400.0;
            world.player.vel.y = 0.0;
            tick(world, &idle());
        };

        hold(&mut world);
        assert_eq!(world.enemies[0].pos.x, 410.5);
        assert_eq!(world.enemies[0].direction, -1.0);
        assert_eq!(world.enemies[1].pos.x, -0.5);
        assert_eq!(world.enemies[1].direction, 1.0);
        hold(&mut world);
        assert_eq!(world.enemies[0].pos.x, 409.5);
        assert_eq!(world.enemies[1].pos.x, 0.5);

        let mut peak: f32 = 0.0;
        for _ in 0..450 {
            hold(&mut world);
            let offset = world.enemies[0].float_offset;
            assert!(offset.abs() <= UFO_FLOAT_LIMIT + 2.0 * UFO_FLOAT_STEP);
            peak = peak.max(offset);
        }
        assert!(peak > UFO_FLOAT_LIMIT - 0.1);
        // Turned around and headed back down
        assert!(world.enemies[0].float_offset < peak);
    }

    #[test]
    fn test_projectile_spent_above_ceiling() {
        let mut world = empty_world();
        for y in [-40.0, -30.0] {
            world.projectiles.push(Projectile {
                pos: Vec2::new(0.0, y),
                size: Vec2::new(PROJECTILE_SIZE.0, PROJECTILE_SIZE.1),
                vel_y: PROJECTILE_VELOCITY,
                active: true,
            });
        }
        tick(&mut world, &idle());
        // -55 is past the ceiling, -45 is not
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.projectiles[0].pos.y, -45.0);
        assert!(world.projectiles[0].active);
    }

    #[test]
    fn test_jetpack_thrust_every_ten_ticks() {
        let thrusts = |kind: EffectKind| {
            let mut world = empty_world();
            world.effect = Some(ActiveEffect::new(kind));
            let mut count = 0;
            for _ in 0..30 {
                tick(&mut world, &idle());
                count += world
                    .drain_events()
                    .iter()
                    .filter(|e| **e == GameEvent::JetpackThrust)
                    .count();
            }
            count
        };
        assert_eq!(thrusts(EffectKind::Jetpack), 3);
        assert_eq!(thrusts(EffectKind::Propeller), 0);
    }

    #[test]
    fn test_score_keeps_climbing_on_long_runs() {
        let mut scroll: f64 = 1.0e9;
        let before = score_for_scroll(scroll);
        for _ in 0..10 {
            scroll += f64::from(1.0f32);
        }
        assert_eq!(score_for_scroll(scroll), before + 1);
        assert_eq!(score_for_scroll(-5.0), 0);
    }

    #[test]
    fn test_initial_world_has_only_normal_platforms() {
        for seed in 0..20 {
            let mut world = World::new(GameConfig::default(), seed);
            world.start();
            assert!(world.platforms.iter().all(|p| p.kind() == PlatformKind::Normal));
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(GameConfig::default(), 99999);
        let mut b = World::new(GameConfig::default(), 99999);
        let inputs = [
            TickInput { start: true, ..idle() },
            TickInput { right: true, ..idle() },
            TickInput { right: true, fire: true, ..idle() },
            idle(),
            TickInput { left: true, ..idle() },
        ];
        for _ in 0..40 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.ticks, b.ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.platforms.len(), b.platforms.len());
    }

    #[test]
    fn test_custom_canvas_size() {
        let mut world = World::new(GameConfig::with_canvas(800.0, 1000.0), 3);
        world.start();
        assert_eq!(world.platforms[0].pos, Vec2::new(360.0, 950.0));
        assert!(world.platforms.iter().all(|p| p.pos.x >= 0.0 && p.pos.x <= 720.0));
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, fire)| TickInput {
            left,
            right,
            fire,
            ..Default::default()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn score_never_decreases(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..300)) {
            let mut world = World::new(GameConfig::default(), seed);
            world.start();
            let mut last = world.score;
            for input in &inputs {
                tick(&mut world, input);
                prop_assert!(world.score >= last);
                last = world.score;
                if world.phase != GamePhase::Playing {
                    break;
                }
            }
        }

        #[test]
        fn effect_timer_stays_bounded(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..300)) {
            let mut world = World::new(GameConfig::default(), seed);
            world.start();
            world.effect = Some(ActiveEffect::new(EffectKind::Propeller));
            for input in &inputs {
                tick(&mut world, input);
                if let Some(effect) = world.effect {
                    prop_assert!(effect.remaining > 0);
                    prop_assert!(effect.remaining <= effect.kind.duration());
                }
                if world.phase != GamePhase::Playing {
                    break;
                }
            }
        }
    }
}
