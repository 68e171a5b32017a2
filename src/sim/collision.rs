//! Collision tests between the player and the world
//!
//! Platform landings are swept against the fall distance so fast falls
//! cannot tunnel through thin platforms.

use super::rect::Rect;

/// Outcome of the player touching a live enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    /// Landed on top while falling; the enemy dies
    Stomp,
    /// Side or bottom contact; the run ends
    Lethal,
}

/// Check whether a falling player lands on a platform this frame
///
/// The player's bottom edge must now be below the platform top, and it must
/// have been no lower than the platform's bottom edge `fall` pixels ago.
/// Only meaningful while falling (`fall > 0`).
pub fn lands_on(player: &Rect, fall: f32, platform: &Rect) -> bool {
    if fall <= 0.0 || !player.overlaps_x(platform) {
        return false;
    }
    let bottom = player.bottom();
    bottom > platform.top() && bottom - fall < platform.bottom()
}

/// Overlap with the player's hitbox shrunk by `inset` on every side
pub fn touches(player: &Rect, other: &Rect, inset: f32) -> bool {
    player.inset(inset).overlaps(other)
}

/// Classify contact between the player and an enemy, if any
pub fn enemy_contact(player: &Rect, vel_y: f32, enemy: &Rect, inset: f32) -> Option<EnemyContact> {
    if !touches(player, enemy, inset) {
        return None;
    }
    let enemy_mid = enemy.top() + enemy.size.y / 2.0;
    if vel_y > 0.0 && player.bottom() < enemy_mid {
        Some(EnemyContact::Stomp)
    } else {
        Some(EnemyContact::Lethal)
    }
}
