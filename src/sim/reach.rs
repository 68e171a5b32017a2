//! Reachability-constrained platform placement
//!
//! Every new platform must be within one jump of a recent solid platform,
//! measured center to center on a horizontally wrapping world.

use rand::Rng;

use super::state::Platform;
use crate::config::GameConfig;
use crate::consts::{REACH_FALLBACK_FRACTION, REACH_MAX_ATTEMPTS};
use crate::wrapped_distance;

/// Decides horizontal placement for new platforms
#[derive(Debug, Clone, Copy)]
pub struct ReachOracle {
    pub max_reach: f32,
    pub world_width: f32,
    pub platform_width: f32,
}

impl ReachOracle {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            max_reach: config.max_horizontal_reach(),
            world_width: config.width,
            platform_width: config.platform_width,
        }
    }

    /// Rightmost valid left edge
    fn max_x(&self) -> f32 {
        (self.world_width - self.platform_width).max(0.0)
    }

    /// Whether a platform with left edge `x` is reachable from any source
    pub fn is_reachable<'a>(&self, x: f32, sources: impl IntoIterator<Item = &'a Platform>) -> bool {
        let new_center = x + self.platform_width / 2.0;
        sources.into_iter().any(|source| {
            source.launch_xs().iter().any(|&launch_x| {
                let center = launch_x + source.size.x / 2.0;
                wrapped_distance(new_center, center, self.world_width) <= self.max_reach
            })
        })
    }

    /// Pick a left edge for a new platform given the most recent ones
    ///
    /// Broken and vanished platforms are not launch points. With no usable
    /// source at all the placement is unconstrained.
    pub fn place<R: Rng + ?Sized>(&self, rng: &mut R, recent: &[Platform]) -> f32 {
        let usable: Vec<&Platform> = recent.iter().filter(|p| p.is_solid()).collect();
        if usable.is_empty() {
            log::debug!("No usable launch platform, placing freely");
            return rng.random::<f32>() * self.max_x();
        }

        for _ in 0..REACH_MAX_ATTEMPTS {
            let x = rng.random::<f32>() * self.max_x();
            if self.is_reachable(x, usable.iter().copied()) {
                return x;
            }
        }

        log::debug!("Random placement failed {REACH_MAX_ATTEMPTS} times, using fallback");
        let reference = usable[rng.random_range(0..usable.len())];
        self.fallback_x(rng, reference)
    }

    /// Place within a bounded offset of `reference`, clamped to the canvas
    ///
    /// Clamping can push the result out of reach when the reference's current
    /// position is far from every launch point (a moving platform shoved by the
    /// screen edge). In that case the platform goes directly over the
    /// reference's rest position, which is reachable by construction.
    pub fn fallback_x<R: Rng + ?Sized>(&self, rng: &mut R, reference: &Platform) -> f32 {
        let max_offset = self.max_reach * REACH_FALLBACK_FRACTION;
        let offset = (rng.random::<f32>() - 0.5) * 2.0 * max_offset;
        let x = (reference.center_x() + offset - self.platform_width / 2.0).clamp(0.0, self.max_x());
        if self.is_reachable(x, [reference]) {
            return x;
        }
        log::debug!("Clamped fallback out of reach, snapping over platform {}", reference.id);
        reference.anchor_x().clamp(0.0, self.max_x())
    }
}
