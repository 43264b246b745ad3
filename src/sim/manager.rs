//! Platform generation, difficulty and lifecycle
//!
//! The manager keeps the live platform set stocked above the player,
//! scales spacing and the variant mix with the level, and culls platforms
//! that broke or dropped out of reach.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::platform::{LandingEffect, Platform};
use super::player::Player;
use crate::tuning::{Arena, DifficultyTuning, GenerationTuning, PlatformTuning, Tuning};

/// A platform the player landed on this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    /// Index into [`PlatformManager::platforms`]
    pub index: usize,
    pub effect: LandingEffect,
}

/// Owns every live platform and the generator state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformManager {
    /// Live platforms in insertion order (collision scan order)
    pub platforms: Vec<Platform>,
    /// Current vertical gap between generated platforms
    pub spacing: f32,
    /// Current difficulty level (1..=max_level)
    pub level: u32,
    pub arena: Arena,
    platform_tuning: PlatformTuning,
    generation: GenerationTuning,
    difficulty: DifficultyTuning,
    rng: Pcg32,
}

impl PlatformManager {
    /// Create a manager with the initial platform stack
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        let mut manager = Self {
            platforms: Vec::new(),
            spacing: tuning.difficulty.spacing_for_level(1),
            level: 1,
            arena: tuning.arena,
            platform_tuning: tuning.platform,
            generation: tuning.generation,
            difficulty: tuning.difficulty,
            rng: Pcg32::seed_from_u64(seed),
        };
        manager.populate();
        manager
    }

    /// Stack the initial platforms upward from the arena bottom
    pub fn populate(&mut self) {
        for i in 0..self.generation.initial_count {
            let x = self.random_x();
            let y = self.arena.height - i as f32 * self.spacing - self.generation.initial_bottom_offset;
            self.add_random_platform(Vec2::new(x, y));
        }
        log::debug!(
            "Populated {} platforms (spacing {})",
            self.generation.initial_count,
            self.spacing
        );
    }

    /// Random x inside the playable margin
    fn random_x(&mut self) -> f32 {
        let range = self.arena.width - self.generation.placement_inset;
        self.rng.random::<f32>() * range + self.generation.placement_margin
    }

    /// Add a platform whose variant is drawn from the current level's mix
    pub fn add_random_platform(&mut self, pos: Vec2) {
        let size = Vec2::new(self.platform_tuning.width, self.platform_tuning.height);
        let (normal, moving) = self.difficulty.variant_thresholds(self.level);
        let roll: f32 = self.rng.random();

        let platform = if roll < normal {
            Platform::normal(pos, size, &self.platform_tuning)
        } else if roll < moving {
            Platform::moving(pos, size, &self.platform_tuning)
        } else {
            Platform::breaking(pos, size, &self.platform_tuning)
        };
        self.platforms.push(platform);
    }

    /// Add a specific platform (the starting pad)
    pub fn push(&mut self, platform: Platform) {
        self.platforms.push(platform);
    }

    /// Find the first platform the player is landing on
    ///
    /// Scans in live-set order and stops at the first hit. Does not modify
    /// anything; apply the result with [`PlatformManager::land`].
    pub fn check_collisions(&self, player: &Player) -> Option<Landing> {
        self.platforms
            .iter()
            .position(|p| p.accepts_landing(player))
            .map(|index| Landing {
                index,
                effect: self.platforms[index].landing_effect(),
            })
    }

    /// Apply a landing's side effect to the platform it hit
    pub fn land(&mut self, landing: Landing) {
        if let Some(platform) = self.platforms.get_mut(landing.index) {
            platform.apply_landing(landing.effect);
        }
    }

    /// Per-frame upkeep, run after collision handling
    pub fn update(&mut self, player: &Player) {
        for platform in &mut self.platforms {
            platform.update();
        }

        let level = self.difficulty.level_for_height(player.height_climbed()).max(self.level);
        if level != self.level {
            log::debug!("Level {} -> {}", self.level, level);
            self.level = level;
        }
        self.spacing = self.difficulty.spacing_for_level(self.level);

        self.generate(player.pos.y);
        self.cleanup(player.pos.y);
    }

    /// Keep platforms stocked up to the lookahead above `player_y`
    pub fn generate(&mut self, player_y: f32) {
        let Some(mut top_y) = self.top_y() else {
            log::debug!("No platforms left, repopulating");
            self.populate();
            return;
        };

        while top_y > player_y - self.generation.lookahead {
            let x = self.random_x();
            top_y -= self.spacing;
            self.add_random_platform(Vec2::new(x, top_y));
        }
    }

    /// Drop broken platforms and ones far below the player
    pub fn cleanup(&mut self, player_y: f32) {
        let limit = player_y + self.generation.cull_distance;
        self.platforms.retain(|p| p.active && p.pos.y <= limit);
    }

    /// y of the highest live platform
    pub fn top_y(&self) -> Option<f32> {
        self.platforms.iter().map(|p| p.pos.y).reduce(f32::min)
    }

    /// Number of platforms still collidable
    pub fn active_count(&self) -> usize {
        self.platforms.iter().filter(|p| p.active).count()
    }
}
