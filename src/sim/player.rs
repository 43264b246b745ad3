//! The player: bouncing physics, screen wrap and height scoring

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::{Arena, PlayerTuning};

/// The bouncing player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Centre position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Score derived from `max_height`
    pub score: u64,
    /// Best (minimum) y ever reached this run. Starts at the world origin.
    pub max_height: f32,
    pub tuning: PlayerTuning,
}

impl Player {
    pub fn new(pos: Vec2, tuning: PlayerTuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            score: 0,
            max_height: 0.0,
            tuning,
        }
    }

    /// Spawn at the bottom centre of the arena
    pub fn spawn(arena: &Arena, tuning: PlayerTuning) -> Self {
        Self::new(
            Vec2::new(arena.width / 2.0, arena.height - crate::consts::PLAYER_SPAWN_OFFSET),
            tuning,
        )
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.tuning.width, self.tuning.height)
    }

    /// Bounding box for collision
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size())
    }

    /// Pull velocity down by gravity, capped at the terminal fall speed
    pub fn apply_gravity(&mut self) {
        self.vel.y = (self.vel.y + self.tuning.gravity).min(self.tuning.max_fall_speed);
    }

    /// Advance one frame with the current steering snapshot
    pub fn update(&mut self, left: bool, right: bool, arena: &Arena) {
        // Steering is a direct velocity set, no acceleration
        self.vel.x = if left {
            -self.tuning.move_speed
        } else if right {
            self.tuning.move_speed
        } else {
            0.0
        };

        self.apply_gravity();
        self.pos += self.vel;
        self.wrap(arena.width);
        self.record_height();
    }

    /// Wrap horizontally once the sprite has fully left the screen
    fn wrap(&mut self, arena_width: f32) {
        let half = self.tuning.width / 2.0;
        if self.pos.x < -half {
            self.pos.x = arena_width + half;
        }
        if self.pos.x > arena_width + half {
            self.pos.x = -half;
        }
    }

    /// Track the climbing record and rescore
    fn record_height(&mut self) {
        if self.pos.y < self.max_height {
            self.max_height = self.pos.y;
            let raw = ((self.tuning.reference_height - self.max_height) / self.tuning.score_unit)
                .floor();
            let score = raw.max(0.0) as u64;
            // max_height only ever decreases, so this never lowers the score
            self.score = self.score.max(score);
        }
    }

    /// Bounce: replace vertical velocity with the jump impulse
    pub fn jump(&mut self) {
        self.vel.y = -self.tuning.jump_impulse;
    }

    /// Best height climbed above the world origin (never negative)
    pub fn height_climbed(&self) -> f32 {
        (-self.max_height).max(0.0)
    }

    /// Whether the player dropped further than allowed below the best height
    pub fn has_fallen_too_far(&self) -> bool {
        self.pos.y > self.max_height + self.tuning.fall_threshold
    }
}
