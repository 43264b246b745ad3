//! Data-driven game balance
//!
//! Every number the simulation uses lives here, defaulting to the values in
//! [`crate::consts`]. A tuning file is plain JSON; missing sections fall back
//! to their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Player size and physics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub move_speed: f32,
    pub max_fall_speed: f32,
    pub fall_threshold: f32,
    pub reference_height: f32,
    pub score_unit: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            move_speed: MOVE_SPEED,
            max_fall_speed: MAX_FALL_SPEED,
            fall_threshold: FALL_THRESHOLD,
            reference_height: REFERENCE_HEIGHT,
            score_unit: SCORE_UNIT,
        }
    }
}

/// Platform size and per-variant behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformTuning {
    pub width: f32,
    pub height: f32,
    pub moving_amplitude: f32,
    pub moving_speed: f32,
    pub break_duration: u32,
    pub landing_tolerance_below: f32,
    pub landing_tolerance_above: f32,
}

impl Default for PlatformTuning {
    fn default() -> Self {
        Self {
            width: PLATFORM_WIDTH,
            height: PLATFORM_HEIGHT,
            moving_amplitude: MOVING_AMPLITUDE,
            moving_speed: MOVING_SPEED,
            break_duration: BREAK_DURATION,
            landing_tolerance_below: LANDING_TOLERANCE_BELOW,
            landing_tolerance_above: LANDING_TOLERANCE_ABOVE,
        }
    }
}

/// Population, lookahead and culling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationTuning {
    pub initial_count: usize,
    pub initial_bottom_offset: f32,
    pub placement_inset: f32,
    pub placement_margin: f32,
    pub lookahead: f32,
    pub cull_distance: f32,
}

impl Default for GenerationTuning {
    fn default() -> Self {
        Self {
            initial_count: INITIAL_PLATFORMS,
            initial_bottom_offset: INITIAL_BOTTOM_OFFSET,
            placement_inset: PLACEMENT_INSET,
            placement_margin: PLACEMENT_MARGIN,
            lookahead: LOOKAHEAD,
            cull_distance: CULL_DISTANCE,
        }
    }
}

/// Level curve, spacing curve and variant mix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    pub level_height: f32,
    pub max_level: u32,
    pub max_spacing: f32,
    pub min_spacing: f32,
    pub spacing_step: f32,
    pub difficulty_divisor: f32,
    pub max_difficulty: f32,
    pub normal_base: f32,
    pub normal_floor: f32,
    pub moving_band: f32,
    pub moving_scale: f32,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            level_height: LEVEL_HEIGHT,
            max_level: MAX_LEVEL,
            max_spacing: MAX_SPACING,
            min_spacing: MIN_SPACING,
            spacing_step: SPACING_STEP,
            difficulty_divisor: DIFFICULTY_DIVISOR,
            max_difficulty: MAX_DIFFICULTY,
            normal_base: NORMAL_BASE,
            normal_floor: NORMAL_FLOOR,
            moving_band: MOVING_BAND,
            moving_scale: MOVING_SCALE,
        }
    }
}

impl DifficultyTuning {
    /// Level for a best height climbed: one level per `level_height`, capped
    pub fn level_for_height(&self, height_climbed: f32) -> u32 {
        let level = (height_climbed.abs() / self.level_height).floor() as u32 + 1;
        level.min(self.max_level)
    }

    /// Vertical gap between generated platforms at `level`
    pub fn spacing_for_level(&self, level: u32) -> f32 {
        let reduction = level.saturating_sub(1) as f32 * self.spacing_step;
        (self.max_spacing - reduction).max(self.min_spacing)
    }

    /// Difficulty factor in `[0, max_difficulty]` used for the variant mix
    pub fn difficulty_for_level(&self, level: u32) -> f32 {
        (level.saturating_sub(1) as f32 / self.difficulty_divisor).min(self.max_difficulty)
    }

    /// Upper edges of the Normal and Moving bands in `[0, 1)`
    ///
    /// Rolls below the first edge are Normal, below the second Moving, the
    /// rest Breaking.
    pub fn variant_thresholds(&self, level: u32) -> (f32, f32) {
        let d = self.difficulty_for_level(level);
        let normal = (self.normal_base - d).max(self.normal_floor);
        let moving = normal + self.moving_band + d * self.moving_scale;
        (normal, moving)
    }
}

/// Complete balance sheet for a session
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena: Arena,
    pub player: PlayerTuning,
    pub platform: PlatformTuning,
    pub generation: GenerationTuning,
    pub difficulty: DifficultyTuning,
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;
        positive("player.max_fall_speed", self.player.max_fall_speed)?;
        positive("player.score_unit", self.player.score_unit)?;
        positive("difficulty.level_height", self.difficulty.level_height)?;
        positive("difficulty.min_spacing", self.difficulty.min_spacing)?;
        positive("difficulty.difficulty_divisor", self.difficulty.difficulty_divisor)?;

        if self.difficulty.max_level == 0 {
            return Err(TuningError::Invalid {
                field: "difficulty.max_level",
                reason: "must be at least 1",
            });
        }
        if self.difficulty.max_spacing < self.difficulty.min_spacing {
            return Err(TuningError::Invalid {
                field: "difficulty.max_spacing",
                reason: "must not be below min_spacing",
            });
        }
        if self.generation.placement_inset > self.arena.width {
            return Err(TuningError::Invalid {
                field: "generation.placement_inset",
                reason: "must fit inside the arena width",
            });
        }
        Ok(())
    }
}
