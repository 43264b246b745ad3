//! Doodle Jump - a vertical bouncing platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, platforms, generation, game state)
//! - `platform`: Browser/native platform abstraction (input edges, storage)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Persisted best score
//! - `settings`: Player preferences (key bindings)
//! - `session`: Host-side driver tying input and storage to the simulation

pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// World units are canvas pixels with y growing downward, so climbing
/// means y decreasing. One simulation step is one display frame.
pub mod consts {
    /// Default arena (canvas) dimensions
    pub const ARENA_WIDTH: f32 = 400.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player sprite size
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 70.0;
    /// Player spawns this far above the arena bottom
    pub const PLAYER_SPAWN_OFFSET: f32 = 100.0;

    /// Player physics (per frame)
    pub const GRAVITY: f32 = 0.4;
    pub const JUMP_IMPULSE: f32 = 12.0;
    pub const MOVE_SPEED: f32 = 5.0;
    pub const MAX_FALL_SPEED: f32 = 15.0;

    /// How far below the best height the player may drop before the run ends
    pub const FALL_THRESHOLD: f32 = 1200.0;
    /// Baseline height the score is measured against
    pub const REFERENCE_HEIGHT: f32 = 2500.0;
    /// World units per score point
    pub const SCORE_UNIT: f32 = 10.0;

    /// Generated platform size
    pub const PLATFORM_WIDTH: f32 = 60.0;
    pub const PLATFORM_HEIGHT: f32 = 12.0;

    /// Starting pad placed under the player at session start
    pub const START_PAD_WIDTH: f32 = 80.0;
    pub const START_PAD_HEIGHT: f32 = 15.0;
    pub const START_PAD_OFFSET: f32 = 50.0;

    /// Moving platform oscillation
    pub const MOVING_AMPLITUDE: f32 = 50.0;
    pub const MOVING_SPEED: f32 = 0.05;

    /// Frames a triggered breaking platform survives
    pub const BREAK_DURATION: u32 = 30;

    /// Landing band: bottom edge may sit this far below the platform top...
    pub const LANDING_TOLERANCE_BELOW: f32 = 5.0;
    /// ...or this far above it
    pub const LANDING_TOLERANCE_ABOVE: f32 = 10.0;

    /// Initial population
    pub const INITIAL_PLATFORMS: usize = 15;
    pub const INITIAL_BOTTOM_OFFSET: f32 = 100.0;
    /// Horizontal placement: x = rand * (width - PLACEMENT_INSET) + PLACEMENT_MARGIN
    pub const PLACEMENT_INSET: f32 = 40.0;
    pub const PLACEMENT_MARGIN: f32 = 30.0;

    /// Platforms must exist at least this far above the player
    pub const LOOKAHEAD: f32 = 500.0;
    /// Platforms further than this below the player are culled
    pub const CULL_DISTANCE: f32 = 800.0;

    /// Height climbed per level
    pub const LEVEL_HEIGHT: f32 = 1500.0;
    pub const MAX_LEVEL: u32 = 15;

    /// Vertical spacing between generated platforms
    pub const MAX_SPACING: f32 = 80.0;
    pub const MIN_SPACING: f32 = 40.0;
    pub const SPACING_STEP: f32 = 2.5;

    /// Variant mix
    pub const DIFFICULTY_DIVISOR: f32 = 10.0;
    pub const MAX_DIFFICULTY: f32 = 0.7;
    pub const NORMAL_BASE: f32 = 0.7;
    pub const NORMAL_FLOOR: f32 = 0.3;
    pub const MOVING_BAND: f32 = 0.15;
    pub const MOVING_SCALE: f32 = 0.3;
}
