//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per display frame
//! - Seeded RNG only
//! - Stable iteration order (platform insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod manager;
pub mod platform;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Aabb, LandingBand, lands_on};
pub use manager::{Landing, PlatformManager};
pub use platform::{BreakState, LandingEffect, Platform, PlatformKind};
pub use player::Player;
pub use state::{GameEvent, GamePhase, GameState, run_seed};
pub use tick::{TickInput, tick};
