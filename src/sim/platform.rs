//! Platforms and their variant behaviour

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, LandingBand, lands_on};
use super::player::Player;
use crate::tuning::PlatformTuning;

/// Lifecycle of a breaking platform. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakState {
    /// Untouched
    Intact,
    /// Landed on; counts frames until it gives way
    Triggered { elapsed: u32 },
    /// Gone. The platform is inactive from here on.
    Broken,
}

/// Platform variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Static
    Normal,
    /// Oscillates horizontally around `origin_x`
    Moving {
        origin_x: f32,
        phase: f32,
        amplitude: f32,
        speed: f32,
    },
    /// Holds one landing, then crumbles after `break_duration` frames
    Breaking {
        state: BreakState,
        break_duration: u32,
    },
}

/// Side effect a landing has on the platform that was landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingEffect {
    None,
    /// Start the break countdown on an intact breaking platform
    Trigger,
}

/// A platform the player can bounce off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Centre position
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PlatformKind,
    pub active: bool,
    pub band: LandingBand,
}

impl Platform {
    fn with_kind(pos: Vec2, size: Vec2, kind: PlatformKind, tuning: &PlatformTuning) -> Self {
        Self {
            pos,
            size,
            kind,
            active: true,
            band: LandingBand {
                below: tuning.landing_tolerance_below,
                above: tuning.landing_tolerance_above,
            },
        }
    }

    pub fn normal(pos: Vec2, size: Vec2, tuning: &PlatformTuning) -> Self {
        Self::with_kind(pos, size, PlatformKind::Normal, tuning)
    }

    pub fn moving(pos: Vec2, size: Vec2, tuning: &PlatformTuning) -> Self {
        let kind = PlatformKind::Moving {
            origin_x: pos.x,
            phase: 0.0,
            amplitude: tuning.moving_amplitude,
            speed: tuning.moving_speed,
        };
        Self::with_kind(pos, size, kind, tuning)
    }

    pub fn breaking(pos: Vec2, size: Vec2, tuning: &PlatformTuning) -> Self {
        let kind = PlatformKind::Breaking {
            state: BreakState::Intact,
            break_duration: tuning.break_duration,
        };
        Self::with_kind(pos, size, kind, tuning)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Advance per-frame behaviour
    pub fn update(&mut self) {
        match &mut self.kind {
            PlatformKind::Normal => {}
            PlatformKind::Moving {
                origin_x,
                phase,
                amplitude,
                speed,
            } => {
                *phase += *speed;
                self.pos.x = *origin_x + phase.sin() * *amplitude;
            }
            PlatformKind::Breaking {
                state,
                break_duration,
            } => {
                if let BreakState::Triggered { elapsed } = state {
                    *elapsed += 1;
                    if *elapsed > *break_duration {
                        *state = BreakState::Broken;
                        self.active = false;
                    }
                }
            }
        }
    }

    /// Whether the player is landing on this platform this frame
    ///
    /// Pure: never changes the platform. Pair with [`Platform::landing_effect`]
    /// and [`Platform::apply_landing`] to run the variant transition.
    pub fn accepts_landing(&self, player: &Player) -> bool {
        self.active && lands_on(&player.bounds(), player.vel.y, &self.bounds(), &self.band)
    }

    /// Transition an accepted landing would cause
    pub fn landing_effect(&self) -> LandingEffect {
        match self.kind {
            PlatformKind::Breaking {
                state: BreakState::Intact,
                ..
            } => LandingEffect::Trigger,
            _ => LandingEffect::None,
        }
    }

    /// Apply the transition of an accepted landing
    pub fn apply_landing(&mut self, effect: LandingEffect) {
        if effect != LandingEffect::Trigger {
            return;
        }
        if let PlatformKind::Breaking { state, .. } = &mut self.kind {
            if *state == BreakState::Intact {
                *state = BreakState::Triggered { elapsed: 0 };
            }
        }
    }

    /// Whether this is a breaking platform that has been landed on
    pub fn is_triggered(&self) -> bool {
        matches!(
            self.kind,
            PlatformKind::Breaking {
                state: BreakState::Triggered { .. },
                ..
            }
        )
    }

    /// Flicker phase for a crumbling platform (true = bright frame)
    pub fn flash_on(&self) -> bool {
        match self.kind {
            PlatformKind::Breaking {
                state: BreakState::Triggered { elapsed },
                ..
            } => elapsed % 10 < 5,
            _ => false,
        }
    }
}
