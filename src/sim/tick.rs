//! Per-frame simulation tick
//!
//! One call advances the session by exactly one display frame.

use super::platform::Platform;
use super::state::{GameEvent, GamePhase, GameState};

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steer left held
    pub left: bool,
    /// Steer right held
    pub right: bool,
    /// Start/restart action. Must be edge-triggered by the caller.
    pub confirm: bool,
    /// Idle/demo mode - AI steers the player
    pub idle_mode: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Start => {
            if input.confirm || input.idle_mode {
                state.start_game();
            }
        }
        GamePhase::GameOver => {
            if input.confirm {
                // Restart goes back through the title screen and straight in
                state.phase = GamePhase::Start;
                state.start_game();
            }
        }
        GamePhase::Playing => {
            let input = if input.idle_mode {
                autopilot(state)
            } else {
                input.clone()
            };
            step(state, &input);
        }
    }
}

/// The Playing pipeline
fn step(state: &mut GameState, input: &TickInput) {
    state.frame += 1;
    let arena = state.tuning.arena;

    state.player.update(input.left, input.right, &arena);

    // Scan every platform before anything moves or gets culled
    if let Some(landing) = state.platforms.check_collisions(&state.player) {
        state.platforms.land(landing);
        state.player.jump();
        state.events.push(GameEvent::Bounced {
            index: landing.index,
        });
    }

    state.platforms.update(&state.player);

    let level = state.platforms.level;
    if level > state.level {
        state.events.push(GameEvent::LevelUp { level });
        log::info!("Reached level {}", level);
    }
    state.level = level;
    state.score = state.player.score;

    if state.player.has_fallen_too_far() {
        state.end_game();
    }

    state.update_camera();
}

/// Steer toward the best platform to land on
///
/// While rising, aim for the highest platform the current jump can still
/// reach; otherwise line up with the nearest one under the player's feet.
fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let rising = if player.vel.y < 0.0 {
        reachable_above(state)
    } else {
        None
    };
    let target = rising.or_else(|| nearest_below(state));

    let mut input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    if let Some(platform) = target {
        let dx = wrapped_dx(state, platform.pos.x);
        let deadzone = player.tuning.move_speed;
        input.left = dx < -deadzone;
        input.right = dx > deadzone;
    }
    input
}

/// Platforms worth aiming for
fn landable(state: &GameState) -> impl Iterator<Item = &Platform> {
    state
        .platforms
        .platforms
        .iter()
        .filter(|p| p.active && !p.is_triggered())
}

/// Horizontal offset from the player to `x`, the short way around the wrap
fn wrapped_dx(state: &GameState, x: f32) -> f32 {
    let player = &state.player;
    let period = state.tuning.arena.width + player.tuning.width;
    let dx = x - player.pos.x;
    if dx > period / 2.0 {
        dx - period
    } else if dx < -period / 2.0 {
        dx + period
    } else {
        dx
    }
}

/// Highest platform above the feet that the current jump can still land on
fn reachable_above(state: &GameState) -> Option<&Platform> {
    let player = &state.player;
    let gravity = player.tuning.gravity;
    let speed = -player.vel.y;
    let feet = player.bounds().bottom();
    // Peak of the per-frame integration, slightly lower than the parabola's
    let apex = feet - (speed * speed / (2.0 * gravity) - speed / 2.0).max(0.0);
    let frames_up = speed / gravity;

    landable(state)
        .filter(|p| {
            let top = p.bounds().top();
            if top < apex || top >= feet {
                return false;
            }
            let frames_down = (2.0 * (top - apex) / gravity).sqrt();
            let reach = player.tuning.move_speed * (frames_up + frames_down)
                + (player.tuning.width + p.size.x) / 2.0;
            wrapped_dx(state, p.pos.x).abs() <= reach
        })
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
}

/// Closest platform whose top the feet have not fallen past
fn nearest_below(state: &GameState) -> Option<&Platform> {
    let feet = state.player.bounds().bottom();
    landable(state)
        .filter(|p| p.bounds().top() >= feet - p.band.below)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BreakState, PlatformKind};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn new_state(seed: u64) -> GameState {
        GameState::new(seed, Tuning::default(), 0)
    }

    fn confirm() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_start_to_playing() {
        let mut state = new_state(12345);
        assert_eq!(state.phase, GamePhase::Start);

        // Ticking without confirm stays on the title screen
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.frame, 0);

        tick(&mut state, &confirm());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.run, 1);
    }

    #[test]
    fn test_bounces_off_starting_pad() {
        let mut state = new_state(1);
        tick(&mut state, &confirm());

        // Feet start at 535, pad top at 542.5; falls onto it within a few frames
        let mut bounced = false;
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
            if state.player.vel.y < 0.0 {
                bounced = true;
                break;
            }
        }
        assert!(bounced);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_falling_ends_run_and_records() {
        let mut state = new_state(2);
        tick(&mut state, &confirm());
        // No platforms to catch the player
        state.platforms.platforms.clear();
        state.player.max_height = -500.0;
        state.player.score = 300;

        let mut frames = 0;
        while state.phase == GamePhase::Playing && frames < 1000 {
            state.platforms.platforms.clear();
            tick(&mut state, &TickInput::default());
            frames += 1;
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 300);
        assert!(state.new_record);

        // Frozen until restart
        let frame = state.frame;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.frame, frame);

        tick(&mut state, &confirm());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.frame, 0);
        assert_eq!(state.player.max_height, 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);

        let mut inputs = vec![confirm()];
        for i in 0..600 {
            inputs.push(TickInput {
                left: i % 90 < 30,
                right: i % 90 >= 60,
                ..Default::default()
            });
        }

        for input in &inputs {
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.platforms.platforms, state2.platforms.platforms);
    }

    #[test]
    fn test_snapshot_resume_matches() {
        let mut live = new_state(777);
        tick(&mut live, &confirm());
        let steer = |i: u32| TickInput {
            left: i % 50 < 20,
            right: i % 50 > 35,
            ..Default::default()
        };
        for i in 0..200 {
            tick(&mut live, &steer(i));
        }

        let json = serde_json::to_string(&live).unwrap();
        let mut restored: GameState = serde_json::from_str(&json).unwrap();

        for i in 200..600 {
            tick(&mut live, &steer(i));
            tick(&mut restored, &steer(i));
        }

        assert_eq!(live.phase, restored.phase);
        assert_eq!(live.player, restored.player);
        assert_eq!(live.platforms.platforms, restored.platforms.platforms);
        assert_eq!(live.score, restored.score);
    }

    #[test]
    fn test_autopilot_climbs_a_ladder() {
        fn run_ladder(input: &TickInput) -> GameState {
            let mut state = new_state(4242);
            tick(&mut state, &confirm());

            let tuning = state.tuning.platform;
            state.platforms.platforms.clear();
            state.platforms.push(Platform::normal(
                Vec2::new(200.0, 550.0),
                Vec2::new(80.0, 15.0),
                &tuning,
            ));
            // Rungs alternate sides, none of them over the pad
            for i in 0..40 {
                let x = if i % 2 == 0 { 90.0 } else { 310.0 };
                state.platforms.push(Platform::normal(
                    Vec2::new(x, 470.0 - i as f32 * 80.0),
                    Vec2::new(60.0, 12.0),
                    &tuning,
                ));
            }

            for _ in 0..600 {
                tick(&mut state, input);
            }
            state
        }

        let idle = run_ladder(&TickInput {
            idle_mode: true,
            ..Default::default()
        });
        assert_eq!(idle.phase, GamePhase::Playing);
        assert!(idle.player.max_height < 0.0, "max_height {}", idle.player.max_height);
        assert!(idle.score > 0);

        // Without steering the player just bounces on the pad
        let hands_off = run_ladder(&TickInput::default());
        assert_eq!(hands_off.phase, GamePhase::Playing);
        assert_eq!(hands_off.player.max_height, 0.0);
        assert_eq!(hands_off.score, 0);
    }

    #[test]
    fn test_breaking_platform_crumbles_after_bounce() {
        let mut state = new_state(8);
        tick(&mut state, &confirm());
        state.drain_events();

        state.platforms.platforms.clear();
        state.platforms.push(Platform::breaking(
            Vec2::new(200.0, 550.0),
            Vec2::new(60.0, 12.0),
            &state.tuning.platform,
        ));
        let crumbling = |state: &GameState| {
            state
                .platforms
                .platforms
                .iter()
                .find(|p| p.pos.y == 550.0)
                .map(|p| (p.kind, p.active))
        };
        let elapsed_of = |kind: PlatformKind| match kind {
            PlatformKind::Breaking {
                state: BreakState::Triggered { elapsed },
                ..
            } => Some(elapsed),
            _ => None,
        };

        // Feet start inside the landing band, so the first frame bounces
        tick(&mut state, &TickInput::default());
        assert!(state.drain_events().contains(&GameEvent::Bounced { index: 0 }));
        assert!(state.player.vel.y < 0.0);
        // Triggered by the landing, then counted by the same frame's update
        let (kind, active) = crumbling(&state).unwrap();
        assert_eq!(elapsed_of(kind), Some(1));
        assert!(active);

        for _ in 0..29 {
            tick(&mut state, &TickInput::default());
        }
        let (kind, active) = crumbling(&state).unwrap();
        assert_eq!(elapsed_of(kind), Some(30));
        assert!(active);

        // 31st update breaks it and the same pass culls it
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(crumbling(&state).is_none());
    }
}
