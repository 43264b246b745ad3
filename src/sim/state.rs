//! Game state and session bookkeeping
//!
//! All state that must be persisted for snapshots/determinism lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::manager::PlatformManager;
use super::platform::Platform;
use super::player::Player;
use crate::consts::{START_PAD_HEIGHT, START_PAD_OFFSET, START_PAD_WIDTH};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start action
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for the restart action
    GameOver,
}

/// Things that happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh run began
    Started { run: u32 },
    /// Player bounced off the platform at this index
    Bounced { index: usize },
    LevelUp { level: u32 },
    GameOver { score: u64, level: u32 },
    /// Best score beaten; the host should persist it
    NewHighScore { score: u64 },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Base seed for reproducibility
    pub seed: u64,
    /// Runs started this session; mixes into each run's generator seed
    pub run: u32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Frames simulated in the current run
    pub frame: u64,
    pub player: Player,
    pub platforms: PlatformManager,
    /// Mirror of the player's score
    pub score: u64,
    /// Mirror of the manager's level
    pub level: u32,
    /// Best score seen this session, seeded by the host
    pub high_score: u64,
    /// Whether the last run set a new record
    pub new_record: bool,
    /// Vertical view offset for the display layer
    pub camera_y: f32,
    /// Events from the latest ticks (not persisted)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session on the title screen
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let (player, platforms) = fresh_world(&tuning, run_seed(seed, 0));
        let mut state = Self {
            seed,
            run: 0,
            tuning,
            phase: GamePhase::Start,
            frame: 0,
            player,
            platforms,
            score: 0,
            level: 1,
            high_score,
            new_record: false,
            camera_y: 0.0,
            events: Vec::new(),
        };
        state.update_camera();
        state
    }

    /// Rebuild the player and platforms for a fresh run
    pub fn reset(&mut self) {
        (self.player, self.platforms) = fresh_world(&self.tuning, run_seed(self.seed, self.run));
        self.frame = 0;
        self.score = 0;
        self.level = 1;
        self.new_record = false;
        self.update_camera();
    }

    /// Enter Playing with a fresh world
    pub fn start_game(&mut self) {
        self.run += 1;
        self.reset();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started { run: self.run });
        log::info!("Run {} started (best {})", self.run, self.high_score);
    }

    /// Enter GameOver, committing the high score if beaten
    pub fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            score: self.score,
            level: self.level,
        });
        log::info!("Game over: score {} at level {}", self.score, self.level);

        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_record = true;
            self.events.push(GameEvent::NewHighScore { score: self.score });
            log::info!("New high score: {}", self.score);
        }
    }

    /// Keep the player roughly in the upper third of the view
    pub fn update_camera(&mut self) {
        self.camera_y = self.player.pos.y - self.tuning.arena.height / 3.0;
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Spawned player plus generated platforms and the starting pad under them
fn fresh_world(tuning: &Tuning, seed: u64) -> (Player, PlatformManager) {
    let arena = tuning.arena;
    let player = Player::spawn(&arena, tuning.player);
    let mut platforms = PlatformManager::new(tuning, seed);
    platforms.push(Platform::normal(
        Vec2::new(arena.width / 2.0, arena.height - START_PAD_OFFSET),
        Vec2::new(START_PAD_WIDTH, START_PAD_HEIGHT),
        &tuning.platform,
    ));
    (player, platforms)
}

/// Generator seed for a given run
///
/// Runs get distinct layouts while the whole session stays reproducible.
pub fn run_seed(seed: u64, run: u32) -> u64 {
    seed.wrapping_add((run as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
