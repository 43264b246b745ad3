//! Host-side session driver
//!
//! Glues the pure simulation to its surroundings: reads the high score once
//! at startup, turns key events into per-frame snapshots, runs one tick per
//! display frame and writes the high score whenever a record is set.
//! The HUD toggle key is handled here since it only touches settings.

use crate::highscores::HighScore;
use crate::platform::{KeyState, KeyValueStore};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// A running game bound to a storage backend
pub struct Session<S: KeyValueStore> {
    pub state: GameState,
    pub keys: KeyState,
    pub settings: Settings,
    /// Persisted best score; the simulation works on a copy
    pub high_score: HighScore,
    hud_held: bool,
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S, tuning: Tuning, seed: u64) -> Self {
        let high_score = HighScore::load(&store);
        let settings = Settings::load(&store);
        log::info!("Session created with seed {}", seed);
        Self {
            state: GameState::new(seed, tuning, high_score.best),
            keys: KeyState::new(),
            settings,
            high_score,
            hud_held: false,
            store,
        }
    }

    /// Returns true if the key is bound to something
    pub fn key_down(&mut self, key: &str) -> bool {
        if self.settings.keys.is_hud(key) {
            if !self.hud_held {
                self.toggle_hud();
            }
            self.hud_held = true;
            return true;
        }
        self.keys.key_down(key, &self.settings.keys)
    }

    pub fn key_up(&mut self, key: &str) {
        if self.settings.keys.is_hud(key) {
            self.hud_held = false;
            return;
        }
        self.keys.key_up(key, &self.settings.keys)
    }

    /// Run one display frame with the current key state
    pub fn frame(&mut self) -> Vec<GameEvent> {
        let input = self.keys.take_input();
        self.frame_with(&input)
    }

    /// Run one display frame with an explicit input snapshot
    pub fn frame_with(&mut self, input: &TickInput) -> Vec<GameEvent> {
        tick(&mut self.state, input);
        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::NewHighScore { score } = *event {
                if self.high_score.submit(score) {
                    self.high_score.save(&mut self.store);
                }
            }
        }
        events
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Flip the score overlay and remember the choice
    pub fn toggle_hud(&mut self) {
        self.settings.show_hud = !self.settings.show_hud;
        log::info!("HUD {}", if self.settings.show_hud { "on" } else { "off" });
        self.settings.save(&mut self.store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;
    use crate::sim::GamePhase;

    fn lose_run(session: &mut Session<MemoryStore>, score: u64) {
        session.key_down(" ");
        session.frame();
        session.key_up(" ");
        assert_eq!(session.state.phase, GamePhase::Playing);

        session.state.player.max_height = -1000.0;
        session.state.player.score = score;
        let mut frames = 0;
        while session.state.phase == GamePhase::Playing && frames < 2000 {
            session.state.platforms.platforms.clear();
            session.frame();
            frames += 1;
        }
        assert_eq!(session.state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_high_score_persists_across_sessions() {
        let mut session = Session::new(MemoryStore::new(), Tuning::default(), 1);
        assert_eq!(session.high_score.best, 0);

        lose_run(&mut session, 500);
        assert_eq!(
            session
                .store()
                .get(HighScore::STORAGE_KEY)
                .unwrap()
                .as_deref(),
            Some("500")
        );

        // A worse run leaves the stored record alone
        lose_run(&mut session, 200);
        assert_eq!(session.high_score.best, 500);
        assert_eq!(session.state.high_score, 500);

        let store = session.store().clone();
        let next = Session::new(store, Tuning::default(), 2);
        assert_eq!(next.high_score.best, 500);
        assert_eq!(next.state.high_score, 500);
    }

    #[test]
    fn test_held_space_does_not_restart_twice() {
        let mut session = Session::new(MemoryStore::new(), Tuning::default(), 3);
        session.key_down(" ");
        session.frame();
        assert_eq!(session.state.run, 1);

        // Still held across frames
        session.key_down(" ");
        session.frame();
        session.frame();
        assert_eq!(session.state.run, 1);
        assert_eq!(session.state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_hud_toggle_persists() {
        let mut session = Session::new(MemoryStore::new(), Tuning::default(), 4);
        assert!(session.settings.show_hud);

        assert!(session.key_down("h"));
        assert!(!session.settings.show_hud);
        // Auto-repeat while held does not flip it back
        session.key_down("h");
        assert!(!session.settings.show_hud);
        session.key_up("h");

        let store = session.store().clone();
        let next = Session::new(store, Tuning::default(), 5);
        assert!(!next.settings.show_hud);

        session.key_down("H");
        assert!(session.settings.show_hud);
    }
}
