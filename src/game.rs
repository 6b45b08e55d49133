//! Game phase state machine
//!
//! ```text
//! NotStarted --start--> Running --collision--> Ended --start--> Running ...
//! ```
//!
//! A start command always builds a brand new [`SimState`]; nothing carries
//! over from an ended session except what the scheduler keeps (its RNG).

use crate::sim::{
    DifficultyScheduler, GamePhase, Intent, PcgSource, Scheduler, SimState, Snapshot, StepOutcome,
    step,
};
use crate::tuning::Tuning;

/// Owns the single live session and the scheduler feeding it
#[derive(Debug, Clone)]
pub struct Game<S = DifficultyScheduler<PcgSource>> {
    tuning: Tuning,
    scheduler: S,
    state: Option<SimState>,
}

impl Game {
    /// Standard game with a seeded PCG scheduler
    pub fn seeded(tuning: Tuning, seed: u64) -> Self {
        log::info!("New game with seed: {}", seed);
        let scheduler = DifficultyScheduler::new(tuning.clone(), PcgSource::new(seed));
        Self::new(tuning, scheduler)
    }
}

impl<S: Scheduler> Game<S> {
    pub fn new(tuning: Tuning, scheduler: S) -> Self {
        Self {
            tuning,
            scheduler,
            state: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.as_ref().map_or(GamePhase::NotStarted, |s| s.phase)
    }

    /// Start a fresh session. Accepted from NotStarted and Ended only;
    /// returns false (and changes nothing) while a session is running.
    pub fn start(&mut self) -> bool {
        if self.phase() == GamePhase::Running {
            log::warn!("Start ignored: a session is already running");
            return false;
        }
        self.state = Some(SimState::new(&self.tuning));
        log::info!("Session started");
        true
    }

    /// Drop the current session without scoring it (component teardown)
    pub fn abandon(&mut self) {
        if let Some(state) = self.state.take() {
            log::info!("Session abandoned at frame {}", state.frame_count);
        }
    }

    /// Advance the running session by one frame; ignored in any other phase
    pub fn step(&mut self, intent: Intent) -> StepOutcome {
        let Some(state) = self.state.as_mut() else {
            return StepOutcome::Ignored;
        };
        let outcome = step(state, intent, &mut self.scheduler, &self.tuning);
        if let StepOutcome::Collided { final_score } = outcome {
            log::info!(
                "Game over: score {} after {} frames ({} meteors on screen)",
                final_score,
                state.frame_count,
                state.obstacles.len()
            );
        }
        outcome
    }

    /// Read-only access to the live (or frozen) session
    pub fn state(&self) -> Option<&SimState> {
        self.state.as_ref()
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.state.as_ref().map(SimState::snapshot)
    }

    /// Score captured at the collision, once Ended
    pub fn final_score(&self) -> Option<u64> {
        self.state
            .as_ref()
            .filter(|s| s.phase == GamePhase::Ended)
            .map(SimState::display_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, ScriptedSource};
    use glam::Vec2;

    fn game() -> Game<DifficultyScheduler<ScriptedSource>> {
        let tuning = Tuning::default();
        // Meteors spawn at the far left, well away from the craft
        let scheduler = DifficultyScheduler::new(tuning.clone(), ScriptedSource::new([0.0]));
        Game::new(tuning, scheduler)
    }

    fn crash(game: &mut Game<DifficultyScheduler<ScriptedSource>>) -> StepOutcome {
        let center = game.state().unwrap().player.center();
        game.state.as_mut().unwrap().obstacles.push(Obstacle {
            pos: center,
            radius: 20.0,
            speed: 0.0,
        });
        game.step(Intent::IDLE)
    }

    #[test]
    fn test_not_started_ignores_steps() {
        let mut g = game();
        assert_eq!(g.phase(), GamePhase::NotStarted);
        assert_eq!(g.step(Intent { left: true, ..Default::default() }), StepOutcome::Ignored);
        assert!(g.state().is_none());
        assert!(g.snapshot().is_none());
        assert_eq!(g.final_score(), None);
    }

    #[test]
    fn test_start_run_end_restart() {
        let mut g = game();
        assert!(g.start());
        assert_eq!(g.phase(), GamePhase::Running);
        assert!(!g.start(), "start while running is rejected");

        for _ in 0..30 {
            assert_eq!(g.step(Intent::IDLE), StepOutcome::Continue);
        }
        assert_eq!(crash(&mut g), StepOutcome::Collided { final_score: 3 });
        assert_eq!(g.phase(), GamePhase::Ended);
        assert_eq!(g.final_score(), Some(3));

        // Ended is frozen
        let frozen = g.state().cloned();
        assert_eq!(g.step(Intent { up: true, ..Default::default() }), StepOutcome::Ignored);
        assert_eq!(g.state().cloned(), frozen);

        // Restart is a full reset, not a resume
        assert!(g.start());
        let state = g.state().unwrap();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.frame_count, 0);
        assert_eq!(state.score, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(380.0, 520.0));
    }

    #[test]
    fn test_abandon_returns_to_not_started() {
        let mut g = game();
        g.start();
        g.step(Intent::IDLE);
        g.abandon();
        assert_eq!(g.phase(), GamePhase::NotStarted);
        assert_eq!(g.step(Intent::IDLE), StepOutcome::Ignored);
        assert!(g.start());
    }

    #[test]
    fn test_seeded_games_match() {
        let mut a = Game::seeded(Tuning::default(), 7);
        let mut b = Game::seeded(Tuning::default(), 7);
        a.start();
        b.start();
        let intent = Intent { left: true, ..Default::default() };
        for _ in 0..300 {
            let oa = a.step(intent);
            let ob = b.step(intent);
            assert_eq!(oa, ob);
        }
        assert_eq!(a.state(), b.state());
    }
}
