//! Frame driving: scheduled ticks, cancellation and intent sampling
//!
//! The host calls [`Driver::on_frame`] whenever a display refresh fires a
//! previously requested [`FrameTicket`]. Only the most recently requested
//! ticket is live; starting a session or tearing down revokes it, so an old
//! loop can never step a new session.

use crate::game::Game;
use crate::sim::{GamePhase, Intent, Scheduler, SimState, StepOutcome};

/// Handle for one requested frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket(u64);

/// Explicit stand-in for an animation-frame handle
#[derive(Debug, Default)]
pub struct FrameLoop {
    next_id: u64,
    pending: Option<FrameTicket>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame; any earlier pending ticket is revoked
    pub fn request(&mut self) -> FrameTicket {
        self.next_id += 1;
        let ticket = FrameTicket(self.next_id);
        self.pending = Some(ticket);
        ticket
    }

    /// Revoke the pending ticket, if any
    pub fn cancel(&mut self) -> Option<FrameTicket> {
        self.pending.take()
    }

    /// Consume `ticket` if it is the live one
    pub fn fire(&mut self, ticket: FrameTicket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn pending(&self) -> Option<FrameTicket> {
        self.pending
    }
}

/// Direction of a normalized key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Supplies the latest intent once per step
pub trait IntentSource {
    fn sample(&mut self, state: &SimState) -> Intent;
}

/// Intent built from press/release events, sampled as-is each frame
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldKeys {
    intent: Intent,
}

impl HeldKeys {
    pub fn press(&mut self, dir: Direction) {
        self.set(dir, true);
    }

    pub fn release(&mut self, dir: Direction) {
        self.set(dir, false);
    }

    /// Drop every held key (e.g. on focus loss)
    pub fn clear(&mut self) {
        self.intent = Intent::IDLE;
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Left => self.intent.left = held,
            Direction::Right => self.intent.right = held,
            Direction::Up => self.intent.up = held,
            Direction::Down => self.intent.down = held,
        }
    }
}

impl IntentSource for HeldKeys {
    fn sample(&mut self, _state: &SimState) -> Intent {
        self.intent
    }
}

/// What happened when a frame fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameResult {
    /// Stepped; the next frame has been requested
    Continued(FrameTicket),
    /// The session ended on this frame; no further frame is requested
    GameOver { final_score: u64 },
    /// Ticket was revoked or already used; nothing stepped
    Stale,
}

/// Couples a [`Game`], an [`IntentSource`] and a [`FrameLoop`]
#[derive(Debug)]
pub struct Driver<S, I> {
    game: Game<S>,
    input: I,
    frames: FrameLoop,
}

impl<S: Scheduler, I: IntentSource> Driver<S, I> {
    pub fn new(game: Game<S>, input: I) -> Self {
        Self {
            game,
            input,
            frames: FrameLoop::new(),
        }
    }

    /// Reset the game and schedule its first frame. A ticket still pending
    /// from a previous session is revoked first.
    pub fn start_session(&mut self) -> FrameTicket {
        if let Some(stale) = self.frames.cancel() {
            log::debug!("Revoked pending frame {:?} before new session", stale);
        }
        if self.game.phase() == GamePhase::Running {
            self.game.abandon();
        }
        self.game.start();
        self.frames.request()
    }

    /// Handle a fired frame callback
    pub fn on_frame(&mut self, ticket: FrameTicket) -> FrameResult {
        if !self.frames.fire(ticket) {
            log::debug!("Ignoring stale frame {:?}", ticket);
            return FrameResult::Stale;
        }
        let intent = match self.game.state() {
            Some(state) => self.input.sample(state),
            None => return FrameResult::Stale,
        };
        match self.game.step(intent) {
            StepOutcome::Continue => FrameResult::Continued(self.frames.request()),
            StepOutcome::Collided { final_score } => FrameResult::GameOver { final_score },
            StepOutcome::Ignored => FrameResult::Stale,
        }
    }

    /// Stop the loop; no further frames will step
    pub fn teardown(&mut self) {
        if self.frames.cancel().is_some() {
            log::debug!("Frame loop cancelled");
        }
    }

    /// Drive frames back to back until the session ends, the loop is
    /// cancelled, or `max_frames` have stepped. Returns the final score if
    /// the session ended.
    pub fn run(&mut self, max_frames: u64) -> Option<u64> {
        let mut stepped = 0;
        while let Some(ticket) = self.frames.pending() {
            if stepped >= max_frames {
                log::info!("Frame limit {} reached, stopping", max_frames);
                self.teardown();
                return None;
            }
            stepped += 1;
            if let FrameResult::GameOver { final_score } = self.on_frame(ticket) {
                return Some(final_score);
            }
        }
        None
    }

    pub fn game(&self) -> &Game<S> {
        &self.game
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn pending_frame(&self) -> Option<FrameTicket> {
        self.frames.pending()
    }
}
