//! Rock-paper-scissors session state machine.
//!
//! Hotseat mode gates submissions by turn and waits for an explicit reveal.
//! Online mode records the local pick and hands back a [`PendingOpponent`]
//! ticket; the event loop schedules the opponent and returns its answer via
//! [`ChoiceGameSession::apply_opponent_choice`]. Each reset bumps the
//! session generation so answers meant for an earlier round are dropped.

use crate::session::Mode;
use crate::view::{ChoiceSnapshot, ViewSink};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use turnplay_rps::{Choice, Outcome, Seat, resolve};

/// Seat controlled by this instance in online mode.
pub const LOCAL_SEAT: Seat = Seat::One;

/// Round status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ChoiceStatus {
    /// Waiting for submissions.
    #[display("Awaiting choices")]
    AwaitingChoices,
    /// Hotseat: both seats submitted, waiting for the reveal action.
    #[display("Ready to reveal")]
    ReadyToReveal,
    /// Online: local pick recorded, waiting for the opponent.
    #[display("Awaiting opponent")]
    AwaitingOpponent,
    /// Round decided.
    #[display("{}", _0)]
    Resolved(Outcome),
}

/// Ticket for an opponent answer, valid only for the generation it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingOpponent {
    generation: u64,
}

impl PendingOpponent {
    /// Generation the ticket belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What a submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Not accepted (wrong seat, wrong phase).
    Ignored,
    /// Recorded; the other seat submits next.
    Recorded,
    /// Recorded; both seats are in and the round can be revealed.
    ReadyToReveal,
    /// Recorded; the opponent must now be scheduled with this ticket.
    AwaitOpponent(PendingOpponent),
}

/// One rock-paper-scissors round.
pub struct ChoiceGameSession {
    mode: Mode,
    choices: [Option<Choice>; 2],
    turn_owner: Seat,
    status: ChoiceStatus,
    generation: u64,
    view: Box<dyn ViewSink<ChoiceSnapshot>>,
}

impl std::fmt::Debug for ChoiceGameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChoiceGameSession")
            .field("mode", &self.mode)
            .field("choices", &self.choices)
            .field("turn_owner", &self.turn_owner)
            .field("status", &self.status)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl ChoiceGameSession {
    /// Creates a session awaiting choices.
    #[instrument(skip(view))]
    pub fn new(mode: Mode, view: Box<dyn ViewSink<ChoiceSnapshot>>) -> Self {
        info!(%mode, "Choice session created");
        let mut session = Self {
            mode,
            choices: [None, None],
            turn_owner: Seat::One,
            status: ChoiceStatus::AwaitingChoices,
            generation: 0,
            view,
        };
        session.notify();
        session
    }

    /// Records `choice` for `seat`.
    ///
    /// Online, a pick made after the round is decided opens the next round;
    /// tickets from the finished round stop applying.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn submit_choice(&mut self, seat: Seat, choice: Choice) -> Submission {
        match self.mode {
            Mode::Local => self.submit_hotseat(seat, choice),
            Mode::Online => self.submit_online(seat, choice),
        }
    }

    fn submit_hotseat(&mut self, seat: Seat, choice: Choice) -> Submission {
        if self.status != ChoiceStatus::AwaitingChoices {
            debug!(status = %self.status, "Ignoring submission outside of choosing phase");
            return Submission::Ignored;
        }
        if seat != self.turn_owner {
            debug!(%seat, turn = %self.turn_owner, "Ignoring submission out of turn");
            return Submission::Ignored;
        }

        self.choices[seat.index()] = Some(choice);
        self.turn_owner = seat.other();
        let submission = if self.choices.iter().all(Option::is_some) {
            self.status = ChoiceStatus::ReadyToReveal;
            Submission::ReadyToReveal
        } else {
            Submission::Recorded
        };
        self.notify();
        submission
    }

    fn submit_online(&mut self, seat: Seat, choice: Choice) -> Submission {
        if seat != LOCAL_SEAT {
            debug!(%seat, "Ignoring submission for the remote seat");
            return Submission::Ignored;
        }
        if let ChoiceStatus::Resolved(_) = self.status {
            self.choices = [None, None];
            self.generation += 1;
            info!(generation = self.generation, "New round started by submission");
        }

        // A repeat submission while waiting replaces the pick; whichever
        // opponent answer lands first decides the round.
        self.choices[seat.index()] = Some(choice);
        self.status = ChoiceStatus::AwaitingOpponent;
        self.notify();
        Submission::AwaitOpponent(PendingOpponent {
            generation: self.generation,
        })
    }

    /// Hotseat: resolves a round once both seats have submitted.
    #[instrument(skip(self))]
    pub fn reveal(&mut self) -> Option<Outcome> {
        if self.status != ChoiceStatus::ReadyToReveal {
            debug!(status = %self.status, "Nothing to reveal");
            return None;
        }
        let [Some(first), Some(second)] = self.choices else {
            return None;
        };
        Some(self.finish(first, second))
    }

    /// Online: applies the opponent's answer for `ticket`.
    ///
    /// Answers from an earlier generation, or arriving after the round
    /// is decided, are dropped.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn apply_opponent_choice(
        &mut self,
        ticket: PendingOpponent,
        choice: Choice,
    ) -> Option<Outcome> {
        if ticket.generation != self.generation {
            debug!(ticket = ticket.generation, "Dropping stale opponent answer");
            return None;
        }
        if self.status != ChoiceStatus::AwaitingOpponent {
            debug!(status = %self.status, "Dropping opponent answer, not waiting");
            return None;
        }
        let Some(local) = self.choices[LOCAL_SEAT.index()] else {
            return None;
        };
        self.choices[LOCAL_SEAT.other().index()] = Some(choice);
        Some(self.finish(local, choice))
    }

    /// Clears both picks and invalidates outstanding opponent tickets.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.choices = [None, None];
        self.turn_owner = Seat::One;
        self.status = ChoiceStatus::AwaitingChoices;
        self.generation += 1;
        info!(generation = self.generation, "Choice session reset");
        self.notify();
    }

    /// Read-only copy of the state for rendering.
    pub fn snapshot(&self) -> ChoiceSnapshot {
        let revealed = match (self.status, self.choices) {
            (ChoiceStatus::Resolved(_), [Some(first), Some(second)]) => Some([first, second]),
            _ => None,
        };
        ChoiceSnapshot {
            mode: self.mode,
            status: self.status,
            turn_owner: self.turn_owner,
            submitted: [self.choices[0].is_some(), self.choices[1].is_some()],
            revealed,
        }
    }

    /// Hotseat or simulated online.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Round status.
    pub fn status(&self) -> ChoiceStatus {
        self.status
    }

    /// Seat expected to submit next.
    pub fn turn_owner(&self) -> Seat {
        self.turn_owner
    }

    /// Choice recorded for `seat`.
    pub fn submitted_choice(&self, seat: Seat) -> Option<Choice> {
        self.choices[seat.index()]
    }

    /// Incremented on every reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn finish(&mut self, first: Choice, second: Choice) -> Outcome {
        let outcome = resolve(first, second);
        self.status = ChoiceStatus::Resolved(outcome);
        info!(%first, %second, %outcome, "Round resolved");
        self.notify();
        outcome
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        self.view.render(&snapshot);
    }
}
