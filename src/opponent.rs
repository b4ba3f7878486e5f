//! Synthetic opponent for the simulated online choice game.
//!
//! The opponent is a strategy behind a trait; the scheduler runs it as a
//! delayed, cancellable task and posts the answer back to the event loop.
//! The task never touches the session itself.

use crate::choice_session::PendingOpponent;
use crate::randomness::Randomness;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};
use turnplay_rps::Choice;

/// Picks the opponent's hand.
pub trait OpponentStrategy: Send {
    /// Chooses the next hand.
    fn choose(&mut self) -> Choice;

    /// Display name.
    fn name(&self) -> &str;
}

/// Uniform choice among the three hands.
#[derive(Debug)]
pub struct RandomOpponent<R> {
    rng: R,
}

impl<R: Randomness> RandomOpponent<R> {
    /// Creates a random opponent over `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Randomness> OpponentStrategy for RandomOpponent<R> {
    fn choose(&mut self) -> Choice {
        let all = Choice::all();
        all[self.rng.pick(all.len())]
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Opponent answer delivered to the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentReply {
    /// Ticket the answer belongs to.
    pub ticket: PendingOpponent,
    /// The opponent's hand.
    pub choice: Choice,
}

/// Runs the strategy after a delay on the tokio runtime.
pub struct OpponentScheduler {
    strategy: Box<dyn OpponentStrategy>,
    delay: Duration,
    replies: mpsc::UnboundedSender<OpponentReply>,
    in_flight: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for OpponentScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpponentScheduler")
            .field("strategy", &self.strategy.name())
            .field("delay", &self.delay)
            .field("in_flight", &self.in_flight.len())
            .finish()
    }
}

impl OpponentScheduler {
    /// Creates a scheduler and the receiver its replies arrive on.
    pub fn new(
        strategy: Box<dyn OpponentStrategy>,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<OpponentReply>) {
        let (replies, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            strategy,
            delay,
            replies,
            in_flight: Vec::new(),
        };
        (scheduler, rx)
    }

    /// Schedules an answer for `ticket`. Must be called inside a tokio runtime.
    #[instrument(skip(self), fields(strategy = self.strategy.name()))]
    pub fn schedule(&mut self, ticket: PendingOpponent) {
        self.in_flight.retain(|handle| !handle.is_finished());

        let choice = self.strategy.choose();
        let delay = self.delay;
        let replies = self.replies.clone();
        debug!(generation = ticket.generation(), ?delay, "Opponent answer scheduled");

        self.in_flight.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if replies.send(OpponentReply { ticket, choice }).is_err() {
                debug!("Event loop gone, opponent answer discarded");
            }
        }));
    }

    /// Aborts every answer still waiting out its delay.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) {
        let pending = self.in_flight.len();
        for handle in self.in_flight.drain(..) {
            handle.abort();
        }
        debug!(pending, "Opponent answers cancelled");
    }

    /// Answers scheduled and not yet delivered or cancelled.
    pub fn pending(&self) -> usize {
        self.in_flight.iter().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for OpponentScheduler {
    fn drop(&mut self) {
        for handle in &self.in_flight {
            handle.abort();
        }
    }
}
