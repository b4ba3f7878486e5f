//! Injectable randomness for first-turn, side assignment and synthetic opponents.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Source of the random decisions a session makes.
///
/// Sessions never call an ambient RNG; they ask this trait, so tests can pin
/// every coin flip.
pub trait Randomness: Send {
    /// Fair coin.
    fn coin_flip(&mut self) -> bool;

    /// Uniform index in `0..upper`. `upper` is never zero.
    fn pick(&mut self, upper: usize) -> usize;
}

/// Randomness backed by a seedable [`StdRng`].
#[derive(Debug, Clone)]
pub struct RngRandomness {
    rng: StdRng,
}

impl RngRandomness {
    /// Seeds from the operating system.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        debug!(seed, "Seeding randomness");
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uses `seed` when present, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Randomness for RngRandomness {
    fn coin_flip(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    fn pick(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}

/// Replays a fixed script of decisions, cycling when exhausted.
///
/// Coin flips and picks draw from separate scripts. An empty script yields
/// `false` / `0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandomness {
    flips: VecDeque<bool>,
    picks: VecDeque<usize>,
}

impl ScriptedRandomness {
    /// Creates a script from coin flips.
    pub fn flips(flips: impl IntoIterator<Item = bool>) -> Self {
        Self {
            flips: flips.into_iter().collect(),
            picks: VecDeque::new(),
        }
    }

    /// Adds a pick script.
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks = picks.into_iter().collect();
        self
    }
}

impl Randomness for ScriptedRandomness {
    fn coin_flip(&mut self) -> bool {
        match self.flips.pop_front() {
            Some(flip) => {
                self.flips.push_back(flip);
                flip
            }
            None => false,
        }
    }

    fn pick(&mut self, upper: usize) -> usize {
        match self.picks.pop_front() {
            Some(pick) => {
                self.picks.push_back(pick);
                pick % upper
            }
            None => 0,
        }
    }
}
