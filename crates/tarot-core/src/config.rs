//! Configuration for drawing cards.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Configuration for a draw session.
#[derive(Debug, Clone)]
pub struct DrawConfig {
    /// RNG seed for reproducible draws. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Whether an exhausted [`Deck`](crate::Deck) reshuffles itself on the next draw.
    pub auto_reshuffle: bool,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            seed: None,
            auto_reshuffle: true,
        }
    }
}

impl DrawConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set whether an exhausted deck reshuffles automatically.
    pub fn with_auto_reshuffle(mut self, auto_reshuffle: bool) -> Self {
        self.auto_reshuffle = auto_reshuffle;
        self
    }

    /// Build the random number generator described by this configuration.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
