//! Configuration for constructing a [`Simulator`](crate::Simulator).

use crate::replacer::Policy;

/// The number of frames simulated when none is given.
pub const DEFAULT_NUM_FRAMES: usize = 64;

/// The parameters of a simulation run, fixed for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// The number of physical frames. Must be at least 1.
    pub num_frames: usize,

    /// The replacement policy used once every frame is occupied.
    pub policy: Policy,

    /// The seed of the random replacement policy.
    ///
    /// If this is `None`, a seed is drawn from the operating system's entropy source when the
    /// simulator is built, and logged so the run can be reproduced.
    pub seed: Option<u64>,
}

impl SimConfig {
    /// Creates a new `SimConfig` with no fixed seed.
    pub fn new(num_frames: usize, policy: Policy) -> Self {
        Self {
            num_frames,
            policy,
            seed: None,
        }
    }

    /// Fixes the seed of the random replacement policy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_FRAMES, Policy::default())
    }
}
