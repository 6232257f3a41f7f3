//! The page replacement policies, and the [`Replacer`] interface the
//! [`Simulator`](crate::Simulator) drives them through.
//!
//! A replacer is only ever asked for a victim once every frame is occupied. Until then, faults are
//! resolved by allocating free frames, and the replacer is merely told about each admission.

use crate::error::{Error, Result};
use crate::memory::{FrameId, FrameTable, VictimRecord};
use crate::page::PageNumber;
use rand::rngs::StdRng;
use std::fmt::Display;
use std::str::FromStr;

pub mod clock;
pub mod fifo;
pub mod lru;
pub mod random;

pub use clock::Clock;
pub use fifo::Fifo;
pub use lru::Lru;
pub use random::RandomReplacer;

/// A page replacement strategy.
pub trait Replacer {
    /// Picks the frame whose page should be evicted next.
    ///
    /// Policies that keep per-frame state in the [`FrameTable`] (such as the referenced bits of the
    /// clock policy) may update it while searching.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InternalConsistency`] if no frame can be chosen, which means the replacer
    /// was asked for a victim while its bookkeeping disagrees with the table.
    fn choose_victim(&mut self, frames: &mut FrameTable) -> Result<FrameId>;

    /// Tells the replacer that a page was just loaded into `frame_id`, either into a free frame or
    /// over a victim.
    fn record_admission(&mut self, _frame_id: FrameId) {}

    /// Puts the replacer back into the state it was constructed in.
    fn reset(&mut self);

    /// Evicts a victim and installs `incoming` in its place, returning what was evicted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InternalConsistency`] if the victim could not be chosen or replaced.
    fn select_victim(
        &mut self,
        frames: &mut FrameTable,
        incoming: PageNumber,
    ) -> Result<VictimRecord> {
        let frame_id = self.choose_victim(frames)?;
        frames.replace(frame_id, incoming)
    }
}

/// The replacement policies that can be selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    /// Evict a uniformly random frame.
    Random,
    /// Evict the least recently used frame.
    #[default]
    Lru,
    /// Evict with the second-chance clock sweep.
    Clock,
    /// Evict the frame that was loaded the longest time ago.
    Fifo,
}

impl Policy {
    /// All of the policies, in the order they are listed on the command line.
    pub const ALL: [Policy; 4] = [Policy::Random, Policy::Fifo, Policy::Lru, Policy::Clock];

    /// Constructs the [`Replacer`] implementing this policy for a table of `num_frames` frames.
    ///
    /// Only the random policy makes use of `seed`.
    pub fn build(self, num_frames: usize, seed: u64) -> Box<dyn Replacer> {
        match self {
            Self::Random => Box::new(RandomReplacer::<StdRng>::new(num_frames, seed)),
            Self::Lru => Box::new(Lru::new()),
            Self::Clock => Box::new(Clock::new()),
            Self::Fifo => Box::new(Fifo::new(num_frames)),
        }
    }

    /// The name of the policy as it is spelled on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Random => "rand",
            Self::Lru => "lru",
            Self::Clock => "clock",
            Self::Fifo => "fifo",
        }
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.name() == s)
            .ok_or_else(|| {
                Error::Config(format!(
                    "replacement algorithm must be rand/fifo/lru/clock, got `{s}`"
                ))
            })
    }
}
