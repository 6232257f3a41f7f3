//! This module contains the definition and implementation of the [`Simulator`], which resolves
//! memory access events against the frame table one at a time.
//!
//! Every event ends up in one of three states:
//! - The page is already resident, and the access is simply recorded.
//! - The page faults while a free frame remains, and the page is loaded into that frame.
//! - The page faults with every frame occupied, and the replacement policy picks a victim to evict.
//!
//! Faults always cost one disk read. Evicting a dirty victim additionally costs one disk write,
//! while a clean victim is discarded for free.

use crate::config::SimConfig;
use crate::error::{Error, Result};
use crate::memory::{FrameId, FrameTable, VictimRecord};
use crate::page::{AccessKind, PageNumber};
use crate::replacer::Replacer;
use crate::stats::Stats;
use crate::trace::TraceEntry;
use derivative::Derivative;
use tracing::{debug, info};

/// What happened while processing a single access event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOutcome {
    /// The page that was accessed.
    pub page: PageNumber,

    /// The frame the page was resident in once the access completed.
    pub frame: FrameId,

    /// Whether the page had to be read in from disk.
    pub faulted: bool,

    /// The page evicted to make room, if the fault could not be served by a free frame.
    pub evicted: Option<VictimRecord>,
}

impl EventOutcome {
    /// Returns `true` if the page was already resident.
    pub fn is_hit(&self) -> bool {
        !self.faulted
    }
}

/// A single, exclusively owned demand paging simulation.
///
/// The simulator owns the [`FrameTable`], the [`Replacer`] that manages it, and all of the run's
/// counters. Events must be fed to it in trace order.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Simulator {
    /// The simulated physical memory.
    frames: FrameTable,

    /// The replacement policy, consulted once every frame has been allocated.
    #[derivative(Debug = "ignore")]
    replacer: Box<dyn Replacer>,

    /// The number of frames handed out from the free pool so far.
    ///
    /// Frames are never freed, so once this reaches the number of frames every later fault evicts.
    allocated: usize,

    /// The counters of the run so far.
    stats: Stats,
}

impl Simulator {
    /// Constructs a new simulator as described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the frame table could not be created.
    pub fn new(config: SimConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);

        let frames = FrameTable::new(config.num_frames)?;
        let replacer = config.policy.build(config.num_frames, seed);

        info!(
            "Simulating {} frames with the {} policy (seed {})",
            config.num_frames, config.policy, seed
        );

        Ok(Self::from_parts(frames, replacer))
    }

    /// Constructs a new simulator over `num_frames` frames that evicts with the given `replacer`.
    ///
    /// This is how a replacer with a custom random source, or a policy from outside this crate, is
    /// injected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the frame table could not be created.
    pub fn with_replacer(num_frames: usize, replacer: Box<dyn Replacer>) -> Result<Self> {
        let frames = FrameTable::new(num_frames)?;

        Ok(Self::from_parts(frames, replacer))
    }

    /// Assembles a simulator with all counters at zero.
    fn from_parts(frames: FrameTable, replacer: Box<dyn Replacer>) -> Self {
        let stats = Stats {
            num_frames: frames.num_frames(),
            ..Default::default()
        };

        Self {
            frames,
            replacer,
            allocated: 0,
            stats,
        }
    }

    /// Gets the number of frames being simulated.
    pub fn num_frames(&self) -> usize {
        self.frames.num_frames()
    }

    /// Gets a read-only view of the frame table.
    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    /// Processes a single access of kind `access` to `page`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InternalConsistency`] if the page could not be found in any frame after its
    /// fault was handled. This means the frame table or the replacer has a bug, and the run must not
    /// continue.
    pub fn process(&mut self, page: PageNumber, access: AccessKind) -> Result<EventOutcome> {
        let (frame, faulted, evicted) = match self.frames.lookup(page) {
            Some(frame_id) => (Some(frame_id), false, None),
            None => {
                self.stats.faults += 1;
                self.stats.disk_reads += 1;
                debug!("Page fault {:>8}", page.as_u64());

                if self.allocated < self.frames.num_frames() {
                    let frame = self.frames.allocate_free(page);
                    if let Some(frame_id) = frame {
                        self.allocated += 1;
                        self.replacer.record_admission(frame_id);
                    }

                    (frame, true, None)
                } else {
                    let victim = self.replacer.select_victim(&mut self.frames, page)?;
                    self.replacer.record_admission(victim.frame);

                    if victim.was_modified {
                        self.stats.disk_writes += 1;
                        debug!("Disk write {:>8}", victim.evicted_page.as_u64());
                    } else {
                        self.stats.discards += 1;
                        debug!("Discard    {:>8}", victim.evicted_page.as_u64());
                    }

                    (self.frames.lookup(page), true, Some(victim))
                }
            }
        };

        let frame = frame.ok_or_else(|| Error::unresolved(page))?;
        self.frames.touch(frame, access)?;

        match access {
            AccessKind::Read => debug!("reading    {:>8}", page.as_u64()),
            AccessKind::Write => debug!("writing    {:>8}", page.as_u64()),
        }

        self.stats.events += 1;

        Ok(EventOutcome {
            page,
            frame,
            faulted,
            evicted,
        })
    }

    /// Processes a single parsed trace entry.
    ///
    /// # Errors
    ///
    /// See [`Simulator::process`].
    pub fn process_entry(&mut self, entry: TraceEntry) -> Result<EventOutcome> {
        self.process(entry.page(), entry.access)
    }

    /// Processes every entry of a trace in order, returning the final statistics.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error, whether it came from the trace itself or from
    /// processing an event. The counters accumulated up to that point are still available through
    /// [`Simulator::snapshot`], but only as diagnostics.
    pub fn run<I>(&mut self, entries: I) -> Result<Stats>
    where
        I: IntoIterator<Item = Result<TraceEntry>>,
    {
        for entry in entries {
            self.process_entry(entry?)?;
        }

        let stats = self.snapshot();
        info!(
            "Processed {} events: {} disk reads, {} disk writes, {} discards",
            stats.events, stats.disk_reads, stats.disk_writes, stats.discards
        );

        Ok(stats)
    }

    /// Returns the counters accumulated so far.
    pub fn snapshot(&self) -> Stats {
        self.stats
    }

    /// Puts the simulator back into the state it was constructed in.
    ///
    /// Every frame is emptied, the clock and counters are zeroed, and the replacer's cursors and
    /// random source are restored.
    pub fn reset(&mut self) {
        self.frames.reset();
        self.replacer.reset();
        self.allocated = 0;
        self.stats = Stats {
            num_frames: self.frames.num_frames(),
            ..Default::default()
        };
    }
}
