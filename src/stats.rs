//! Aggregate statistics of a simulation run.

use std::fmt::Display;

/// A snapshot of the counters a [`Simulator`](crate::Simulator) keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// The number of physical frames being simulated.
    pub num_frames: usize,

    /// The number of access events processed.
    pub events: u64,

    /// The number of events whose page was not resident.
    pub faults: u64,

    /// The number of pages read in from disk. Exactly one per fault.
    pub disk_reads: u64,

    /// The number of dirty victims written back to disk.
    pub disk_writes: u64,

    /// The number of clean victims dropped without a write.
    pub discards: u64,
}

impl Stats {
    /// Returns the fraction of events that read a page in from disk.
    ///
    /// A run with no events has a fault rate of `0.0`.
    pub fn fault_rate(&self) -> f64 {
        if self.events == 0 {
            return 0.0;
        }

        self.disk_reads as f64 / self.events as f64
    }

    /// Returns the number of evictions, dirty or clean.
    pub fn evictions(&self) -> u64 {
        self.disk_writes + self.discards
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "total memory frames:  {}", self.num_frames)?;
        writeln!(f, "events in trace:      {}", self.events)?;
        writeln!(f, "total disk reads:     {}", self.disk_reads)?;
        writeln!(f, "total disk writes:    {}", self.disk_writes)?;
        write!(f, "page fault rate:      {:.4}", self.fault_rate())
    }
}
