//! The error type shared by every fallible operation of the simulator.
//!
//! Every error is fatal to a run: the simulation is a deterministic batch over a finite trace, so
//! there is nothing to retry and no partial result worth committing.

use crate::memory::FrameId;
use crate::page::PageNumber;
use thiserror::Error;

/// A specialized [`Result`](std::result::Result) for simulator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// All of the ways a simulation run can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// The simulator could not be configured, so no event was ever processed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A trace entry could not be turned into an access event.
    #[error("badly formatted trace entry {event} (line {line}): {reason}")]
    MalformedTraceEntry {
        /// The 1-based index of the offending event.
        event: usize,
        /// The 1-based line number the entry was read from.
        line: usize,
        /// What was wrong with the entry.
        reason: String,
    },

    /// The frame table bookkeeping contradicted itself.
    ///
    /// This can only be produced by a bug in a replacement policy or in the frame table, never by
    /// bad input.
    #[error("internal consistency violation: {0}")]
    InternalConsistency(String),

    /// Reading the trace failed.
    #[error("unable to read trace: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an [`Error::InternalConsistency`] for a page that no frame holds after its fault
    /// was handled.
    pub(crate) fn unresolved(page: PageNumber) -> Self {
        Self::InternalConsistency(format!("no frame holds {page} after fault handling"))
    }

    /// Creates an [`Error::InternalConsistency`] for a frame index outside of the frame table.
    pub(crate) fn frame_out_of_range(frame_id: FrameId, num_frames: usize) -> Self {
        Self::InternalConsistency(format!(
            "frame {frame_id} is out of range for a table of {num_frames} frames"
        ))
    }
}
