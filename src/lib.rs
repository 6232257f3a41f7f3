//! A demand paging simulator.
//!
//! Given a trace of memory accesses, `memsim` tracks which pages are resident in a fixed set of
//! physical frames, detects page faults, and resolves them by allocating free frames or by evicting
//! a victim chosen by a replacement policy (random, LRU, clock, or FIFO). It reports how many
//! faults, disk reads, and disk writes the trace caused.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod memory;
pub mod page;
pub mod replacer;
pub mod simulator;
pub mod stats;
pub mod trace;

pub use config::SimConfig;
pub use error::{Error, Result};
pub use page::{AccessKind, PageNumber};
pub use replacer::Policy;
pub use simulator::{EventOutcome, Simulator};
pub use stats::Stats;
