//! Implementation of the physical memory that logical pages are brought into: the fixed set of
//! [`Frame`]s and the [`FrameTable`] that does all of their bookkeeping.

pub(crate) mod frame;
pub(crate) mod frame_table;

pub use frame::{Frame, FrameId, VictimRecord};
pub use frame_table::FrameTable;
