//! This module contains the definition of [`Frame`], the record describing one slot of physical
//! memory, along with [`VictimRecord`], the value produced when a frame's page is evicted.

use crate::page::{AccessKind, PageNumber};

/// The index of a [`Frame`] in the [`FrameTable`](super::FrameTable).
pub type FrameId = usize;

/// One physical memory slot and the bits the replacement policies make decisions with.
///
/// A `Frame` is only ever mutated through the [`FrameTable`](super::FrameTable) that owns it, so
/// the accessors here are read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Whether a page currently occupies this frame.
    valid: bool,

    /// The page resident in this frame. Meaningless if the frame is not valid.
    page: PageNumber,

    /// The dirty bit, set when the resident page has been written since it was brought in.
    modified: bool,

    /// Set on every access, and cleared only by the clock policy's sweep.
    referenced: bool,

    /// The logical time of the most recent touch, taken from the global clock.
    last_used: u64,
}

impl Frame {
    /// Returns `true` if a page occupies this frame.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the resident page, if the frame is occupied.
    pub fn page(&self) -> Option<PageNumber> {
        self.valid.then_some(self.page)
    }

    /// Returns `true` if the resident page must be written back on eviction.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns `true` if the frame has been accessed since its referenced bit was last cleared.
    pub fn is_referenced(&self) -> bool {
        self.referenced
    }

    /// Returns the logical time this frame was last touched.
    pub fn last_used(&self) -> u64 {
        self.last_used
    }

    /// Returns `true` if this frame is occupied by `page`.
    pub(crate) fn holds(&self, page: PageNumber) -> bool {
        self.valid && self.page == page
    }

    /// Installs `page` as a freshly loaded, clean, referenced page.
    pub(crate) fn install(&mut self, page: PageNumber, now: u64) {
        self.valid = true;
        self.page = page;
        self.modified = false;
        self.referenced = true;
        self.last_used = now;
    }

    /// Records an access to the resident page.
    pub(crate) fn touch(&mut self, access: AccessKind, now: u64) {
        self.referenced = true;
        self.last_used = now;

        if access.is_write() {
            self.modified = true;
        }
    }

    /// Clears the referenced bit, giving the frame its second chance.
    pub(crate) fn clear_referenced(&mut self) {
        self.referenced = false;
    }
}

/// What was thrown out of a frame to make room for an incoming page.
///
/// This is consumed immediately by the [`Simulator`](crate::Simulator) to decide whether the
/// eviction cost a disk write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VictimRecord {
    /// The frame the victim was evicted from, which now holds the incoming page.
    pub frame: FrameId,

    /// The page that was evicted.
    pub evicted_page: PageNumber,

    /// Whether the evicted page was dirty and therefore had to be written back.
    pub was_modified: bool,
}
