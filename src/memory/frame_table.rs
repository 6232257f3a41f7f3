//! This module contains the type definition and implementation for the [`FrameTable`] struct.
//!
//! The [`FrameTable`] is the single owner of every [`Frame`] in the simulated physical memory, as
//! well as the global logical clock used to order frame accesses. Residency lookups and free frame
//! allocation are linear scans over the table. Frame counts are expected to be in the tens to low
//! thousands, so no index from pages to frames is maintained.

use super::frame::{Frame, FrameId, VictimRecord};
use crate::error::{Error, Result};
use crate::page::{AccessKind, PageNumber};
use tracing::trace;

/// A fixed-size table of physical [`Frame`]s.
///
/// The number of frames is decided once at construction and never changes. No two valid frames
/// ever hold the same page.
#[derive(Debug, Clone)]
pub struct FrameTable {
    /// The frames themselves, indexed by [`FrameId`].
    frames: Vec<Frame>,

    /// The global logical clock. Incremented on every touch, allocation, and replacement.
    clock: u64,
}

impl FrameTable {
    /// Creates a new `FrameTable` with `num_frames` empty frames and the clock at zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `num_frames` is zero, or if the storage for the frames could not
    /// be reserved.
    pub fn new(num_frames: usize) -> Result<Self> {
        if num_frames == 0 {
            return Err(Error::Config(
                "the number of frames must be at least 1".to_string(),
            ));
        }

        let mut frames = Vec::new();
        frames.try_reserve_exact(num_frames).map_err(|e| {
            Error::Config(format!("unable to allocate {num_frames} frames: {e}"))
        })?;
        frames.resize_with(num_frames, Frame::default);

        Ok(Self { frames, clock: 0 })
    }

    /// Invalidates every frame and sets the clock back to zero.
    pub fn reset(&mut self) {
        self.frames.fill(Frame::default());
        self.clock = 0;
    }

    /// Gets the number of frames in the table.
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Gets the current value of the global clock without advancing it.
    pub fn now(&self) -> u64 {
        self.clock
    }

    /// Gets the frame at `frame_id`, if it is in range.
    pub fn frame(&self, frame_id: FrameId) -> Option<&Frame> {
        self.frames.get(frame_id)
    }

    /// Gets all of the frames, in index order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Counts the frames that currently hold a page.
    pub fn num_valid(&self) -> usize {
        self.frames.iter().filter(|frame| frame.is_valid()).count()
    }

    /// Advances the global clock and returns the new time.
    pub fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Finds the frame that `page` is resident in, if any.
    pub fn lookup(&self, page: PageNumber) -> Option<FrameId> {
        self.frames.iter().position(|frame| frame.holds(page))
    }

    /// Loads `page` into the first free frame, returning `None` if every frame is occupied.
    ///
    /// The new page starts out clean and referenced, stamped with a fresh clock value.
    pub fn allocate_free(&mut self, page: PageNumber) -> Option<FrameId> {
        let frame_id = self.frames.iter().position(|frame| !frame.is_valid())?;

        let now = self.tick();
        self.frames[frame_id].install(page, now);

        trace!("Allocated free frame {} to {}", frame_id, page);

        Some(frame_id)
    }

    /// Records an access of kind `access` to the page resident in `frame_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InternalConsistency`] if `frame_id` is not a frame in this table.
    pub fn touch(&mut self, frame_id: FrameId, access: AccessKind) -> Result<()> {
        let now = self.clock + 1;
        let frame = self.frame_mut(frame_id)?;
        frame.touch(access, now);
        self.clock = now;

        Ok(())
    }

    /// Replaces whatever page `frame_id` holds with `page`, returning what was evicted.
    ///
    /// The incoming page is installed exactly as [`FrameTable::allocate_free`] would install it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InternalConsistency`] if `frame_id` is out of range or does not currently
    /// hold a page, since there would be nothing to evict.
    pub fn replace(&mut self, frame_id: FrameId, page: PageNumber) -> Result<VictimRecord> {
        let now = self.clock + 1;
        let frame = self.frame_mut(frame_id)?;

        let Some(evicted_page) = frame.page() else {
            return Err(Error::InternalConsistency(format!(
                "tried to evict from frame {frame_id}, which holds no page"
            )));
        };

        let victim = VictimRecord {
            frame: frame_id,
            evicted_page,
            was_modified: frame.is_modified(),
        };

        frame.install(page, now);
        self.clock = now;

        trace!("Replaced {} in frame {} with {}", evicted_page, frame_id, page);

        Ok(victim)
    }

    /// Clears the referenced bit of `frame_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InternalConsistency`] if `frame_id` is not a frame in this table.
    pub(crate) fn clear_referenced(&mut self, frame_id: FrameId) -> Result<()> {
        self.frame_mut(frame_id)?.clear_referenced();
        Ok(())
    }

    /// Gets a mutable reference to a frame, treating an out-of-range index as a bookkeeping bug.
    fn frame_mut(&mut self, frame_id: FrameId) -> Result<&mut Frame> {
        let num_frames = self.frames.len();
        self.frames
            .get_mut(frame_id)
            .ok_or_else(|| Error::frame_out_of_range(frame_id, num_frames))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u64) -> PageNumber {
        PageNumber::new(number)
    }

    #[test]
    fn test_new_rejects_zero_frames() {
        assert!(matches!(FrameTable::new(0), Err(Error::Config(_))));
    }

    #[test]
    fn test_new_starts_empty() {
        let table = FrameTable::new(4).unwrap();

        assert_eq!(table.num_frames(), 4);
        assert_eq!(table.num_valid(), 0);
        assert_eq!(table.now(), 0);
        assert!(table.frames().iter().all(|frame| !frame.is_valid()));
        assert_eq!(table.lookup(page(0)), None);
    }

    #[test]
    fn test_allocate_fills_in_order() {
        let mut table = FrameTable::new(3).unwrap();

        assert_eq!(table.allocate_free(page(7)), Some(0));
        assert_eq!(table.allocate_free(page(8)), Some(1));
        assert_eq!(table.allocate_free(page(9)), Some(2));
        assert_eq!(table.allocate_free(page(10)), None);

        assert_eq!(table.lookup(page(8)), Some(1));
        assert_eq!(table.lookup(page(10)), None);
        assert_eq!(table.num_valid(), 3);

        let frame = table.frame(2).unwrap();
        assert!(frame.is_referenced());
        assert!(!frame.is_modified());
        assert_eq!(frame.last_used(), 3);
    }

    #[test]
    fn test_touch_sets_bits() {
        let mut table = FrameTable::new(2).unwrap();
        let frame_id = table.allocate_free(page(1)).unwrap();

        table.clear_referenced(frame_id).unwrap();
        table.touch(frame_id, AccessKind::Read).unwrap();

        let frame = table.frame(frame_id).unwrap();
        assert!(frame.is_referenced());
        assert!(!frame.is_modified());
        assert_eq!(frame.last_used(), 2);

        table.touch(frame_id, AccessKind::Write).unwrap();
        table.touch(frame_id, AccessKind::Read).unwrap();

        let frame = table.frame(frame_id).unwrap();
        assert!(frame.is_modified());
        assert_eq!(frame.last_used(), 4);
        assert_eq!(table.now(), 4);
    }

    #[test]
    fn test_touch_out_of_range() {
        let mut table = FrameTable::new(2).unwrap();

        assert!(matches!(
            table.touch(2, AccessKind::Read),
            Err(Error::InternalConsistency(_))
        ));
        // A failed touch must not advance the clock.
        assert_eq!(table.now(), 0);
    }

    #[test]
    fn test_replace_reports_victim() {
        let mut table = FrameTable::new(1).unwrap();
        table.allocate_free(page(1)).unwrap();
        table.touch(0, AccessKind::Write).unwrap();

        let victim = table.replace(0, page(2)).unwrap();
        assert_eq!(
            victim,
            VictimRecord {
                frame: 0,
                evicted_page: page(1),
                was_modified: true,
            }
        );

        let frame = table.frame(0).unwrap();
        assert_eq!(frame.page(), Some(page(2)));
        assert!(!frame.is_modified());
        assert!(frame.is_referenced());
        assert_eq!(frame.last_used(), 3);
        assert_eq!(table.lookup(page(1)), None);
    }

    #[test]
    fn test_replace_empty_frame() {
        let mut table = FrameTable::new(2).unwrap();

        assert!(matches!(
            table.replace(1, page(2)),
            Err(Error::InternalConsistency(_))
        ));
    }

    #[test]
    fn test_reset() {
        let mut table = FrameTable::new(2).unwrap();
        table.allocate_free(page(1)).unwrap();
        table.allocate_free(page(2)).unwrap();

        table.reset();

        assert_eq!(table.num_valid(), 0);
        assert_eq!(table.now(), 0);
        assert_eq!(table.allocate_free(page(3)), Some(0));
    }
}
