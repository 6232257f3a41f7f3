//! The first in, first out replacement policy.

use super::*;
use std::collections::VecDeque;

/// Evicts the frame whose page was loaded the longest time ago.
///
/// Admission order is tracked in an explicit queue rather than derived from the frames' access
/// stamps, since those are overwritten by every later touch. Each admission pushes its frame onto
/// the back of the queue, and each eviction pops the front.
#[derive(Debug, Clone)]
pub struct Fifo {
    /// The frames holding a page, oldest admission first.
    queue: VecDeque<FrameId>,
}

impl Fifo {
    /// Creates a new, empty `Fifo` replacer for a table of `num_frames` frames.
    pub fn new(num_frames: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(num_frames),
        }
    }

    /// Returns the frame that would be evicted next, if any page has been admitted.
    pub fn oldest(&self) -> Option<FrameId> {
        self.queue.front().copied()
    }
}

impl Replacer for Fifo {
    fn choose_victim(&mut self, frames: &mut FrameTable) -> Result<FrameId> {
        while let Some(frame_id) = self.queue.pop_front() {
            // A frame that no longer holds a page has nothing to evict.
            if frames.frame(frame_id).is_some_and(|frame| frame.is_valid()) {
                return Ok(frame_id);
            }
        }

        Err(Error::InternalConsistency(
            "FIFO queue has no admitted frame to evict".to_string(),
        ))
    }

    fn record_admission(&mut self, frame_id: FrameId) {
        // Reloading a frame that is still queued moves it to the back.
        if let Some(index) = self.queue.iter().position(|&x| x == frame_id) {
            self.queue.remove(index);
        }
        self.queue.push_back(frame_id);
    }

    fn reset(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::AccessKind;

    fn page(number: u64) -> PageNumber {
        PageNumber::new(number)
    }

    fn admit_all(frames: &mut FrameTable, fifo: &mut Fifo, pages: &[u64]) {
        for &number in pages {
            let frame_id = frames.allocate_free(page(number)).unwrap();
            fifo.record_admission(frame_id);
        }
    }

    #[test]
    fn test_evicts_in_admission_order() {
        let mut frames = FrameTable::new(3).unwrap();
        let mut fifo = Fifo::new(3);
        admit_all(&mut frames, &mut fifo, &[1, 2, 3]);

        // Touches do not change the admission order.
        frames.touch(0, AccessKind::Write).unwrap();
        frames.touch(0, AccessKind::Read).unwrap();

        for (expected_frame, expected_page) in [(0, 1), (1, 2), (2, 3)] {
            let victim = fifo.select_victim(&mut frames, page(10 + expected_page)).unwrap();
            fifo.record_admission(victim.frame);

            assert_eq!(victim.frame, expected_frame);
            assert_eq!(victim.evicted_page, page(expected_page));
        }

        // The replacements were admitted in the same order, so the cycle repeats.
        assert_eq!(fifo.oldest(), Some(0));
    }

    #[test]
    fn test_empty_queue() {
        let mut frames = FrameTable::new(2).unwrap();
        let mut fifo = Fifo::new(2);

        assert_eq!(fifo.oldest(), None);
        assert!(matches!(
            fifo.choose_victim(&mut frames),
            Err(Error::InternalConsistency(_))
        ));
    }

    #[test]
    fn test_reset() {
        let mut frames = FrameTable::new(2).unwrap();
        let mut fifo = Fifo::new(2);
        admit_all(&mut frames, &mut fifo, &[4, 5]);

        fifo.reset();
        assert_eq!(fifo.oldest(), None);
    }

    #[test]
    fn test_readmission_moves_to_back() {
        let mut frames = FrameTable::new(2).unwrap();
        let mut fifo = Fifo::new(2);
        admit_all(&mut frames, &mut fifo, &[4, 5]);

        fifo.record_admission(0);
        assert_eq!(fifo.oldest(), Some(1));
    }
}
