//! The second chance / clock replacement policy.

use super::*;
use tracing::trace;

/// Evicts with the second chance / clock algorithm.
///
/// The hand sweeps over the frames in index order. A frame that has been referenced since the hand
/// last passed it has its referenced bit cleared and is skipped; the first frame found without the
/// bit set (or without a page) is the victim, and the hand moves past it.
///
/// A sweep is bounded to two full revolutions. Since the first revolution clears every bit, the
/// second always finds a victim, but if it somehow does not, the frame under the hand is taken.
#[derive(Debug, Default, Clone)]
pub struct Clock {
    /// The index of the next frame the hand will inspect.
    hand: FrameId,
}

impl Clock {
    /// Creates a new `Clock` replacer with the hand at the first frame.
    pub fn new() -> Self {
        Self { hand: 0 }
    }

    /// Returns the index of the next frame the hand will inspect.
    pub fn hand(&self) -> FrameId {
        self.hand
    }

    /// Moves the hand one frame forward, returning where it was.
    fn advance(&mut self, num_frames: usize) -> FrameId {
        let current = self.hand;
        self.hand = (current + 1) % num_frames;
        current
    }
}

impl Replacer for Clock {
    fn choose_victim(&mut self, frames: &mut FrameTable) -> Result<FrameId> {
        let num_frames = frames.num_frames();
        self.hand %= num_frames;

        for _ in 0..2 * num_frames {
            let second_chance = frames
                .frame(self.hand)
                .is_some_and(|frame| frame.is_valid() && frame.is_referenced());

            let frame_id = self.advance(num_frames);

            if !second_chance {
                return Ok(frame_id);
            }

            trace!("Clock hand cleared the referenced bit of frame {}", frame_id);
            frames.clear_referenced(frame_id)?;
        }

        Ok(self.advance(num_frames))
    }

    fn reset(&mut self) {
        self.hand = 0;
    }
}
