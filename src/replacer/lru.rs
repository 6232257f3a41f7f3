//! The least recently used replacement policy.

use super::*;

/// Evicts the valid frame with the oldest access time.
///
/// The access times are the `last_used` stamps the [`FrameTable`] already keeps, so this policy
/// carries no state of its own.
#[derive(Debug, Default, Clone)]
pub struct Lru;

impl Lru {
    /// Creates a new `Lru` replacer.
    pub fn new() -> Self {
        Self
    }
}

impl Replacer for Lru {
    fn choose_victim(&mut self, frames: &mut FrameTable) -> Result<FrameId> {
        // `min_by_key` keeps the first of several equal minimums, so ties go to the lowest index.
        frames
            .frames()
            .iter()
            .enumerate()
            .filter(|(_, frame)| frame.is_valid())
            .min_by_key(|(_, frame)| frame.last_used())
            .map(|(frame_id, _)| frame_id)
            .ok_or_else(|| {
                Error::InternalConsistency("LRU found no valid frame to evict".to_string())
            })
    }

    fn reset(&mut self) {}
}
