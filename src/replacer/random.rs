//! The random replacement policy.

use super::*;
use derivative::Derivative;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Evicts a frame chosen uniformly at random.
///
/// The random source is injectable and always seeded explicitly, so that a run can be reproduced
/// exactly by reusing its seed.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct RandomReplacer<R = StdRng> {
    /// The number of frames to choose between.
    num_frames: usize,

    /// The seed the random source was created with, kept around for [`Replacer::reset`].
    seed: u64,

    /// The random source.
    #[derivative(Debug = "ignore")]
    rng: R,
}

impl<R: RngCore + SeedableRng> RandomReplacer<R> {
    /// Creates a new `RandomReplacer` over `num_frames` frames, seeding its random source with
    /// `seed`.
    pub fn new(num_frames: usize, seed: u64) -> Self {
        Self {
            num_frames,
            seed,
            rng: R::seed_from_u64(seed),
        }
    }

    /// Returns the seed of the random source.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl<R: RngCore + SeedableRng> Replacer for RandomReplacer<R> {
    fn choose_victim(&mut self, frames: &mut FrameTable) -> Result<FrameId> {
        if self.num_frames != frames.num_frames() {
            return Err(Error::InternalConsistency(format!(
                "random replacer was built for {} frames, but the table has {}",
                self.num_frames,
                frames.num_frames()
            )));
        }

        Ok(self.rng.gen_range(0..self.num_frames))
    }

    fn reset(&mut self) {
        self.rng = R::seed_from_u64(self.seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_table(num_frames: usize) -> FrameTable {
        let mut frames = FrameTable::new(num_frames).unwrap();
        for page in 0..num_frames as u64 {
            frames.allocate_free(PageNumber::new(page)).unwrap();
        }
        frames
    }

    #[test]
    fn test_victims_in_range() {
        let mut frames = full_table(5);
        let mut random = RandomReplacer::<StdRng>::new(5, 42);

        for _ in 0..1000 {
            let victim = random.choose_victim(&mut frames).unwrap();
            assert!(victim < 5);
        }
    }

    #[test]
    fn test_same_seed_same_victims() {
        let mut frames = full_table(16);
        let mut first = RandomReplacer::<StdRng>::new(16, 7);
        let mut second = RandomReplacer::<StdRng>::new(16, 7);

        let a: Vec<_> = (0..64)
            .map(|_| first.choose_victim(&mut frames).unwrap())
            .collect();
        let b: Vec<_> = (0..64)
            .map(|_| second.choose_victim(&mut frames).unwrap())
            .collect();
        assert_eq!(a, b);

        // Resetting reseeds, so the sequence starts over.
        first.reset();
        let c: Vec<_> = (0..64)
            .map(|_| first.choose_victim(&mut frames).unwrap())
            .collect();
        assert_eq!(a, c);
    }

    #[test]
    fn test_single_frame() {
        let mut frames = full_table(1);
        let mut random = RandomReplacer::<StdRng>::new(1, 0);

        for _ in 0..10 {
            assert_eq!(random.choose_victim(&mut frames).unwrap(), 0);
        }
    }

    #[test]
    fn test_mismatched_table() {
        let mut frames = full_table(3);
        let mut random = RandomReplacer::<StdRng>::new(4, 0);

        assert!(matches!(
            random.choose_victim(&mut frames),
            Err(Error::InternalConsistency(_))
        ));
    }
}
