use fnv::FnvHasher;
use rand::{prelude::*, rngs::SmallRng};
use rand_distr::{Distribution, Uniform};
use std::hash::Hasher;

pub fn small_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Mixes a per-step constant into the world seed so each generation step draws from its own
/// stream.
pub fn seed_for_step(world_seed: u64, seed_part: u64) -> u64 {
    let mut h = FnvHasher::default();
    h.write_u64(world_seed);
    h.write_u64(seed_part);

    h.finish()
}

/// Uniform index in `0..len`, or `None` if there is nothing to choose from.
pub fn choose_index<R: Rng>(rng: &mut R, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    Some(Uniform::from(0..len).sample(rng))
}
