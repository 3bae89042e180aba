//! Collision-response stage: hits become removals.

use physics::SweepHit;
use rayon::prelude::*;

use crate::append::{CapacityExceeded, ParallelWriter};

/// Queue the originating projectile of every query that hit something.
///
/// `results[j]` answers the query recorded with `origins[j]`; the projectile
/// index is taken from `origins`, never from `j`. Returns the hit count.
pub fn queue_hits(
    results: &[Option<SweepHit>],
    origins: &[usize],
    removals: ParallelWriter<'_, usize>,
    grain_size: usize,
) -> Result<usize, CapacityExceeded> {
    results
        .par_iter()
        .zip(origins.par_iter())
        .with_min_len(grain_size)
        .try_fold(
            || 0usize,
            |hits, (result, &origin)| match result {
                Some(_) => removals.push(origin).map(|_| hits + 1),
                None => Ok(hits),
            },
        )
        .try_reduce(|| 0, |a, b| Ok(a + b))
}
