//! Pending removals and their order-safe application.
//!
//! Indices arrive unordered from the expiry and hit producers and may repeat.
//! Applying them largest-first means a swap-back only ever pulls from slots
//! above every index still waiting, so the remaining indices stay valid.

use crate::append::{AppendBuffer, CapacityExceeded, ParallelWriter};
use crate::store::{BulletStore, RetiredVisual};

pub struct RemovalQueue {
    pending: AppendBuffer<usize>,
}

impl RemovalQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: AppendBuffer::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.pending.capacity()
    }

    /// Make room for one entry per live projectile. Drops anything pending.
    pub fn prepare(&mut self, live: usize) {
        if live > self.pending.capacity() {
            let grown = live.next_power_of_two();
            log::debug!("Growing removal queue {} -> {}", self.pending.capacity(), grown);
            self.pending = AppendBuffer::with_capacity(grown);
        } else {
            self.pending.clear();
        }
    }

    pub fn push(&mut self, index: usize) -> Result<usize, CapacityExceeded> {
        self.pending.push(index)
    }

    pub fn parallel_writer(&self) -> ParallelWriter<'_, usize> {
        self.pending.parallel_writer()
    }

    /// Take every pending index, largest first, without repeats.
    pub fn drain_descending(&mut self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.pending.iter().copied().collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();
        self.pending.clear();
        indices
    }

    /// Remove every queued projectile from `store`, handing each visual to `release`.
    ///
    /// Returns how many projectiles were removed.
    pub fn apply(
        &mut self,
        store: &mut BulletStore,
        mut release: impl FnMut(RetiredVisual),
    ) -> usize {
        let mut removed = 0;
        for index in self.drain_descending() {
            match store.remove_at_swap_back(index) {
                Some(visual) => {
                    release(visual);
                    removed += 1;
                }
                None => log::warn!("Dropping stale removal index {index} (live {})", store.len()),
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{filled_store, ids};

    fn queue_of(indices: &[usize]) -> RemovalQueue {
        let mut queue = RemovalQueue::with_capacity(indices.len());
        for &i in indices {
            queue.push(i).unwrap();
        }
        queue
    }

    #[test]
    fn drain_sorts_descending_and_dedups() {
        let mut queue = queue_of(&[1, 4, 2, 4, 0]);
        assert_eq!(queue.drain_descending(), vec![4, 2, 1, 0]);
        assert!(queue.is_empty());
    }

    #[test]
    fn descending_removal_keeps_the_moved_survivor() {
        let (mut store, visuals) = filled_store(5);
        let mut queue = queue_of(&[1, 3]);
        let mut released = Vec::new();
        let removed = queue.apply(&mut store, |v| released.push(v.handle));

        assert_eq!(removed, 2);
        let mut survivors = ids(&store);
        survivors.sort_unstable();
        assert_eq!(survivors, vec![0, 2, 4]);
        assert_eq!(ids(&store), vec![0, 4, 2]);
        assert_eq!(released, vec![visuals[3], visuals[1]]);
    }

    #[test]
    fn duplicate_indices_remove_once() {
        let (mut store, _) = filled_store(5);
        let mut queue = queue_of(&[2, 2, 4]);
        let removed = queue.apply(&mut store, |_| {});
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 3);
        let mut survivors = ids(&store);
        survivors.sort_unstable();
        assert_eq!(survivors, vec![0, 1, 3]);
    }

    #[test]
    fn prepare_grows_and_clears() {
        let mut queue = queue_of(&[0]);
        queue.prepare(5);
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), 8);
        queue.push(3).unwrap();
        queue.prepare(2);
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), 8);
    }

    #[test]
    fn concurrent_producers_feed_one_queue() {
        use rayon::prelude::*;
        let (mut store, _) = filled_store(64);
        let mut queue = RemovalQueue::with_capacity(64);
        {
            let writer = queue.parallel_writer();
            (0..64usize)
                .into_par_iter()
                .filter(|i| i % 2 == 0)
                .for_each(|i| {
                    writer.push(i).unwrap();
                });
        }
        assert_eq!(queue.apply(&mut store, |_| {}), 32);
        assert!(ids(&store).iter().all(|id| id % 2 == 1));
    }
}
