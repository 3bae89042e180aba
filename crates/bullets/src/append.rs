//! Fixed-capacity append buffer with lock-free concurrent insertion.
//!
//! Writers reserve a slot by bumping an atomic length (`fetch_add` returns the
//! previous value, which becomes the slot index) and then fill that slot.
//! Two writers can never receive the same index, so every slot is written at
//! most once per fill cycle and no lock is involved. Readers run after the
//! writing stage has joined.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("append buffer is full (capacity {capacity})")]
pub struct CapacityExceeded {
    pub capacity: usize,
}

pub struct AppendBuffer<T> {
    slots: Box<[OnceLock<T>]>,
    len: AtomicUsize,
}

impl<T> AppendBuffer<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| OnceLock::new()).collect(),
            len: AtomicUsize::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of reserved slots. A failed concurrent push may have pushed the
    /// raw counter past capacity, hence the clamp.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire).min(self.slots.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Single-writer append.
    pub fn push(&mut self, value: T) -> Result<usize, CapacityExceeded> {
        let capacity = self.slots.len();
        let len = self.len.get_mut();
        let slot = *len;
        let Some(cell) = self.slots.get_mut(slot) else {
            return Err(CapacityExceeded { capacity });
        };
        // The slot is past the fill mark, so it is empty.
        let _ = cell.set(value);
        *len += 1;
        Ok(slot)
    }

    /// Handle for appending from many tasks at once.
    pub fn parallel_writer(&self) -> ParallelWriter<'_, T> {
        ParallelWriter { buffer: self }
    }

    /// Filled slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots[..self.len()].iter().filter_map(OnceLock::get)
    }

    /// Empty every filled slot, keeping the allocation.
    pub fn clear(&mut self) {
        let len = self.len();
        for cell in &mut self.slots[..len] {
            cell.take();
        }
        *self.len.get_mut() = 0;
    }

    pub fn into_vec(self) -> Vec<T> {
        let len = self.len();
        self.slots
            .into_vec()
            .into_iter()
            .take(len)
            .filter_map(OnceLock::into_inner)
            .collect()
    }
}

/// Shared append handle. Copies freely into parallel tasks.
pub struct ParallelWriter<'a, T> {
    buffer: &'a AppendBuffer<T>,
}

impl<T> Clone for ParallelWriter<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ParallelWriter<'_, T> {}

impl<T> ParallelWriter<'_, T> {
    pub fn push(&self, value: T) -> Result<usize, CapacityExceeded> {
        let slot = self.buffer.len.fetch_add(1, Ordering::AcqRel);
        let Some(cell) = self.buffer.slots.get(slot) else {
            return Err(CapacityExceeded {
                capacity: self.buffer.slots.len(),
            });
        };
        let stored = cell.set(value).is_ok();
        debug_assert!(stored, "slot {slot} reserved twice");
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn exclusive_push_fills_in_order() {
        let mut buffer = AppendBuffer::with_capacity(3);
        assert_eq!(buffer.push('a'), Ok(0));
        assert_eq!(buffer.push('b'), Ok(1));
        assert_eq!(buffer.iter().copied().collect::<String>(), "ab");
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn push_past_capacity_is_rejected() {
        let mut buffer = AppendBuffer::with_capacity(1);
        buffer.push(1).unwrap();
        assert_eq!(buffer.push(2), Err(CapacityExceeded { capacity: 1 }));

        let writer = buffer.parallel_writer();
        assert_eq!(writer.push(3), Err(CapacityExceeded { capacity: 1 }));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.into_vec(), vec![1]);
    }

    #[test]
    fn concurrent_writers_get_distinct_slots() {
        const N: usize = 10_000;
        let buffer = AppendBuffer::with_capacity(N);
        let writer = buffer.parallel_writer();
        let slots: Vec<usize> = (0..N)
            .into_par_iter()
            .map(|i| writer.push(i).unwrap())
            .collect();

        let mut seen_slots = slots;
        seen_slots.sort_unstable();
        seen_slots.dedup();
        assert_eq!(seen_slots.len(), N);

        let mut values = buffer.into_vec();
        assert_eq!(values.len(), N);
        values.sort_unstable();
        assert!(values.iter().enumerate().all(|(i, v)| i == *v));
    }

    #[test]
    fn clear_allows_refill() {
        let mut buffer = AppendBuffer::with_capacity(2);
        buffer.push(7).unwrap();
        buffer.push(8).unwrap();
        buffer.clear();
        assert!(buffer.is_empty());
        buffer.push(9).unwrap();
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![9]);
    }
}
