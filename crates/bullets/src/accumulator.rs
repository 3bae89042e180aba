//! Per-tick collection of sweep queries.

use physics::SweepQuery;

use crate::append::{AppendBuffer, CapacityExceeded, ParallelWriter};

/// A query plus the dense index of the projectile that issued it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastEntry {
    pub query: SweepQuery,
    pub origin: usize,
}

/// Queries split into the engine's input and the matching projectile indices.
#[derive(Debug, Default)]
pub struct CastBatch {
    pub queries: Vec<SweepQuery>,
    pub origins: Vec<usize>,
}

impl CastBatch {
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Sized to the live projectile count at tick start, which bounds the number
/// of writers. Created and consumed within one tick.
pub struct CollisionAccumulator {
    entries: AppendBuffer<CastEntry>,
}

impl CollisionAccumulator {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: AppendBuffer::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn add(&mut self, query: SweepQuery, origin: usize) -> Result<usize, CapacityExceeded> {
        self.entries.push(CastEntry { query, origin })
    }

    pub fn parallel_writer(&self) -> CastWriter<'_> {
        CastWriter {
            inner: self.entries.parallel_writer(),
        }
    }

    /// Split the filled range, preserving slot order.
    pub fn into_batch(self) -> CastBatch {
        self.entries
            .into_vec()
            .into_iter()
            .map(|entry| (entry.query, entry.origin))
            .unzip::<_, _, Vec<_>, Vec<_>>()
            .into()
    }
}

impl From<(Vec<SweepQuery>, Vec<usize>)> for CastBatch {
    fn from((queries, origins): (Vec<SweepQuery>, Vec<usize>)) -> Self {
        Self { queries, origins }
    }
}

#[derive(Clone, Copy)]
pub struct CastWriter<'a> {
    inner: ParallelWriter<'a, CastEntry>,
}

impl CastWriter<'_> {
    pub fn add(&self, query: SweepQuery, origin: usize) -> Result<usize, CapacityExceeded> {
        self.inner.push(CastEntry { query, origin })
    }
}
