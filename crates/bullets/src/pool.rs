//! Recycling pool for projectile visuals.
//!
//! One LIFO stack per prefab. A miss instantiates a fresh visual through the
//! loader; a release hides the visual and stacks it. Visuals are never
//! destroyed, so the pool only grows.

use std::collections::HashMap;

use crate::visual::{LoadError, PrefabRef, ResourceLoader, VisualHandle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Visuals created through the loader.
    pub instantiated: usize,
    /// Acquisitions served from a stack.
    pub reused: usize,
    /// Visuals handed back.
    pub released: usize,
}

pub struct VisualPool<L: ResourceLoader> {
    loader: L,
    parent: Option<VisualHandle>,
    stacks: HashMap<PrefabRef, Vec<VisualHandle>>,
    stack_capacity: usize,
    stats: PoolStats,
}

impl<L: ResourceLoader> VisualPool<L> {
    /// New visuals are parented under `parent`.
    pub fn new(loader: L, parent: Option<VisualHandle>, stack_capacity: usize) -> Self {
        Self {
            loader,
            parent,
            stacks: HashMap::new(),
            stack_capacity,
            stats: PoolStats::default(),
        }
    }

    pub fn acquire(&mut self, prefab: PrefabRef) -> Result<VisualHandle, LoadError> {
        if let Some(handle) = self.stacks.get_mut(&prefab).and_then(Vec::pop) {
            self.loader.set_active(handle, true);
            self.stats.reused += 1;
            return Ok(handle);
        }

        let template = self.loader.load(prefab)?;
        let handle = self.loader.instantiate(&template, self.parent);
        self.stats.instantiated += 1;
        Ok(handle)
    }

    pub fn release(&mut self, handle: VisualHandle, prefab: PrefabRef) {
        let capacity = self.stack_capacity;
        self.stacks
            .entry(prefab)
            .or_insert_with(|| {
                log::debug!("Creating visual pool for {prefab}");
                Vec::with_capacity(capacity)
            })
            .push(handle);
        self.loader.set_active(handle, false);
        self.stats.released += 1;
    }

    /// Hidden visuals waiting for `prefab`.
    pub fn pooled(&self, prefab: PrefabRef) -> usize {
        self.stacks.get(&prefab).map_or(0, Vec::len)
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}
