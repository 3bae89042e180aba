//! Dense projectile storage.
//!
//! Projectiles, their configs and their pose targets live in parallel packed
//! arrays that share one index space. Removal swaps the last live element
//! into the freed slot, so an index names the same projectile only until the
//! next removal; nothing outside a single tick may hold on to one.

use crate::projectile::{Projectile, ProjectileConfig};
use crate::visual::{PrefabRef, VisualHandle};

/// Visual bookkeeping released by a removal, to be handed back to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetiredVisual {
    pub handle: VisualHandle,
    pub prefab: PrefabRef,
}

pub struct BulletStore {
    projectiles: Vec<Projectile>,
    configs: Vec<ProjectileConfig>,
    pose_targets: Vec<VisualHandle>,
    // Backing slots grow by doubling; the tail past `len()` is kept empty.
    visuals: Vec<Option<VisualHandle>>,
    prefabs: Vec<Option<PrefabRef>>,
}

impl BulletStore {
    pub fn new(capacity: usize, visual_capacity: usize) -> Self {
        let visual_capacity = visual_capacity.max(1);
        Self {
            projectiles: Vec::with_capacity(capacity),
            configs: Vec::with_capacity(capacity),
            pose_targets: Vec::with_capacity(capacity),
            visuals: vec![None; visual_capacity],
            prefabs: vec![None; visual_capacity],
        }
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Append a projectile and return its dense index.
    pub fn push(
        &mut self,
        projectile: Projectile,
        config: ProjectileConfig,
        visual: VisualHandle,
        prefab: PrefabRef,
    ) -> usize {
        let index = self.projectiles.len();
        self.projectiles.push(projectile);
        self.configs.push(config);

        if self.projectiles.len() >= self.visuals.len() {
            let grown = self.projectiles.len() << 1;
            log::debug!("Growing projectile visual slots {} -> {}", self.visuals.len(), grown);
            self.visuals.resize(grown, None);
            self.prefabs.resize(grown, None);
        }

        self.visuals[index] = Some(visual);
        self.prefabs[index] = Some(prefab);
        self.pose_targets.push(visual);
        index
    }

    /// Remove the projectile at `index` by moving the last one into its slot.
    ///
    /// Returns `None` for an index outside the live range.
    pub fn remove_at_swap_back(&mut self, index: usize) -> Option<RetiredVisual> {
        if index >= self.projectiles.len() {
            return None;
        }

        self.projectiles.swap_remove(index);
        self.configs.swap_remove(index);
        self.pose_targets.swap_remove(index);

        let last = self.projectiles.len();
        let handle = self.visuals[index].take();
        let prefab = self.prefabs[index].take();
        self.visuals[index] = self.visuals[last].take();
        self.prefabs[index] = self.prefabs[last].take();

        handle
            .zip(prefab)
            .map(|(handle, prefab)| RetiredVisual { handle, prefab })
    }

    /// Drain every projectile, returning their visuals in index order.
    pub fn clear(&mut self) -> Vec<RetiredVisual> {
        let len = self.projectiles.len();
        self.projectiles.clear();
        self.configs.clear();
        self.pose_targets.clear();
        self.visuals[..len]
            .iter_mut()
            .zip(self.prefabs[..len].iter_mut())
            .filter_map(|(visual, prefab)| visual.take().zip(prefab.take()))
            .map(|(handle, prefab)| RetiredVisual { handle, prefab })
            .collect()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn configs(&self) -> &[ProjectileConfig] {
        &self.configs
    }

    pub fn pose_targets(&self) -> &[VisualHandle] {
        &self.pose_targets
    }

    pub fn visual(&self, index: usize) -> Option<VisualHandle> {
        self.visuals.get(index).copied().flatten()
    }

    pub fn prefab(&self, index: usize) -> Option<PrefabRef> {
        self.prefabs.get(index).copied().flatten()
    }

    pub fn visual_capacity(&self) -> usize {
        self.visuals.len()
    }

    /// Kinematic state for writing alongside read-only configs.
    pub fn simulation_mut(&mut self) -> (&mut [Projectile], &[ProjectileConfig]) {
        (&mut self.projectiles, &self.configs)
    }
}
