//! Projectile system: owns the dense store and runs the per-tick pipeline.
//!
//! A tick runs five stages separated by fork-join barriers:
//!
//! 1. movement: expire or advance every projectile, emitting sweeps
//! 2. query batch: the collision engine answers all sweeps at once
//! 3. response: hits queue their projectile for removal
//! 4. removal: serial, largest index first, visuals back to the pool
//! 5. pose sync: survivors push their pose into their visual
//!
//! Dense indices are only meaningful inside a single tick.

use engine_core::{Clock, Transform, Vec3};
use physics::SweepQueryEngine;

use crate::accumulator::CollisionAccumulator;
use crate::config::BulletSettings;
use crate::error::BulletError;
use crate::movement;
use crate::pool::VisualPool;
use crate::pose_sync;
use crate::projectile::{Projectile, ProjectileConfig};
use crate::removal::RemovalQueue;
use crate::response;
use crate::store::BulletStore;
use crate::visual::{PoseSink, PrefabRef, ResourceLoader, VisualHandle};

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Projectiles alive when the tick started.
    pub simulated: usize,
    /// Queued for removal by time-to-live.
    pub expired: usize,
    /// Sweeps submitted to the collision engine.
    pub casts: usize,
    /// Sweeps that hit something.
    pub hits: usize,
    /// Projectiles actually removed (duplicates collapsed).
    pub removed: usize,
    /// Projectiles alive after the tick.
    pub live: usize,
}

pub struct BulletSystem<C, L>
where
    C: Clock,
    L: ResourceLoader + PoseSink,
{
    clock: C,
    store: BulletStore,
    removals: RemovalQueue,
    pool: VisualPool<L>,
    settings: BulletSettings,
}

impl<C, L> BulletSystem<C, L>
where
    C: Clock,
    L: ResourceLoader + PoseSink,
{
    pub fn new(clock: C, pool: VisualPool<L>, settings: BulletSettings) -> Self {
        Self {
            clock,
            store: BulletStore::new(settings.initial_capacity, settings.visual_capacity),
            removals: RemovalQueue::with_capacity(settings.removal_capacity),
            pool,
            settings,
        }
    }

    /// Add a projectile; it is simulated from the next tick on.
    ///
    /// `direction` is normalized; a zero direction or zero speed yields a
    /// projectile that stays put until its time-to-live runs out.
    pub fn spawn(
        &mut self,
        position: Vec3,
        direction: Vec3,
        orientation: f32,
        config: ProjectileConfig,
        prefab: PrefabRef,
    ) -> Result<usize, BulletError> {
        let visual = self.pool.acquire(prefab)?;
        self.pool
            .loader()
            .set_pose(visual, position, Transform::yaw_degrees(orientation));

        let projectile = Projectile {
            position,
            direction: direction.normalize_or_zero(),
            spawn_time: self.clock.elapsed_seconds(),
            orientation,
        };
        Ok(self.store.push(projectile, config, visual, prefab))
    }

    /// Run the whole pipeline once. Call once per frame after advancing the clock.
    pub fn tick<E: SweepQueryEngine>(&mut self, engine: &E) -> Result<TickReport, BulletError> {
        let dt = self.clock.delta_seconds();
        let now = self.clock.elapsed_seconds();
        let grain = self.settings.grain_size.max(1);
        let simulated = self.store.len();

        let accumulator = CollisionAccumulator::with_capacity(simulated);
        self.removals.prepare(simulated);

        let (projectiles, configs) = self.store.simulation_mut();
        movement::advance(
            projectiles,
            configs,
            dt,
            now,
            accumulator.parallel_writer(),
            self.removals.parallel_writer(),
            grain,
        )?;
        let expired = self.removals.len();

        let batch = accumulator.into_batch();
        let results = engine.cast_batch(&batch.queries);
        if results.len() != batch.len() {
            return Err(BulletError::BatchMismatch {
                expected: batch.len(),
                got: results.len(),
            });
        }

        let hits = response::queue_hits(&results, &batch.origins, self.removals.parallel_writer(), grain)?;

        let pool = &mut self.pool;
        let removed = self
            .removals
            .apply(&mut self.store, |visual| pool.release(visual.handle, visual.prefab));

        pose_sync::sync_poses(
            self.store.pose_targets(),
            self.store.projectiles(),
            self.pool.loader(),
            grain,
        );

        let report = TickReport {
            simulated,
            expired,
            casts: batch.len(),
            hits,
            removed,
            live: self.store.len(),
        };
        log::trace!("{report:?}");
        Ok(report)
    }

    /// Remove every projectile, returning all visuals to the pool.
    pub fn clear(&mut self) -> usize {
        let retired = self.store.clear();
        for visual in &retired {
            self.pool.release(visual.handle, visual.prefab);
        }
        log::debug!("Cleared {} projectiles", retired.len());
        retired.len()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        self.store.projectiles()
    }

    pub fn configs(&self) -> &[ProjectileConfig] {
        self.store.configs()
    }

    pub fn pose_targets(&self) -> &[VisualHandle] {
        self.store.pose_targets()
    }

    pub fn pool(&self) -> &VisualPool<L> {
        &self.pool
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn settings(&self) -> &BulletSettings {
        &self.settings
    }
}
