//! Movement and query-submission stage.
//!
//! One task per projectile. A task reads and writes only its own projectile;
//! its only shared writes go through the append writers.

use rayon::prelude::*;

use crate::accumulator::CastWriter;
use crate::append::{CapacityExceeded, ParallelWriter};
use crate::projectile::{Projectile, ProjectileConfig};

/// Advance every live projectile by one tick.
///
/// Expired projectiles are queued for removal and neither moved nor swept.
/// Survivors submit a sweep from their current position covering this tick's
/// travel, then advance.
pub fn advance(
    projectiles: &mut [Projectile],
    configs: &[ProjectileConfig],
    dt: f32,
    now: f32,
    casts: CastWriter<'_>,
    removals: ParallelWriter<'_, usize>,
    grain_size: usize,
) -> Result<(), CapacityExceeded> {
    projectiles
        .par_iter_mut()
        .zip(configs.par_iter())
        .enumerate()
        .with_min_len(grain_size)
        .try_for_each(|(index, (projectile, config))| -> Result<(), CapacityExceeded> {
            if projectile.is_expired(config, now) {
                removals.push(index)?;
                return Ok(());
            }

            let distance = config.speed * dt;
            casts.add(projectile.sweep(config, distance), index)?;
            projectile.position += projectile.direction * distance;
            Ok(())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::CollisionAccumulator;
    use crate::removal::RemovalQueue;
    use engine_core::Vec3;

    fn projectile(spawn_time: f32) -> Projectile {
        Projectile {
            position: Vec3::ZERO,
            direction: Vec3::Z,
            spawn_time,
            orientation: 0.0,
        }
    }

    fn config(speed: f32, time_to_live: f32) -> ProjectileConfig {
        ProjectileConfig {
            speed,
            time_to_live,
            ..Default::default()
        }
    }

    #[test]
    fn survivors_move_and_submit_sweeps() {
        let mut projectiles = vec![projectile(0.0), projectile(0.0)];
        let configs = vec![config(10.0, 5.0), config(20.0, 5.0)];
        let acc = CollisionAccumulator::with_capacity(2);
        let mut removals = RemovalQueue::with_capacity(2);

        advance(&mut projectiles, &configs, 0.5, 1.0, acc.parallel_writer(), removals.parallel_writer(), 1).unwrap();

        assert_eq!(projectiles[0].position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(projectiles[1].position, Vec3::new(0.0, 0.0, 10.0));
        assert!(removals.drain_descending().is_empty());

        let batch = acc.into_batch();
        assert_eq!(batch.len(), 2);
        for (query, origin) in batch.queries.iter().zip(&batch.origins) {
            assert_eq!(query.origin, Vec3::ZERO);
            assert_eq!(query.max_distance, configs[*origin].speed * 0.5);
        }
    }

    #[test]
    fn expired_projectiles_are_queued_not_swept() {
        let mut projectiles = vec![projectile(0.0), projectile(0.5)];
        let configs = vec![config(10.0, 1.0), config(10.0, 1.0)];
        let acc = CollisionAccumulator::with_capacity(2);
        let mut removals = RemovalQueue::with_capacity(2);

        advance(&mut projectiles, &configs, 0.1, 1.0, acc.parallel_writer(), removals.parallel_writer(), 1).unwrap();

        assert_eq!(projectiles[0].position, Vec3::ZERO);
        assert_eq!(removals.drain_descending(), vec![0]);
        assert_eq!(acc.into_batch().origins, vec![1]);
    }

    #[test]
    fn zero_speed_projectile_stays_put() {
        let mut projectiles = vec![projectile(0.0)];
        let configs = vec![config(0.0, 1.0)];
        let acc = CollisionAccumulator::with_capacity(1);
        let removals = RemovalQueue::with_capacity(1);

        advance(&mut projectiles, &configs, 0.1, 0.5, acc.parallel_writer(), removals.parallel_writer(), 1).unwrap();

        assert_eq!(projectiles[0].position, Vec3::ZERO);
        assert_eq!(acc.into_batch().queries[0].max_distance, 0.0);
    }
}
