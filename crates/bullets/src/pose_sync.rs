//! Pose-sync stage: push surviving projectiles into their visuals.

use engine_core::Transform;
use rayon::prelude::*;

use crate::projectile::Projectile;
use crate::visual::{PoseSink, VisualHandle};

/// Write each projectile's position and yaw to the visual at the same index.
pub fn sync_poses<S: PoseSink>(
    targets: &[VisualHandle],
    projectiles: &[Projectile],
    sink: &S,
    grain_size: usize,
) {
    targets
        .par_iter()
        .zip(projectiles.par_iter())
        .with_min_len(grain_size)
        .for_each(|(&handle, projectile)| {
            sink.set_pose(
                handle,
                projectile.position,
                Transform::yaw_degrees(projectile.orientation),
            );
        });
}
