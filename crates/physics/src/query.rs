//! Swept-sphere queries for projectile hit detection.
//!
//! Projectiles submit one [`SweepQuery`] each per tick; the whole batch is
//! answered at once and the results come back index-aligned with the input.

use crate::collision::LayerMask;
use crate::PhysicsWorld;
use engine_core::Vec3;
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::prelude::*;
use rayon::prelude::*;

/// A sphere of `radius` moved from `origin` along `direction` for `max_distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepQuery {
    pub origin: Vec3,
    /// Unit direction of travel.
    pub direction: Vec3,
    pub radius: f32,
    pub max_distance: f32,
    /// Layers the sweep ignores.
    pub layer_mask: LayerMask,
}

/// First contact found by a sweep.
#[derive(Debug, Clone, Copy)]
pub struct SweepHit {
    /// The collider that was hit.
    pub collider: ColliderHandle,
    /// Distance travelled before contact.
    pub distance: f32,
    /// Sphere center at the moment of contact.
    pub point: Vec3,
    /// Contact normal, pointing back toward the sphere.
    pub normal: Vec3,
}

/// Batched swept-volume query engine.
///
/// `cast_batch` must return exactly one entry per query, in query order.
pub trait SweepQueryEngine: Sync {
    fn cast_batch(&self, queries: &[SweepQuery]) -> Vec<Option<SweepHit>>;
}

impl PhysicsWorld {
    /// Sweep a single sphere and return the closest hit.
    pub fn sphere_cast(&self, query: &SweepQuery) -> Option<SweepHit> {
        let shape = Ball::new(query.radius);
        let shape_pos = Isometry::translation(query.origin.x, query.origin.y, query.origin.z);
        let shape_vel = vector![query.direction.x, query.direction.y, query.direction.z];
        let filter = QueryFilter::new().groups(query.layer_mask.query_groups());
        let options = ShapeCastOptions::with_max_time_of_impact(query.max_distance);

        self.query_pipeline
            .cast_shape(
                &self.rigid_body_set,
                &self.collider_set,
                &shape_pos,
                &shape_vel,
                &shape,
                options,
                filter,
            )
            .map(|(collider, hit)| SweepHit {
                collider,
                distance: hit.time_of_impact,
                point: query.origin + query.direction * hit.time_of_impact,
                normal: Vec3::new(-hit.normal1.x, -hit.normal1.y, -hit.normal1.z),
            })
    }
}

impl SweepQueryEngine for PhysicsWorld {
    fn cast_batch(&self, queries: &[SweepQuery]) -> Vec<Option<SweepHit>> {
        queries.par_iter().map(|q| self.sphere_cast(q)).collect()
    }
}
