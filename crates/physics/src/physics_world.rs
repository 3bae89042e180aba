//! Collision world management with Rapier3D.
//!
//! Projectiles never become rigid bodies; the world only holds the colliders
//! they are swept against, plus the query pipeline that answers the sweeps.

use crate::collision::CollisionGroup;
use engine_core::Vec3;
use rapier3d::na::{Isometry3, Vector3};
use rapier3d::prelude::*;

/// Collision world queried by projectile sweeps.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub query_pipeline: QueryPipeline,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Update query pipeline after colliders were added, moved or removed.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
        log::debug!("query pipeline rebuilt over {} colliders", self.collider_set.len());
    }

    /// Number of colliders currently in the world.
    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }

    /// Add a ground plane collider (flat Y=0 half-space).
    pub fn add_ground_plane(&mut self) -> ColliderHandle {
        let collider = ColliderBuilder::halfspace(Vector::y_axis())
            .collision_groups(CollisionGroup::environment())
            .build();
        self.collider_set.insert(collider)
    }

    /// Add a static cuboid collider (walls, hulls). No parent body; collider is fixed in world.
    /// `translation`: world position of center. `rotation_y_rad`: rotation around Y axis in radians.
    /// `half_extents`: half sizes in local X, Y, Z (after rotation).
    pub fn add_static_cuboid(
        &mut self,
        translation: Vec3,
        rotation_y_rad: f32,
        half_extents: Vec3,
        groups: InteractionGroups,
    ) -> ColliderHandle {
        let tra = vector![translation.x, translation.y, translation.z];
        let axisangle = Vector3::y_axis().into_inner() * (rotation_y_rad as Real);
        let position = Isometry3::new(tra, axisangle);
        let collider = ColliderBuilder::cuboid(
            half_extents.x as Real,
            half_extents.y as Real,
            half_extents.z as Real,
        )
        .position(position)
        .collision_groups(groups)
        .build();
        self.collider_set.insert(collider)
    }

    /// Add a static sphere collider (targets, asteroids).
    pub fn add_static_sphere(
        &mut self,
        center: Vec3,
        radius: f32,
        groups: InteractionGroups,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius)
            .translation(vector![center.x, center.y, center.z])
            .collision_groups(groups)
            .build();
        self.collider_set.insert(collider)
    }
}
