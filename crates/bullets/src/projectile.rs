//! Per-projectile simulation state and spawn-time configuration.

use engine_core::Vec3;
use physics::{LayerMask, SweepQuery};

/// Kinematic state, rewritten by the movement stage every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Vec3,
    /// Unit direction of travel (zero for a projectile that never moves).
    pub direction: Vec3,
    /// Clock time at spawn, in seconds.
    pub spawn_time: f32,
    /// Visual yaw about +Y, in degrees.
    pub orientation: f32,
}

/// Static parameters fixed at spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileConfig {
    /// Layers this projectile passes through.
    pub layer_mask: LayerMask,
    /// Units per second.
    pub speed: f32,
    /// Radius of the swept sphere.
    pub radius: f32,
    /// Seconds from spawn until expiry.
    pub time_to_live: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            layer_mask: LayerMask::NONE,
            speed: 50.0,
            radius: 0.1,
            time_to_live: 2.0,
        }
    }
}

impl Projectile {
    /// Expiry is inclusive: a projectile dies on the tick where its age reaches its TTL.
    pub fn is_expired(&self, config: &ProjectileConfig, now: f32) -> bool {
        self.spawn_time + config.time_to_live <= now
    }

    /// Sweep covering this tick's travel, starting from the current position.
    pub fn sweep(&self, config: &ProjectileConfig, distance: f32) -> SweepQuery {
        SweepQuery {
            origin: self.position,
            direction: self.direction,
            radius: config.radius,
            max_distance: distance,
            layer_mask: config.layer_mask,
        }
    }
}
