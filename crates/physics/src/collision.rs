//! Collision groups and projectile layer masks.

use rapier3d::prelude::*;
use std::ops::BitOr;

/// Collision groups for different entity types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (terrain, walls)
    Environment = 1 << 0,
    /// Player ship
    Player = 1 << 1,
    /// Enemy ships
    Enemy = 1 << 2,
    /// Player projectiles
    PlayerProjectile = 1 << 3,
    /// Enemy projectiles
    EnemyProjectile = 1 << 4,
    /// Debris and physics objects
    Debris = 1 << 5,
    /// Triggers and sensors
    Trigger = 1 << 6,
}

impl CollisionGroup {
    /// Membership/filter pair for environment colliders.
    pub fn environment() -> InteractionGroups {
        InteractionGroups::new(Group::from_bits_retain(Self::Environment as u32), Group::ALL)
    }

    /// Membership/filter pair for the player ship.
    pub fn player() -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_retain(Self::Player as u32),
            Group::from_bits_retain(
                Self::Environment as u32 | Self::Enemy as u32 | Self::EnemyProjectile as u32,
            ),
        )
    }

    /// Membership/filter pair for enemy ships.
    pub fn enemy() -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_retain(Self::Enemy as u32),
            Group::from_bits_retain(
                Self::Environment as u32
                    | Self::Player as u32
                    | Self::PlayerProjectile as u32
                    | Self::Enemy as u32,
            ),
        )
    }
}

/// Bitmask of collision layers a projectile passes through.
///
/// A sweep tests against every layer *not* in the mask, so a player bullet
/// carries `LayerMask::from(CollisionGroup::Player)` to ignore its shooter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Ignore nothing: the sweep hits every layer.
    pub const NONE: Self = Self(0);
    /// Ignore everything: the sweep never hits.
    pub const ALL: Self = Self(u32::MAX);

    pub fn contains(self, group: CollisionGroup) -> bool {
        self.0 & group as u32 != 0
    }

    /// Interaction groups for a scene query honouring this mask.
    pub fn query_groups(self) -> InteractionGroups {
        InteractionGroups::new(Group::ALL, Group::from_bits_retain(!self.0))
    }
}

impl From<CollisionGroup> for LayerMask {
    fn from(group: CollisionGroup) -> Self {
        Self(group as u32)
    }
}

impl BitOr for LayerMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<CollisionGroup> for LayerMask {
    type Output = Self;

    fn bitor(self, rhs: CollisionGroup) -> Self {
        Self(self.0 | rhs as u32)
    }
}
