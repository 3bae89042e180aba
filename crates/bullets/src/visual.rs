//! Interfaces to whatever owns the visual side of a projectile.

use engine_core::{Quat, Vec3};
use hecs::Entity;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A visual representation of one projectile. Lives as an entity in the scene world.
pub type VisualHandle = Entity;

/// Key of a visual prefab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrefabRef(pub u32);

impl fmt::Display for PrefabRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prefab#{}", self.0)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("{0} is not registered")]
    UnknownPrefab(PrefabRef),
}

/// Loads prefab templates and creates visuals from them.
pub trait ResourceLoader {
    type Template;

    fn load(&mut self, prefab: PrefabRef) -> Result<Self::Template, LoadError>;

    fn instantiate(&mut self, template: &Self::Template, parent: Option<VisualHandle>) -> VisualHandle;

    /// Show or hide a visual. Pooled visuals are hidden, never destroyed.
    fn set_active(&mut self, handle: VisualHandle, active: bool);
}

/// Receives simulated poses. Called concurrently, at most once per handle per tick.
pub trait PoseSink: Sync {
    fn set_pose(&self, handle: VisualHandle, position: Vec3, rotation: Quat);
}
