//! High-volume projectile simulation.
//!
//! Projectiles live in dense parallel arrays, move in data-parallel stages,
//! submit one batched swept-sphere query each per tick, and are removed with
//! order-safe swap-back. Their visuals are recycled through a per-prefab pool.

pub mod accumulator;
pub mod append;
pub mod config;
pub mod error;
pub mod movement;
pub mod pool;
pub mod pose_sync;
pub mod projectile;
pub mod removal;
pub mod response;
pub mod scene;
pub mod store;
pub mod system;
pub mod visual;

pub use accumulator::{CastBatch, CastEntry, CollisionAccumulator};
pub use append::{AppendBuffer, CapacityExceeded, ParallelWriter};
pub use config::BulletSettings;
pub use error::BulletError;
pub use pool::{PoolStats, VisualPool};
pub use projectile::{Projectile, ProjectileConfig};
pub use removal::RemovalQueue;
pub use scene::{PrefabTemplate, SceneGraph};
pub use store::{BulletStore, RetiredVisual};
pub use system::{BulletSystem, TickReport};
pub use visual::{LoadError, PoseSink, PrefabRef, ResourceLoader, VisualHandle};
