//! Error types for the projectile pipeline.

use thiserror::Error;

use crate::append::CapacityExceeded;
use crate::visual::LoadError;

/// Everything that can go wrong while spawning or ticking projectiles.
///
/// Per-projectile conditions (expiry, hits, duplicate removals) are handled
/// inside the tick and never show up here.
#[derive(Debug, Error)]
pub enum BulletError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Capacity(#[from] CapacityExceeded),

    #[error("query engine returned {got} results for {expected} queries")]
    BatchMismatch { expected: usize, got: usize },

    #[error("invalid bullet settings: {0}")]
    Settings(#[from] ron::error::SpannedError),

    #[error("could not serialize bullet settings: {0}")]
    Serialize(#[from] ron::Error),

    #[error("could not access bullet settings: {0}")]
    Io(#[from] std::io::Error),
}
