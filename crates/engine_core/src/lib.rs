//! Core engine types and utilities shared by the simulation crates.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and GPU instance data
//! - Time management (wall clock and deterministic clock)

pub mod time;
pub mod transform;

pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec3};
pub use hecs::{Entity, World};
