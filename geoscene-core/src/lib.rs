//! Core data structures for geoscene
//!
//! This crate provides the fundamental types shared by the geoscene
//! visualization pipeline: scene time, colors, triangle geometry and the
//! common error type.

pub mod color;
pub mod error;
pub mod geometry;
pub mod point;
pub mod time;

pub use color::*;
pub use error::*;
pub use geometry::*;
pub use point::*;
pub use time::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Common result type for geoscene operations
pub type Result<T> = std::result::Result<T, Error>;
