//! Primitive, appearance and material layer for geoscene
//!
//! This crate models the renderer-facing half of the pipeline: materials
//! and appearances, immutable geometry instances, primitives baked from
//! groups of instances, and the shared collection primitives live in while
//! they are drawable.

pub mod appearance;
pub mod collection;
pub mod instance;
pub mod material;
pub mod primitive;

pub use appearance::*;
pub use collection::*;
pub use instance::*;
pub use material::*;
pub use primitive::*;
