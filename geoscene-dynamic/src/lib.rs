//! Time-dynamic objects, geometry batching and visualizers for geoscene
//!
//! This crate is the update pipeline between a collection of time-dynamic
//! scene objects and the primitives that draw them:
//! - time-varying properties ([`Property`], [`MaterialProperty`])
//! - the dynamic object data model ([`DynamicObject`] and friends)
//! - per-object updaters ([`GeometryUpdater`])
//! - material-keyed batching ([`MaterialBatch`], [`PerMaterialBatchSet`])
//! - the per-frame driver ([`GeometryVisualizer`])

pub mod batch;
pub mod material_property;
pub mod object;
pub mod property;
pub mod updater;
pub mod visualizer;

pub use batch::*;
pub use material_property::*;
pub use object::*;
pub use property::*;
pub use updater::*;
pub use visualizer::*;
