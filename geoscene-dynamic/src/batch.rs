//! Material-keyed batching of geometry updaters
//!
//! Rebuilding a primitive costs time proportional to every vertex in the
//! batch, so rebuilds are triggered only by membership changes. Per-frame
//! material and visibility changes are patched onto the live primitive
//! instead.

use crate::material_property::{sample_material, MaterialPropertyRef};
use crate::updater::UpdaterRef;
use geoscene_core::SceneTime;
use geoscene_primitives::{
    AppearanceKind, GeometryInstance, Material, Primitive, PrimitiveCollection, PrimitiveKey,
};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

struct BatchEntry {
    updater: UpdaterRef,
    instance: GeometryInstance,
}

/// One GPU primitive plus the updaters sharing one material.
///
/// Membership changes mark the batch dirty; the next `update` detaches the
/// old primitive and bakes a new one from the current instances. A clean
/// `update` only resamples the appearance material and patches per-instance
/// show attributes.
pub struct MaterialBatch {
    material_property: Option<MaterialPropertyRef>,
    entries: Vec<BatchEntry>,
    create_primitive: bool,
    primitive: Option<PrimitiveKey>,
    primitives: Rc<RefCell<PrimitiveCollection>>,
    default_material: Material,
    appearance_kind: AppearanceKind,
}

impl MaterialBatch {
    /// Create a batch seeded with one updater; its material property
    /// becomes the batch's representative
    fn new(
        primitives: Rc<RefCell<PrimitiveCollection>>,
        appearance_kind: AppearanceKind,
        updater: UpdaterRef,
    ) -> Self {
        let material_property = updater.borrow().material_property().cloned();
        let mut batch = Self {
            material_property,
            entries: Vec::new(),
            create_primitive: true,
            primitive: None,
            primitives,
            default_material: Material::default(),
            appearance_kind,
        };
        batch.add(updater);
        batch
    }

    /// Whether `updater` renders with this batch's material: reference
    /// identity, or the representative's semantic equality. A batch with
    /// no representative only accepts updaters that also have none.
    pub fn is_material(&self, updater: &UpdaterRef) -> bool {
        let updater = updater.borrow();
        match (self.material_property.as_ref(), updater.material_property()) {
            (None, None) => true,
            (Some(mine), Some(theirs)) => {
                Rc::ptr_eq(mine, theirs) || mine.equals(theirs.as_ref())
            }
            _ => false,
        }
    }

    /// Insert the updater and its freshly built geometry instance. The
    /// primitive rebuild is deferred to the next `update`.
    pub fn add(&mut self, updater: UpdaterRef) {
        let instance = updater.borrow().create_geometry_instance();
        self.entries.push(BatchEntry { updater, instance });
        self.create_primitive = true;
    }

    /// Remove the updater with the given id, marking the batch dirty iff
    /// it was a member. Returns whether removal occurred.
    pub fn remove(&mut self, updater: &UpdaterRef) -> bool {
        let target = updater.borrow();
        let id = target.id();
        let before = self.entries.len();
        self.entries.retain(|entry| entry.updater.borrow().id() != id);
        let removed = self.entries.len() != before;
        if removed {
            self.create_primitive = true;
        }
        removed
    }

    /// Per-frame update: rebuild the primitive when membership changed,
    /// otherwise patch the appearance material and show attributes in place.
    pub fn update(&mut self, time: SceneTime) {
        let mut primitives = self.primitives.borrow_mut();
        if self.create_primitive {
            if let Some(key) = self.primitive.take() {
                primitives.remove(key);
            }
            if !self.entries.is_empty() {
                let material = sample_material(
                    time,
                    self.material_property.as_deref(),
                    &self.default_material,
                );
                let instances: Vec<GeometryInstance> =
                    self.entries.iter().map(|entry| entry.instance.clone()).collect();
                debug!("rebuilding batch primitive with {} instances", instances.len());
                let primitive = Primitive::new(&instances, self.appearance_kind.appearance(material));
                // cached attribute indices refer to the detached primitive
                for entry in &self.entries {
                    entry.updater.borrow_mut().set_attributes(None);
                }
                self.primitive = Some(primitives.add(primitive));
            }
            self.create_primitive = false;
        } else if let Some(key) = self.primitive {
            let primitive = primitives
                .get_mut(key)
                .expect("batch primitive missing from shared collection");
            primitive.appearance_mut().material = sample_material(
                time,
                self.material_property.as_deref(),
                &self.default_material,
            );
            for entry in &self.entries {
                let mut updater = entry.updater.borrow_mut();
                let index = match updater.attributes() {
                    Some(index) => index,
                    None => {
                        let index = primitive
                            .attribute_index(entry.instance.id())
                            .expect("geometry instance id unknown to its primitive");
                        updater.set_attributes(Some(index));
                        index
                    }
                };
                if let Some(show) = updater.show_property() {
                    if let Some(visible) = show.sample(time) {
                        primitive.attributes_mut(index).show = visible;
                    }
                }
            }
        }
    }

    /// Detach the primitive, if any, from the shared collection. Membership
    /// is left for the caller to discard.
    pub fn destroy(&mut self) {
        if let Some(key) = self.primitive.take() {
            self.primitives.borrow_mut().remove(key);
        }
    }

    /// Number of member updaters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the updater with the given id is a member
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.updater.borrow().id() == id)
    }

    /// Handle of the batch's live primitive, if one exists
    pub fn primitive_key(&self) -> Option<PrimitiveKey> {
        self.primitive
    }
}

/// Partition of all live updaters into material-homogeneous batches.
///
/// Batches are kept in insertion order and adds are first-match-wins, so
/// structurally equal batches are never merged. A batch whose last member
/// is removed stays in the list as an empty no-op; compaction would change
/// the first-match ordering, so it is deliberately not done here.
pub struct PerMaterialBatchSet {
    batches: Vec<MaterialBatch>,
    primitives: Rc<RefCell<PrimitiveCollection>>,
    appearance_kind: AppearanceKind,
}

impl PerMaterialBatchSet {
    pub fn new(
        primitives: Rc<RefCell<PrimitiveCollection>>,
        appearance_kind: AppearanceKind,
    ) -> Self {
        Self {
            batches: Vec::new(),
            primitives,
            appearance_kind,
        }
    }

    /// Route the updater to the first batch sharing its material, or
    /// append a new batch for it
    pub fn add(&mut self, updater: UpdaterRef) {
        if let Some(batch) = self
            .batches
            .iter_mut()
            .find(|batch| batch.is_material(&updater))
        {
            batch.add(updater);
        } else {
            self.batches.push(MaterialBatch::new(
                self.primitives.clone(),
                self.appearance_kind,
                updater,
            ));
        }
    }

    /// Remove the updater from whichever batch holds it; a silent no-op
    /// when no batch does. An updater is unique to one batch, so the scan
    /// stops at the first successful removal.
    pub fn remove(&mut self, updater: &UpdaterRef) {
        for batch in self.batches.iter_mut().rev() {
            if batch.remove(updater) {
                break;
            }
        }
    }

    /// Update every batch in list order, empty ones included
    pub fn update(&mut self, time: SceneTime) {
        for batch in &mut self.batches {
            batch.update(time);
        }
    }

    /// Destroy every batch and clear the list entirely
    pub fn remove_all_primitives(&mut self) {
        for batch in &mut self.batches {
            batch.destroy();
        }
        self.batches.clear();
    }

    /// The current batches, in insertion order
    pub fn batches(&self) -> &[MaterialBatch] {
        &self.batches
    }
}
