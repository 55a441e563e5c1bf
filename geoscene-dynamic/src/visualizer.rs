//! Per-frame driver reconciling dynamic objects against batches

use crate::batch::PerMaterialBatchSet;
use crate::object::{DynamicObject, DynamicObjectCollection};
use crate::updater::UpdaterRef;
use geoscene_core::{Result, SceneTime};
use geoscene_primitives::{AppearanceKind, PrimitiveCollection};
use log::debug;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Builds an updater for an object when it exposes the geometry kind this
/// visualizer handles; `Ok(None)` when the object does not qualify.
pub type UpdaterFactory = fn(&DynamicObject, SceneTime) -> Result<Option<UpdaterRef>>;

struct TrackedUpdater {
    updater: UpdaterRef,
    revision: u64,
}

/// Observes a dynamic object collection and drives one batch set, once per
/// frame.
///
/// `update` first reconciles membership (new, vanished and redefined
/// objects), then runs the batch set, so a frame's adds and removes are
/// always applied before that frame's batch update.
pub struct GeometryVisualizer {
    objects: Rc<RefCell<DynamicObjectCollection>>,
    batches: PerMaterialBatchSet,
    factory: UpdaterFactory,
    tracked: HashMap<String, TrackedUpdater>,
}

impl GeometryVisualizer {
    pub fn new(
        primitives: Rc<RefCell<PrimitiveCollection>>,
        appearance_kind: AppearanceKind,
        objects: Rc<RefCell<DynamicObjectCollection>>,
        factory: UpdaterFactory,
    ) -> Self {
        Self {
            objects,
            batches: PerMaterialBatchSet::new(primitives, appearance_kind),
            factory,
            tracked: HashMap::new(),
        }
    }

    /// Reconcile updaters against the object collection, then update the
    /// batch set at `time`
    pub fn update(&mut self, time: SceneTime) -> Result<()> {
        let objects = self.objects.clone();
        let objects = objects.borrow();

        let mut seen = HashSet::with_capacity(objects.len());
        for object_ref in objects.iter() {
            let object = object_ref.borrow();
            seen.insert(object.id().to_owned());

            let existing = self
                .tracked
                .get(object.id())
                .map(|t| (t.updater.clone(), t.revision));
            match existing {
                Some((_, revision)) if revision == object.revision() => {}
                Some((updater, _)) => {
                    // definition changed since the updater was built
                    debug!("rebuilding updater for redefined object {}", object.id());
                    self.batches.remove(&updater);
                    self.tracked.remove(object.id());
                    self.track(&object, time)?;
                }
                None => {
                    self.track(&object, time)?;
                }
            }
        }

        let vanished: Vec<String> = self
            .tracked
            .keys()
            .filter(|id| !seen.contains(*id))
            .cloned()
            .collect();
        for id in vanished {
            debug!("dropping updater for removed object {}", id);
            if let Some(tracked) = self.tracked.remove(&id) {
                self.batches.remove(&tracked.updater);
            }
        }

        self.batches.update(time);
        Ok(())
    }

    fn track(&mut self, object: &DynamicObject, time: SceneTime) -> Result<()> {
        if let Some(updater) = (self.factory)(object, time)? {
            self.batches.add(updater.clone());
            self.tracked.insert(
                object.id().to_owned(),
                TrackedUpdater {
                    updater,
                    revision: object.revision(),
                },
            );
        }
        Ok(())
    }

    /// The batch set this visualizer drives
    pub fn batches(&self) -> &PerMaterialBatchSet {
        &self.batches
    }

    /// Detach everything this visualizer put into the primitive collection
    pub fn destroy(mut self) {
        self.batches.remove_all_primitives();
        self.tracked.clear();
    }
}
