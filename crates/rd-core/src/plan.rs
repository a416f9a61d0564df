//! The placement state store: the authoritative list of furniture
//! instances in one room, plus the room shell and the current selection.
//!
//! Instances live in a generational arena. Handles carry a generation
//! counter, so a handle to a removed instance is *detected* as stale
//! rather than silently pointing at whatever reused the slot. This is
//! what keeps the selection stable when an unrelated instance is removed.
//!
//! One `RoomPlan` per designer session; a single logical writer (the
//! local user), all mutations synchronous and applied in event order.

use crate::catalog::Catalog;
use crate::error::PlanError;
use crate::id::ProductId;
use crate::model::{FurnitureInstance, InstancePatch, RoomConfig, RoomConfigPatch};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Generation-checked handle to a placed instance.
///
/// Copyable and cheap; never dereferenced without a liveness check.
/// Serializable so snapshots can cross a process or WASM boundary, but
/// plan documents never persist handles — they are session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId {
    slot: u32,
    generation: u32,
}

/// One arena slot. The generation bumps on every removal, invalidating
/// all outstanding handles to the old occupant.
#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    occupant: Option<FurnitureInstance>,
}

/// The placement state store.
#[derive(Debug, Clone, Default)]
pub struct RoomPlan {
    slots: Vec<Slot>,
    /// Free slot indices available for reuse.
    free: Vec<u32>,
    /// Live handles in insertion order — this is the listing the
    /// presenter renders and the order persistence preserves.
    order: Vec<InstanceId>,
    config: RoomConfig,
    selected: Option<InstanceId>,
}

impl RoomPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RoomConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // ─── Instances ───────────────────────────────────────────────────

    /// Place a catalog product with the default transform (origin,
    /// unrotated, unit scale, no tint). Fails with `NotFound` and leaves
    /// the plan untouched when the product is not in the catalog.
    pub fn add_instance(
        &mut self,
        catalog: &Catalog,
        product: ProductId,
    ) -> Result<InstanceId, PlanError> {
        if !catalog.contains(product) {
            warn!("add rejected: {product} is not in the catalog");
            return Err(PlanError::NotFound(product));
        }
        let id = self.insert(FurnitureInstance::new(product));
        debug!("placed {product} as {id:?}");
        Ok(id)
    }

    /// Re-add a previously removed instance with its full transform
    /// (undo path). Returns the fresh handle — the old one stays stale.
    pub fn restore_instance(&mut self, instance: FurnitureInstance) -> InstanceId {
        let id = self.insert(instance);
        debug!("restored instance as {id:?}");
        id
    }

    fn insert(&mut self, instance: FurnitureInstance) -> InstanceId {
        let id = match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.slots[slot as usize];
                entry.occupant = Some(instance);
                InstanceId {
                    slot,
                    generation: entry.generation,
                }
            }
            None => {
                let slot = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    occupant: Some(instance),
                });
                InstanceId {
                    slot,
                    generation: 0,
                }
            }
        };
        self.order.push(id);
        id
    }

    /// Remove an instance, returning its final state. Clears the
    /// selection when the removed instance was selected; any other
    /// selection survives untouched.
    pub fn remove_instance(&mut self, id: InstanceId) -> Result<FurnitureInstance, PlanError> {
        let entry = self
            .slots
            .get_mut(id.slot as usize)
            .filter(|entry| entry.generation == id.generation)
            .ok_or(PlanError::StaleHandle(id))?;
        let instance = entry.occupant.take().ok_or(PlanError::StaleHandle(id))?;

        entry.generation += 1;
        self.free.push(id.slot);
        self.order.retain(|&live| live != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        debug!("removed {id:?} ({})", instance.product);
        Ok(instance)
    }

    /// Apply a partial update to one instance. All other instances are
    /// unaffected.
    pub fn update_instance(&mut self, id: InstanceId, patch: &InstancePatch) -> Result<(), PlanError> {
        let instance = self.get_mut(id).ok_or(PlanError::StaleHandle(id))?;
        patch.apply(instance);
        Ok(())
    }

    pub fn get(&self, id: InstanceId) -> Option<&FurnitureInstance> {
        self.slots
            .get(id.slot as usize)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.occupant.as_ref())
    }

    fn get_mut(&mut self, id: InstanceId) -> Option<&mut FurnitureInstance> {
        self.slots
            .get_mut(id.slot as usize)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.occupant.as_mut())
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    /// Live instances in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &FurnitureInstance)> {
        self.order.iter().filter_map(|&id| {
            self.get(id).map(|instance| (id, instance))
        })
    }

    /// Handle of the most recently placed live instance.
    pub fn newest(&self) -> Option<InstanceId> {
        self.order.last().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ─── Selection ───────────────────────────────────────────────────

    /// Select one instance. At most one instance is selected at a time;
    /// selecting replaces any previous selection directly.
    pub fn select(&mut self, id: InstanceId) -> Result<(), PlanError> {
        if !self.contains(id) {
            return Err(PlanError::StaleHandle(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Currently selected instance, if its handle is still live.
    /// A selection invalidated by removal reads back as `None`.
    pub fn selected(&self) -> Option<InstanceId> {
        self.selected.filter(|&id| self.contains(id))
    }

    // ─── Room shell ──────────────────────────────────────────────────

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    /// Merge a partial room update. Dimensions clamp to their valid
    /// range; this never fails.
    pub fn set_room_config(&mut self, patch: &RoomConfigPatch) {
        patch.apply(&mut self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vec3;
    use pretty_assertions::assert_eq;

    fn plan_with(n: usize) -> (RoomPlan, Catalog, Vec<InstanceId>) {
        let catalog = Catalog::builtin();
        let sofa = ProductId::intern("yellow_sofa");
        let mut plan = RoomPlan::new();
        let ids = (0..n)
            .map(|_| plan.add_instance(&catalog, sofa).unwrap())
            .collect();
        (plan, catalog, ids)
    }

    #[test]
    fn add_requires_known_product() {
        let catalog = Catalog::builtin();
        let mut plan = RoomPlan::new();

        let bogus = ProductId::intern("hover_board");
        assert_eq!(
            plan.add_instance(&catalog, bogus),
            Err(PlanError::NotFound(bogus))
        );
        assert!(plan.is_empty());

        plan.add_instance(&catalog, ProductId::intern("love_seat"))
            .unwrap();
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn new_instances_use_default_transform() {
        let (plan, _, ids) = plan_with(1);
        let inst = plan.get(ids[0]).unwrap();
        assert_eq!(inst.position, Vec3::ZERO);
        assert_eq!(inst.rotation, Vec3::ZERO);
        assert_eq!(inst.scale, 1.0);
        assert!(inst.color_override.is_none());
    }

    #[test]
    fn removing_selected_clears_selection() {
        let (mut plan, _, ids) = plan_with(2);
        plan.select(ids[0]).unwrap();
        plan.remove_instance(ids[0]).unwrap();
        assert_eq!(plan.selected(), None);
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn removing_other_instance_keeps_selection() {
        let (mut plan, _, ids) = plan_with(3);
        plan.select(ids[2]).unwrap();
        plan.remove_instance(ids[0]).unwrap();
        // The handle still refers to the same logical instance.
        assert_eq!(plan.selected(), Some(ids[2]));
        assert!(plan.get(ids[2]).is_some());
    }

    #[test]
    fn stale_handles_are_rejected_not_retargeted() {
        let (mut plan, catalog, ids) = plan_with(1);
        plan.remove_instance(ids[0]).unwrap();

        // The slot gets reused, but the old handle must stay dead.
        let replacement = plan
            .add_instance(&catalog, ProductId::intern("storage_bed"))
            .unwrap();
        assert_eq!(replacement.slot, ids[0].slot);
        assert!(plan.get(ids[0]).is_none());
        assert_eq!(
            plan.remove_instance(ids[0]),
            Err(PlanError::StaleHandle(ids[0]))
        );
        assert_eq!(plan.select(ids[0]), Err(PlanError::StaleHandle(ids[0])));
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn update_touches_exactly_one_instance() {
        let (mut plan, _, ids) = plan_with(2);
        plan.update_instance(
            ids[0],
            &InstancePatch {
                position: Some(Vec3::new(0.3, 0.0, 0.0)),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(plan.get(ids[0]).unwrap().position, Vec3::new(0.3, 0.0, 0.0));
        assert_eq!(plan.get(ids[1]).unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn iteration_keeps_insertion_order_across_removals() {
        let catalog = Catalog::builtin();
        let mut plan = RoomPlan::new();
        let a = plan
            .add_instance(&catalog, ProductId::intern("yellow_sofa"))
            .unwrap();
        let b = plan
            .add_instance(&catalog, ProductId::intern("love_seat"))
            .unwrap();
        plan.remove_instance(a).unwrap();
        let c = plan
            .add_instance(&catalog, ProductId::intern("storage_bed"))
            .unwrap();

        let listed: Vec<_> = plan.iter().map(|(id, _)| id).collect();
        assert_eq!(listed, vec![b, c]);
        assert_eq!(plan.newest(), Some(c));
    }

    #[test]
    fn room_config_merges_with_clamping() {
        let mut plan = RoomPlan::new();
        plan.set_room_config(&RoomConfigPatch {
            width: Some(99.0),
            ..Default::default()
        });
        assert_eq!(plan.config().width, 10.0);
        // Untouched fields keep their defaults.
        assert_eq!(plan.config().length, 8.0);
    }
}
