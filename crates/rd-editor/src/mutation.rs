//! The mutation command set for the placement store.
//!
//! Every user intent that changes the plan goes through one
//! `PlanMutation`. Applications are synchronous and applied in event
//! order; a failed application leaves the plan untouched.

use rd_core::{
    Catalog, Color, FurnitureInstance, InstanceId, InstancePatch, PlanError, ProductId, RoomConfig,
    RoomConfigPatch, RoomPlan, Vec3,
};

/// One atomic change to a `RoomPlan`.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanMutation {
    /// Place a catalog product with the default transform.
    Add { product: ProductId },
    /// Re-add a removed instance with its full transform (undo path).
    Restore { instance: Box<FurnitureInstance> },
    /// Remove an instance; clears the selection if it was selected.
    Remove { id: InstanceId },
    /// Remove the most recently placed instance (inverse of `Add`).
    RemoveNewest,
    /// Move by a delta, meters.
    Translate { id: InstanceId, delta: Vec3 },
    /// Move to an absolute position (snap placement).
    PlaceAt { id: InstanceId, position: Vec3 },
    /// Rotate by a delta, radians.
    Rotate { id: InstanceId, delta: Vec3 },
    SetScale { id: InstanceId, scale: f32 },
    /// `None` clears the color override.
    SetColor { id: InstanceId, color: Option<Color> },
    /// Merge a room-shell patch (dimensions clamp).
    SetRoom { patch: RoomConfigPatch },
}

impl PlanMutation {
    /// The instance handle this mutation targets, if any.
    pub fn target(&self) -> Option<InstanceId> {
        match self {
            PlanMutation::Remove { id }
            | PlanMutation::Translate { id, .. }
            | PlanMutation::PlaceAt { id, .. }
            | PlanMutation::Rotate { id, .. }
            | PlanMutation::SetScale { id, .. }
            | PlanMutation::SetColor { id, .. } => Some(*id),
            PlanMutation::Add { .. }
            | PlanMutation::Restore { .. }
            | PlanMutation::RemoveNewest
            | PlanMutation::SetRoom { .. } => None,
        }
    }

    /// Rewrite a reference to `old` to point at `fresh`. Recorded
    /// mutations need this when their instance re-enters the plan under
    /// a new handle and the old one has gone stale.
    pub fn retarget(&mut self, old: InstanceId, fresh: InstanceId) {
        match self {
            PlanMutation::Remove { id }
            | PlanMutation::Translate { id, .. }
            | PlanMutation::PlaceAt { id, .. }
            | PlanMutation::Rotate { id, .. }
            | PlanMutation::SetScale { id, .. }
            | PlanMutation::SetColor { id, .. } => {
                if *id == old {
                    *id = fresh;
                }
            }
            PlanMutation::Add { .. }
            | PlanMutation::Restore { .. }
            | PlanMutation::RemoveNewest
            | PlanMutation::SetRoom { .. } => {}
        }
    }
}

/// Apply one mutation to the plan. Errors are local: a stale handle or
/// unknown product leaves every instance exactly as it was.
pub fn apply_mutation(
    plan: &mut RoomPlan,
    catalog: &Catalog,
    mutation: &PlanMutation,
) -> Result<(), PlanError> {
    match mutation {
        PlanMutation::Add { product } => {
            plan.add_instance(catalog, *product)?;
        }
        PlanMutation::Restore { instance } => {
            plan.restore_instance((**instance).clone());
        }
        PlanMutation::Remove { id } => {
            plan.remove_instance(*id)?;
        }
        PlanMutation::RemoveNewest => {
            if let Some(id) = plan.newest() {
                plan.remove_instance(id)?;
            }
        }
        PlanMutation::Translate { id, delta } => {
            let position = plan.get(*id).ok_or(PlanError::StaleHandle(*id))?.position;
            plan.update_instance(
                *id,
                &InstancePatch {
                    position: Some(position.add(*delta)),
                    ..Default::default()
                },
            )?;
        }
        PlanMutation::PlaceAt { id, position } => {
            plan.update_instance(
                *id,
                &InstancePatch {
                    position: Some(*position),
                    ..Default::default()
                },
            )?;
        }
        PlanMutation::Rotate { id, delta } => {
            let rotation = plan.get(*id).ok_or(PlanError::StaleHandle(*id))?.rotation;
            plan.update_instance(
                *id,
                &InstancePatch {
                    rotation: Some(rotation.add(*delta)),
                    ..Default::default()
                },
            )?;
        }
        PlanMutation::SetScale { id, scale } => {
            plan.update_instance(
                *id,
                &InstancePatch {
                    scale: Some(*scale),
                    ..Default::default()
                },
            )?;
        }
        PlanMutation::SetColor { id, color } => {
            plan.update_instance(
                *id,
                &InstancePatch {
                    color_override: Some(*color),
                    ..Default::default()
                },
            )?;
        }
        PlanMutation::SetRoom { patch } => {
            plan.set_room_config(patch);
        }
    }
    Ok(())
}

/// Compute the mutation that undoes `mutation`, against the plan state
/// *before* the mutation is applied.
///
/// Removal inverses restore the instance under a fresh handle. Anyone
/// replaying recorded mutations afterwards must [`retarget`] the ones
/// still naming the dead handle — `CommandStack` does this for both of
/// its stacks.
///
/// [`retarget`]: PlanMutation::retarget
pub fn compute_inverse(plan: &RoomPlan, mutation: &PlanMutation) -> PlanMutation {
    match mutation {
        PlanMutation::Add { .. } | PlanMutation::Restore { .. } => PlanMutation::RemoveNewest,
        PlanMutation::Remove { id } => match plan.get(*id) {
            Some(instance) => PlanMutation::Restore {
                instance: Box::new(instance.clone()),
            },
            None => PlanMutation::Remove { id: *id },
        },
        PlanMutation::RemoveNewest => match plan.newest().and_then(|id| plan.get(id)) {
            Some(instance) => PlanMutation::Restore {
                instance: Box::new(instance.clone()),
            },
            None => PlanMutation::RemoveNewest,
        },
        PlanMutation::Translate { id, delta } => PlanMutation::Translate {
            id: *id,
            delta: delta.neg(),
        },
        PlanMutation::PlaceAt { id, position } => PlanMutation::PlaceAt {
            id: *id,
            position: plan
                .get(*id)
                .map(|inst| inst.position)
                .unwrap_or(*position),
        },
        PlanMutation::SetScale { id, scale } => PlanMutation::SetScale {
            id: *id,
            scale: plan.get(*id).map(|inst| inst.scale).unwrap_or(*scale),
        },
        PlanMutation::Rotate { id, delta } => PlanMutation::Rotate {
            id: *id,
            delta: delta.neg(),
        },
        PlanMutation::SetColor { id, .. } => PlanMutation::SetColor {
            id: *id,
            color: plan.get(*id).and_then(|inst| inst.color_override),
        },
        PlanMutation::SetRoom { patch } => PlanMutation::SetRoom {
            patch: room_inverse(plan.config(), patch),
        },
    }
}

fn room_inverse(config: &RoomConfig, patch: &RoomConfigPatch) -> RoomConfigPatch {
    RoomConfigPatch {
        width: patch.width.map(|_| config.width),
        length: patch.length.map(|_| config.length),
        height: patch.height.map(|_| config.height),
        wall_color: patch.wall_color.map(|_| config.wall_color),
        floor_finish: patch.floor_finish.map(|_| config.floor_finish),
    }
}
