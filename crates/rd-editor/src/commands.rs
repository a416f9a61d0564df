//! Undo/Redo command stack.
//!
//! Every mutation is wrapped in a reversible `Command`: the inverse is
//! computed against the plan state just before the forward mutation is
//! applied. Undo pops and applies the inverse; a new action clears the
//! redo stack.
//!
//! Undoing a removal (and redoing a placement) re-inserts the instance
//! under a fresh handle, so both stacks are rewritten to the fresh
//! handle whenever that happens — recorded history always targets live
//! instances.
//!
//! Escape is not undo: ending an editing session discards nothing, so
//! it never touches this stack.

use crate::mutation::{PlanMutation, apply_mutation, compute_inverse};
use log::warn;
use rd_core::{Catalog, InstanceId, PlanError, RoomPlan};

/// A mutation paired with its precomputed inverse.
#[derive(Debug, Clone)]
pub struct Command {
    forward: PlanMutation,
    inverse: PlanMutation,
    /// Handle allocated by the forward mutation, when it placed an
    /// instance. Replaying the forward allocates a different one, and
    /// stacked commands that captured the original must follow.
    created: Option<InstanceId>,
    description: String,
}

/// Manages undo/redo stacks over plan mutations.
pub struct CommandStack {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    /// Maximum undo depth; the oldest entry is trimmed beyond it.
    max_depth: usize,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Apply a mutation and push it to the undo stack. A failed
    /// application pushes nothing and leaves both stacks untouched.
    pub fn execute(
        &mut self,
        plan: &mut RoomPlan,
        catalog: &Catalog,
        mutation: PlanMutation,
        description: &str,
    ) -> Result<(), PlanError> {
        let inverse = compute_inverse(plan, &mutation);
        apply_mutation(plan, catalog, &mutation)?;
        let created = match &mutation {
            PlanMutation::Add { .. } | PlanMutation::Restore { .. } => plan.newest(),
            _ => None,
        };

        self.undo_stack.push(Command {
            forward: mutation,
            inverse,
            created,
            description: description.to_string(),
        });
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }

        // A new action invalidates the redo history.
        self.redo_stack.clear();
        Ok(())
    }

    /// Undo the last command. Returns its description, or `None` when
    /// there is nothing to undo.
    pub fn undo(&mut self, plan: &mut RoomPlan, catalog: &Catalog) -> Option<String> {
        let mut cmd = self.undo_stack.pop()?;
        if let Err(err) = apply_mutation(plan, catalog, &cmd.inverse) {
            // A dead entry; dropping it keeps the rest of the history
            // consistent with the plan.
            warn!("undo of `{}` dropped: {err}", cmd.description);
            return Some(cmd.description);
        }
        if matches!(cmd.inverse, PlanMutation::Restore { .. })
            && let (Some(old), Some(fresh)) = (cmd.forward.target(), plan.newest())
        {
            // The instance came back under a fresh handle; rewrite every
            // recorded reference to the dead one.
            cmd.forward.retarget(old, fresh);
            self.remap(old, fresh);
        }
        let description = cmd.description.clone();
        self.redo_stack.push(cmd);
        Some(description)
    }

    /// Redo the last undone command. Returns its description.
    pub fn redo(&mut self, plan: &mut RoomPlan, catalog: &Catalog) -> Option<String> {
        let mut cmd = self.redo_stack.pop()?;
        if let Err(err) = apply_mutation(plan, catalog, &cmd.forward) {
            warn!("redo of `{}` dropped: {err}", cmd.description);
            return Some(cmd.description);
        }
        if let Some(old) = cmd.created
            && let Some(fresh) = plan.newest()
            && old != fresh
        {
            // Re-placing allocated a fresh handle.
            cmd.created = Some(fresh);
            self.remap(old, fresh);
        }
        let description = cmd.description.clone();
        self.undo_stack.push(cmd);
        Some(description)
    }

    /// Rewrite every stacked reference to a handle that went stale and
    /// came back as `fresh`.
    fn remap(&mut self, old: InstanceId, fresh: InstanceId) {
        for cmd in self.undo_stack.iter_mut().chain(self.redo_stack.iter_mut()) {
            cmd.forward.retarget(old, fresh);
            cmd.inverse.retarget(old, fresh);
            if cmd.created == Some(old) {
                cmd.created = Some(fresh);
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rd_core::{ProductId, Vec3};

    fn setup() -> (RoomPlan, Catalog, rd_core::InstanceId, CommandStack) {
        let catalog = Catalog::builtin();
        let mut plan = RoomPlan::new();
        let id = plan
            .add_instance(&catalog, ProductId::intern("yellow_sofa"))
            .unwrap();
        (plan, catalog, id, CommandStack::new(100))
    }

    #[test]
    fn undo_redo_translate() {
        let (mut plan, catalog, id, mut stack) = setup();
        stack
            .execute(
                &mut plan,
                &catalog,
                PlanMutation::Translate {
                    id,
                    delta: Vec3::new(0.1, 0.0, 0.0),
                },
                "move right",
            )
            .unwrap();

        assert_eq!(stack.undo(&mut plan, &catalog), Some("move right".into()));
        assert!(plan.get(id).unwrap().position.approx_eq(Vec3::ZERO, 1e-6));

        assert_eq!(stack.redo(&mut plan, &catalog), Some("move right".into()));
        assert!(
            plan.get(id)
                .unwrap()
                .position
                .approx_eq(Vec3::new(0.1, 0.0, 0.0), 1e-6)
        );
    }

    #[test]
    fn redo_clears_on_new_action() {
        let (mut plan, catalog, id, mut stack) = setup();
        let step = |d| PlanMutation::Translate {
            id,
            delta: Vec3::new(d, 0.0, 0.0),
        };

        stack.execute(&mut plan, &catalog, step(0.1), "move").unwrap();
        stack.undo(&mut plan, &catalog);
        assert!(stack.can_redo());

        stack.execute(&mut plan, &catalog, step(0.2), "move2").unwrap();
        assert!(!stack.can_redo());
    }

    #[test]
    fn max_depth_trims_oldest() {
        let (mut plan, catalog, id, _) = setup();
        let mut stack = CommandStack::new(3);
        for _ in 0..5 {
            stack
                .execute(
                    &mut plan,
                    &catalog,
                    PlanMutation::Translate {
                        id,
                        delta: Vec3::new(0.1, 0.0, 0.0),
                    },
                    "move",
                )
                .unwrap();
        }
        let mut undo_count = 0;
        while stack.undo(&mut plan, &catalog).is_some() {
            undo_count += 1;
        }
        assert_eq!(undo_count, 3);
    }

    #[test]
    fn failed_execute_pushes_nothing() {
        let (mut plan, catalog, id, mut stack) = setup();
        plan.remove_instance(id).unwrap();

        let result = stack.execute(
            &mut plan,
            &catalog,
            PlanMutation::Translate {
                id,
                delta: Vec3::new(0.1, 0.0, 0.0),
            },
            "move stale",
        );
        assert!(result.is_err());
        assert!(!stack.can_undo());
    }

    #[test]
    fn delete_undo_redo_undo_keeps_one_instance() {
        let (mut plan, catalog, id, mut stack) = setup();
        stack
            .execute(&mut plan, &catalog, PlanMutation::Remove { id }, "delete")
            .unwrap();

        stack.undo(&mut plan, &catalog);
        assert_eq!(plan.len(), 1);

        // Redo must remove the restored instance, not miss on the dead
        // handle.
        assert_eq!(stack.redo(&mut plan, &catalog), Some("delete".into()));
        assert!(plan.is_empty());

        stack.undo(&mut plan, &catalog);
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn undo_reaches_through_a_delete_undo() {
        let (mut plan, catalog, id, mut stack) = setup();
        stack
            .execute(
                &mut plan,
                &catalog,
                PlanMutation::Translate {
                    id,
                    delta: Vec3::new(0.1, 0.0, 0.0),
                },
                "move",
            )
            .unwrap();
        stack
            .execute(&mut plan, &catalog, PlanMutation::Remove { id }, "delete")
            .unwrap();

        stack.undo(&mut plan, &catalog);
        // The translate recorded before the delete now applies to the
        // restored instance.
        stack.undo(&mut plan, &catalog);
        let (_, inst) = plan.iter().next().unwrap();
        assert!(inst.position.approx_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn redo_of_add_retargets_later_commands() {
        let catalog = Catalog::builtin();
        let mut plan = RoomPlan::new();
        let mut stack = CommandStack::new(100);
        stack
            .execute(
                &mut plan,
                &catalog,
                PlanMutation::Add {
                    product: ProductId::intern("yellow_sofa"),
                },
                "add",
            )
            .unwrap();
        let id = plan.newest().unwrap();
        stack
            .execute(
                &mut plan,
                &catalog,
                PlanMutation::Translate {
                    id,
                    delta: Vec3::new(0.1, 0.0, 0.0),
                },
                "move",
            )
            .unwrap();

        stack.undo(&mut plan, &catalog);
        stack.undo(&mut plan, &catalog);
        assert!(plan.is_empty());

        // Redo of the add allocates a new handle; the replayed move
        // must land on it.
        stack.redo(&mut plan, &catalog);
        assert_eq!(stack.redo(&mut plan, &catalog), Some("move".into()));
        let (_, inst) = plan.iter().next().unwrap();
        assert!(inst.position.approx_eq(Vec3::new(0.1, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn remove_undo_restores_instance() {
        let (mut plan, catalog, id, mut stack) = setup();
        stack
            .execute(&mut plan, &catalog, PlanMutation::Remove { id }, "delete")
            .unwrap();
        assert!(plan.is_empty());

        stack.undo(&mut plan, &catalog);
        assert_eq!(plan.len(), 1);
        let (_, restored) = plan.iter().next().unwrap();
        assert_eq!(restored.product, ProductId::intern("yellow_sofa"));
    }
}
