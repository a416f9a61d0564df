//! Selection and transform controller.
//!
//! A small two-state machine drives every interaction with placed
//! furniture: `Idle` (nothing selected, camera orbit active) and
//! `Editing` (one instance selected, transform keys live, camera orbit
//! suspended). Entering and leaving `Editing` never changes transforms;
//! only explicit mutations do.

use std::f32::consts::FRAC_PI_4;

use log::warn;
use rd_core::{Catalog, Color, InstanceId, PlanError, ProductId, RoomPlan, Vec3};

use crate::commands::CommandStack;
use crate::keymap::{EditorAction, Keymap};
use rd_scene::ViewerEvent;
use crate::mutation::PlanMutation;

/// Translation step per key press, meters.
pub const MOVE_STEP: f32 = 0.1;
/// Rotation step per key press, radians (45°).
pub const ROTATE_STEP: f32 = FRAC_PI_4;
/// Undo history depth.
const UNDO_DEPTH: usize = 100;

/// Color overrides offered while customizing.
pub const PALETTE: [Color; 4] = [
    Color::rgb(1.0, 1.0, 1.0),                        // white
    Color::rgb(139.0 / 255.0, 69.0 / 255.0, 19.0 / 255.0), // saddle brown
    Color::rgb(0.5, 0.5, 0.5),                        // gray
    Color::rgb(0.0, 0.0, 0.0),                        // black
];

/// What the controller is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Idle,
    /// One instance is selected for transform editing.
    Editing(InstanceId),
}

/// Drives selection and keyboard transforms over a `RoomPlan`.
pub struct PlacementController {
    mode: EditorMode,
    /// Whether the color palette panel is open for the selection.
    customizing: bool,
    commands: CommandStack,
}

impl Default for PlacementController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementController {
    pub fn new() -> Self {
        Self {
            mode: EditorMode::Idle,
            customizing: false,
            commands: CommandStack::new(UNDO_DEPTH),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn selected(&self) -> Option<InstanceId> {
        match self.mode {
            EditorMode::Idle => None,
            EditorMode::Editing(id) => Some(id),
        }
    }

    pub fn is_customizing(&self) -> bool {
        self.customizing
    }

    /// Orbit camera input is suspended for the whole editing session so
    /// transform keys never fight camera movement.
    pub fn camera_enabled(&self) -> bool {
        self.mode == EditorMode::Idle
    }

    /// Feed one presenter event through the state machine.
    pub fn handle_event(&mut self, plan: &mut RoomPlan, catalog: &Catalog, event: &ViewerEvent) {
        match event {
            ViewerEvent::InstancePicked(id) => self.pick_instance(plan, *id),
            ViewerEvent::BackgroundPicked => self.deselect(plan),
            ViewerEvent::SpotPicked(position) => self.place_at_spot(plan, catalog, *position),
            ViewerEvent::Key(input) => {
                if let Some(action) = Keymap::resolve(input) {
                    self.run_action(plan, catalog, action);
                }
            }
        }
    }

    /// Picking the already-selected instance toggles the selection off;
    /// picking another instance retargets the editing session.
    fn pick_instance(&mut self, plan: &mut RoomPlan, id: InstanceId) {
        if self.mode == EditorMode::Editing(id) {
            self.deselect(plan);
            return;
        }
        match plan.select(id) {
            Ok(()) => {
                self.mode = EditorMode::Editing(id);
                self.customizing = false;
            }
            Err(err) => {
                warn!("pick rejected: {err}");
                self.deselect(plan);
            }
        }
    }

    fn deselect(&mut self, plan: &mut RoomPlan) {
        self.mode = EditorMode::Idle;
        self.customizing = false;
        plan.clear_selection();
    }

    /// Snap the selected instance onto a placement spot, then end the
    /// editing session.
    fn place_at_spot(&mut self, plan: &mut RoomPlan, catalog: &Catalog, position: Vec3) {
        let EditorMode::Editing(id) = self.mode else {
            return;
        };
        self.execute(
            plan,
            catalog,
            PlanMutation::PlaceAt { id, position },
            "place at spot",
        );
        self.deselect(plan);
    }

    fn run_action(&mut self, plan: &mut RoomPlan, catalog: &Catalog, action: EditorAction) {
        if action == EditorAction::Deselect {
            // Escape ends the session without touching transforms.
            self.deselect(plan);
            return;
        }
        // Every other action needs a live selection.
        let EditorMode::Editing(id) = self.mode else {
            return;
        };
        match action {
            EditorAction::MoveForward => self.translate(plan, catalog, id, Vec3::new(0.0, 0.0, -MOVE_STEP)),
            EditorAction::MoveBack => self.translate(plan, catalog, id, Vec3::new(0.0, 0.0, MOVE_STEP)),
            EditorAction::MoveLeft => self.translate(plan, catalog, id, Vec3::new(-MOVE_STEP, 0.0, 0.0)),
            EditorAction::MoveRight => self.translate(plan, catalog, id, Vec3::new(MOVE_STEP, 0.0, 0.0)),
            EditorAction::MoveUp => self.translate(plan, catalog, id, Vec3::new(0.0, MOVE_STEP, 0.0)),
            EditorAction::MoveDown => self.translate(plan, catalog, id, Vec3::new(0.0, -MOVE_STEP, 0.0)),
            EditorAction::RotateLeft => self.rotate(plan, catalog, id, ROTATE_STEP),
            EditorAction::RotateRight => self.rotate(plan, catalog, id, -ROTATE_STEP),
            EditorAction::Delete => {
                self.execute(plan, catalog, PlanMutation::Remove { id }, "delete instance");
                self.deselect(plan);
            }
            // Deselect returned above.
            EditorAction::Deselect => {}
        }
    }

    fn translate(&mut self, plan: &mut RoomPlan, catalog: &Catalog, id: InstanceId, delta: Vec3) {
        self.execute(plan, catalog, PlanMutation::Translate { id, delta }, "move");
    }

    fn rotate(&mut self, plan: &mut RoomPlan, catalog: &Catalog, id: InstanceId, step: f32) {
        self.execute(
            plan,
            catalog,
            PlanMutation::Rotate {
                id,
                delta: Vec3::new(0.0, step, 0.0),
            },
            "rotate",
        );
    }

    /// Open or close the color palette for the selected instance.
    pub fn toggle_customize(&mut self) {
        if matches!(self.mode, EditorMode::Editing(_)) {
            self.customizing = !self.customizing;
        }
    }

    /// Apply a palette color to the selection; `None` clears the
    /// override back to the product material.
    pub fn pick_color(&mut self, plan: &mut RoomPlan, catalog: &Catalog, color: Option<Color>) {
        if !self.customizing {
            return;
        }
        let EditorMode::Editing(id) = self.mode else {
            return;
        };
        self.execute(plan, catalog, PlanMutation::SetColor { id, color }, "set color");
    }

    /// Place a catalog product at the room origin. The new instance is
    /// not auto-selected; the user picks it to start editing.
    pub fn add_from_catalog(
        &mut self,
        plan: &mut RoomPlan,
        catalog: &Catalog,
        product: ProductId,
    ) -> Result<InstanceId, PlanError> {
        self.commands
            .execute(plan, catalog, PlanMutation::Add { product }, "add instance")?;
        // Add just appended, so newest() is the placed instance.
        Ok(plan.newest().ok_or(PlanError::NotFound(product))?)
    }

    pub fn undo(&mut self, plan: &mut RoomPlan, catalog: &Catalog) -> Option<String> {
        // The restored state may not contain the selected handle.
        let out = self.commands.undo(plan, catalog);
        self.reconcile_selection(plan);
        out
    }

    pub fn redo(&mut self, plan: &mut RoomPlan, catalog: &Catalog) -> Option<String> {
        let out = self.commands.redo(plan, catalog);
        self.reconcile_selection(plan);
        out
    }

    pub fn can_undo(&self) -> bool {
        self.commands.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.commands.can_redo()
    }

    /// Run a mutation through the command stack; stale-handle failures
    /// drop back to `Idle` instead of propagating.
    fn execute(
        &mut self,
        plan: &mut RoomPlan,
        catalog: &Catalog,
        mutation: PlanMutation,
        description: &str,
    ) {
        if let Err(err) = self.commands.execute(plan, catalog, mutation, description) {
            warn!("{description} failed: {err}");
            self.deselect(plan);
        }
    }

    fn reconcile_selection(&mut self, plan: &mut RoomPlan) {
        if let EditorMode::Editing(id) = self.mode
            && !plan.contains(id)
        {
            self.deselect(plan);
        }
    }

    /// Route a room-shell mutation through the same undo history as
    /// instance edits.
    pub fn edit_room(
        &mut self,
        plan: &mut RoomPlan,
        catalog: &Catalog,
        patch: rd_core::RoomConfigPatch,
    ) {
        self.execute(plan, catalog, PlanMutation::SetRoom { patch }, "edit room");
    }
}
