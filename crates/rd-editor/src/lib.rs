//! RD editor: selection, keyboard transforms, color overrides, room
//! configuration, and undo/redo over a `RoomPlan`.
//!
//! The editor is renderer-agnostic: it consumes normalized
//! `ViewerEvent`s and emits plan mutations; presenting the resulting
//! scene belongs to `rd-scene` and the host.

pub mod commands;
pub mod controller;
pub mod keymap;
pub mod mutation;
pub mod room;
pub mod session;

pub use commands::CommandStack;
pub use controller::{EditorMode, MOVE_STEP, PALETTE, PlacementController, ROTATE_STEP};
pub use rd_scene::{KeyInput, ViewerEvent};
pub use keymap::{EditorAction, Keymap};
pub use mutation::{PlanMutation, apply_mutation, compute_inverse};
pub use room::{DIMENSION_STEP, RoomDimension, step_dimension};
pub use session::DesignSession;
