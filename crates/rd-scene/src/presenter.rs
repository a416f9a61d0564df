//! The presenter boundary.
//!
//! Rendering is owned by the host's 3D stack; the engine only hands it
//! snapshots and receives pointer/keyboard events back. Implementations
//! live outside this workspace (native viewer, WASM canvas bridge).
//!
//! Pointer events arrive already resolved against the scene (which
//! instance or spot was hit) — the raycast itself belongs to the
//! presenter.

use crate::snapshot::SceneSnapshot;
use rd_core::{InstanceId, Vec3};

/// Consumes scene snapshots. Called after every applied mutation; the
/// presenter decides what actually needs redrawing.
///
/// Asset loading may be asynchronous on the presenter side — a prop can
/// arrive before its model is ready, in which case the presenter shows a
/// placeholder until the load completes.
pub trait ScenePresenter {
    fn present(&mut self, snapshot: &SceneSnapshot);
}

/// Presenter that drops every frame. Useful for headless tests and for
/// running the engine without a display.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl ScenePresenter for NullPresenter {
    fn present(&mut self, _snapshot: &SceneSnapshot) {}
}

/// A keyboard event as delivered by the host.
///
/// `key` follows the web `KeyboardEvent.key` convention (`"w"`,
/// `"ArrowUp"`, `"Escape"`); matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyInput {
    /// A key press with no modifiers held.
    pub fn bare(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
        }
    }

    pub fn has_modifier(&self) -> bool {
        self.ctrl || self.shift || self.alt || self.meta
    }
}

/// Events the presenter reports back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// Pointer selection landed on a placed instance.
    InstancePicked(InstanceId),
    /// Pointer selection landed on empty background.
    BackgroundPicked,
    /// Pointer selection landed on a placement spot (floor height).
    SpotPicked(Vec3),
    /// A key was pressed (host key-repeat delivers repeats as events).
    Key(KeyInput),
}
