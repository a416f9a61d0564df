//! The design session: one room, one user, one presenter.
//!
//! `DesignSession` owns the authoritative plan and keeps the presenter
//! in sync: every handled event that may have changed plan or selection
//! state ends with a fresh snapshot pushed through `present`. The
//! presenter decides what actually needs redrawing.

use rd_core::{Catalog, InstanceId, KvStore, PersistError, PlanError, ProductId, RoomPlan};
use rd_scene::{SceneSnapshot, ScenePresenter, ViewerEvent, build_snapshot};

use crate::controller::PlacementController;

/// Owns the plan, the catalog view, and the editing state machine.
pub struct DesignSession {
    plan: RoomPlan,
    catalog: Catalog,
    controller: PlacementController,
}

impl DesignSession {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            plan: RoomPlan::new(),
            catalog,
            controller: PlacementController::new(),
        }
    }

    /// Resume a previously saved plan; the editing session starts fresh.
    pub fn with_plan(catalog: Catalog, plan: RoomPlan) -> Self {
        Self {
            plan,
            catalog,
            controller: PlacementController::new(),
        }
    }

    pub fn plan(&self) -> &RoomPlan {
        &self.plan
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn controller(&self) -> &PlacementController {
        &self.controller
    }

    /// Handle one presenter event and push the resulting frame.
    pub fn handle_event(&mut self, event: &ViewerEvent, presenter: &mut dyn ScenePresenter) {
        self.controller
            .handle_event(&mut self.plan, &self.catalog, event);
        presenter.present(&self.snapshot());
    }

    /// Place a product from the shop page ("add to room").
    pub fn add_product(
        &mut self,
        product: ProductId,
        presenter: &mut dyn ScenePresenter,
    ) -> Result<InstanceId, PlanError> {
        let id = self
            .controller
            .add_from_catalog(&mut self.plan, &self.catalog, product)?;
        presenter.present(&self.snapshot());
        Ok(id)
    }

    pub fn undo(&mut self, presenter: &mut dyn ScenePresenter) -> Option<String> {
        let undone = self.controller.undo(&mut self.plan, &self.catalog);
        if undone.is_some() {
            presenter.present(&self.snapshot());
        }
        undone
    }

    pub fn redo(&mut self, presenter: &mut dyn ScenePresenter) -> Option<String> {
        let redone = self.controller.redo(&mut self.plan, &self.catalog);
        if redone.is_some() {
            presenter.present(&self.snapshot());
        }
        redone
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        build_snapshot(&self.plan, &self.catalog)
    }

    // ─── Persistence ─────────────────────────────────────────────────

    pub fn save(&self, store: &mut dyn KvStore, key: &str) -> Result<(), PersistError> {
        rd_core::save_plan(store, key, &self.plan)
    }

    /// Load the plan under `key`, replacing the current one. The
    /// editing session and undo history reset; a missing key is not an
    /// error and leaves the session unchanged.
    pub fn load(&mut self, store: &dyn KvStore, key: &str) -> Result<bool, PersistError> {
        match rd_core::load_plan(store, key)? {
            Some(plan) => {
                self.plan = plan;
                self.controller = PlacementController::new();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
