//! Plan persistence through the storefront's key-value boundary.
//!
//! The surrounding shop keeps its users/orders/favorites in a
//! schema-less, last-writer-wins key-value store of JSON blobs. Room
//! plans ride the same boundary: a `RoomPlanDoc` snapshot (room shell +
//! instances in insertion order) serialized as JSON, or as MessagePack
//! where a compact binary blob is preferred.
//!
//! Handles and selection are session state, not document state: loading
//! a document allocates fresh handles and starts with nothing selected.

use crate::error::PersistError;
use crate::model::{FurnitureInstance, RoomConfig};
use crate::plan::RoomPlan;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serializable snapshot of a room plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPlanDoc {
    pub config: RoomConfig,
    pub instances: Vec<FurnitureInstance>,
}

impl RoomPlanDoc {
    /// Snapshot a live plan (insertion order preserved).
    pub fn capture(plan: &RoomPlan) -> Self {
        Self {
            config: plan.config().clone(),
            instances: plan.iter().map(|(_, inst)| inst.clone()).collect(),
        }
    }

    /// Rebuild a live plan with fresh handles and no selection.
    pub fn into_plan(self) -> RoomPlan {
        let mut plan = RoomPlan::with_config(self.config);
        for instance in self.instances {
            plan.restore_instance(instance);
        }
        plan
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_msgpack(&self) -> Result<Vec<u8>, PersistError> {
        Ok(rmp_serde::to_vec(self)?)
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, PersistError> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

/// The shop's key-value persistence boundary.
///
/// No schema versioning, no migrations — whatever was written last wins,
/// which is exactly what the storefront does for its own records.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn put(&mut self, key: &str, value: Vec<u8>);
    fn remove(&mut self, key: &str);
}

/// In-memory store, the reference implementation for a single session.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: Vec<u8>) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Write a plan snapshot under `key` as JSON.
pub fn save_plan(store: &mut dyn KvStore, key: &str, plan: &RoomPlan) -> Result<(), PersistError> {
    let json = RoomPlanDoc::capture(plan).to_json()?;
    store.put(key, json.into_bytes());
    Ok(())
}

/// Load the plan stored under `key`, or `None` when nothing was saved.
pub fn load_plan(store: &dyn KvStore, key: &str) -> Result<Option<RoomPlan>, PersistError> {
    let Some(bytes) = store.get(key) else {
        return Ok(None);
    };
    let json = String::from_utf8_lossy(&bytes);
    Ok(Some(RoomPlanDoc::from_json(&json)?.into_plan()))
}
