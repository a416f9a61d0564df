pub mod catalog;
pub mod error;
pub mod id;
pub mod model;
pub mod persist;
pub mod plan;

pub use catalog::{Catalog, CatalogItem, Category};
pub use error::{PersistError, PlanError};
pub use id::ProductId;
pub use model::*;
pub use persist::{KvStore, MemoryKv, RoomPlanDoc, load_plan, save_plan};
pub use plan::{InstanceId, RoomPlan};
