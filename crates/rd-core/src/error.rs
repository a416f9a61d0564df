use crate::id::ProductId;
use crate::plan::InstanceId;
use thiserror::Error;

/// Failures of placement store operations.
///
/// Everything here is local and synchronous — callers at the UI boundary
/// degrade to "no visible change" rather than surfacing an error dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The referenced product does not exist in the catalog.
    #[error("catalog has no product `{0}`")]
    NotFound(ProductId),

    /// The handle points at a removed or never-allocated instance.
    /// Generation checking makes this detectable instead of silently
    /// re-targeting a different instance.
    #[error("stale instance handle {0:?}")]
    StaleHandle(InstanceId),
}

/// Failures of the plan persistence boundary.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("msgpack encode: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("msgpack decode: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}
