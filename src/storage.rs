use async_trait::async_trait;
use model::ForecastPlan;
use thiserror::Error;

pub mod drive;
pub mod local;

pub use drive::DriveStore;
pub use local::LocalStore;

/// The single well-known snapshot filename, shared by the cloud store and
/// the local fallback.
pub const SNAPSHOT_FILE_NAME: &str = "rental_forecast_config.json";

/// Error types for snapshot store operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// The cloud store needs a bearer credential and none is configured.
    #[error("No bearer credential configured for the cloud store")]
    NotAuthenticated,

    /// No snapshot exists in the store yet.
    #[error("No snapshot named {0} found in the store")]
    NotFound(String),

    /// Transport-level failure talking to the cloud store.
    #[error("Cloud store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Local file I/O failure.
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored bytes are not a valid plan snapshot.
    #[error("Invalid snapshot file: {0}")]
    InvalidSnapshot(#[from] serde_json::Error),
}

/// Type alias for Result with StorageError
pub type Result<T> = std::result::Result<T, StorageError>;

/// Where a saved snapshot ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReceipt {
    /// File id (cloud) or path (local) the snapshot was written to.
    pub location: String,
    /// Whether a new file was created rather than an existing one updated.
    pub created: bool,
}

/// An opaque snapshot store: one well-known file, overwrite semantics.
///
/// The plan only ever round-trips through `save`/`load` as a whole; partial
/// updates are not part of the interface.
#[async_trait]
pub trait SnapshotStore: Send + Sync + std::fmt::Debug {
    /// Short backend label used in status responses ("drive", "local").
    fn kind(&self) -> &'static str;

    /// Whether the store holds the credentials it needs to operate.
    fn authenticated(&self) -> bool;

    /// Persist the plan, overwriting any previous snapshot.
    async fn save(&self, plan: &ForecastPlan) -> Result<StoreReceipt>;

    /// Fetch and deserialize the stored snapshot.
    async fn load(&self) -> Result<ForecastPlan>;
}
