use std::path::{Path, PathBuf};

use async_trait::async_trait;
use model::ForecastPlan;
use tracing::{debug, info, instrument};

use super::{Result, SnapshotStore, StorageError, StoreReceipt};

/// Local-file snapshot store: the download/upload fallback for working
/// without the cloud store, and the backup target when a cloud save fails.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for LocalStore {
    fn kind(&self) -> &'static str {
        "local"
    }

    fn authenticated(&self) -> bool {
        true
    }

    #[instrument(skip(self, plan))]
    async fn save(&self, plan: &ForecastPlan) -> Result<StoreReceipt> {
        let content = serde_json::to_string_pretty(plan)?;
        let created = !self.path.exists();
        tokio::fs::write(&self.path, content).await?;

        info!(path = %self.path.display(), created, "snapshot written to local file");
        Ok(StoreReceipt {
            location: self.path.display().to_string(),
            created,
        })
    }

    #[instrument(skip(self))]
    async fn load(&self) -> Result<ForecastPlan> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let plan = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), "snapshot loaded from local file");
        Ok(plan)
    }
}
