use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use model::ForecastPlan;
use tokio::sync::RwLock;

use crate::schemas::AppState;
use crate::storage::{DriveStore, LocalStore, SnapshotStore, StorageError};

/// Runtime settings for the server, assembled from CLI arguments and the
/// environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Bind address for the web server
    pub bind_address: String,
    /// Plan snapshot file loaded at startup
    pub plan_path: PathBuf,
    /// OAuth bearer credential for the cloud snapshot store
    pub access_token: Option<String>,
    /// Alternate cloud store host (tests, proxies)
    pub drive_base_url: Option<String>,
}

/// Local fallback written when a cloud save fails, kept next to the plan
/// file.
pub fn backup_path(plan_path: &Path) -> PathBuf {
    plan_path.with_extension("backup.json")
}

/// Initialize application configuration and state
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    // Load the startup plan: an existing local snapshot, or the defaults.
    let local = LocalStore::new(&settings.plan_path);
    let plan = match local.load().await {
        Ok(plan) => {
            tracing::info!(path = %settings.plan_path.display(), "loaded plan snapshot");
            plan
        }
        Err(StorageError::NotFound(_)) => {
            tracing::info!(
                path = %settings.plan_path.display(),
                "no plan snapshot found, starting from defaults"
            );
            ForecastPlan::default()
        }
        Err(e) => return Err(e.into()),
    };

    let mut drive = DriveStore::new(settings.access_token.clone());
    if let Some(base_url) = &settings.drive_base_url {
        drive = drive.with_base_url(base_url.clone());
    }
    let store: Arc<dyn SnapshotStore> = Arc::new(drive);

    Ok(AppState {
        plan: Arc::new(RwLock::new(plan)),
        store,
        backup: Arc::new(LocalStore::new(backup_path(&settings.plan_path))),
    })
}
