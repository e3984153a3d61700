use std::path::Path;

use anyhow::{bail, Context, Result};
use model::ForecastPlan;
use tracing::info;

use crate::storage::{LocalStore, SnapshotStore};

/// Write the default plan snapshot to `path`.
pub async fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    LocalStore::new(path)
        .save(&ForecastPlan::default())
        .await
        .with_context(|| format!("failed to write plan snapshot to {}", path.display()))?;

    info!("Default plan snapshot written to {}", path.display());
    println!("Wrote default plan snapshot to {}", path.display());
    Ok(())
}
