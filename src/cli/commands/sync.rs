use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::storage::{DriveStore, LocalStore, SnapshotStore};

fn drive_store(access_token: Option<String>, base_url: Option<String>) -> Result<DriveStore> {
    let token = access_token.context(
        "an access token is required (set GOOGLE_ACCESS_TOKEN or pass --access-token)",
    )?;
    let mut store = DriveStore::new(Some(token));
    if let Some(base_url) = base_url {
        store = store.with_base_url(base_url);
    }
    Ok(store)
}

/// Upload a local plan snapshot to the cloud store.
pub async fn push(
    plan_path: &Path,
    access_token: Option<String>,
    base_url: Option<String>,
) -> Result<()> {
    let plan = LocalStore::new(plan_path)
        .load()
        .await
        .with_context(|| format!("failed to read plan from {}", plan_path.display()))?;

    let drive = drive_store(access_token, base_url)?;
    let receipt = drive
        .save(&plan)
        .await
        .context("failed to save the snapshot to the cloud store")?;

    info!(location = %receipt.location, created = receipt.created, "snapshot pushed");
    if receipt.created {
        println!("Created cloud snapshot (file id {})", receipt.location);
    } else {
        println!("Updated cloud snapshot (file id {})", receipt.location);
    }
    Ok(())
}

/// Download the cloud snapshot into a local plan file.
pub async fn pull(
    plan_path: &Path,
    access_token: Option<String>,
    base_url: Option<String>,
) -> Result<()> {
    let drive = drive_store(access_token, base_url)?;
    let plan = drive
        .load()
        .await
        .context("failed to load the snapshot from the cloud store")?;

    LocalStore::new(plan_path)
        .save(&plan)
        .await
        .with_context(|| format!("failed to write plan to {}", plan_path.display()))?;

    info!(path = %plan_path.display(), "snapshot pulled");
    println!("Wrote cloud snapshot to {}", plan_path.display());
    Ok(())
}
