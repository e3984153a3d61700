use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::helpers::converters::projection_to_table;
use crate::helpers::table::render_table;
use crate::storage::{LocalStore, SnapshotStore};

/// Project a local plan file and print the month-by-month table.
pub async fn forecast(plan_path: &Path) -> Result<()> {
    let plan = LocalStore::new(plan_path)
        .load()
        .await
        .with_context(|| format!("failed to read plan from {}", plan_path.display()))?;
    debug!(
        forecast_years = plan.forecast_years,
        segments = plan.lease_segments.len(),
        "plan loaded"
    );

    let projection = compute::project(&plan).context("failed to compute projection")?;
    let table = projection_to_table(&projection);

    println!("{}", render_table(&table));
    Ok(())
}
