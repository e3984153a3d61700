pub mod error;
pub mod schedule;
pub mod timeline;

pub use error::{ComputeError, Result};
pub use schedule::FeeSchedule;
pub use timeline::{generate, ExpenseBreakdown, MonthRow, Projection};

use model::ForecastPlan;

/// Projects a plan with the default management-contract fee schedule.
///
/// This is the entry point used by the API and CLI; callers with a custom
/// schedule go through [`timeline::generate`] directly.
pub fn project(plan: &ForecastPlan) -> Result<Projection> {
    timeline::generate(plan, &FeeSchedule::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    /// The default plan is a single 12-month lease inside a 3-year window;
    /// the projection must cover all 36 months and recompute identically on
    /// every call.
    #[test]
    fn test_project_default_plan() {
        let plan = ForecastPlan::default();
        let projection = project(&plan).unwrap();
        assert_eq!(projection.rows.len(), 36);
        assert_eq!(projection.total_income, Decimal::new(2500 * 12, 0));

        let again = project(&plan).unwrap();
        assert_eq!(again, projection);
    }

    /// Restoring a serialized snapshot reproduces the identical forecast.
    #[test]
    fn test_snapshot_round_trip_preserves_forecast() {
        let mut plan = ForecastPlan::default();
        plan.set_repair(4, Decimal::new(2500, 0), "Sewer line".to_string());
        plan.set_mortgage_update(10, Decimal::new(1625, 0));
        plan.add_new_tenant();

        let json = serde_json::to_string(&plan).unwrap();
        let restored: ForecastPlan = serde_json::from_str(&json).unwrap();

        assert_eq!(project(&restored).unwrap(), project(&plan).unwrap());
    }
}
