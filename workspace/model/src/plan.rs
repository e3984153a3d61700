use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::lease::{LeaseSegment, MoveOutDetails, SegmentKind};
use crate::window::AnalysisWindow;

/// A repair charged to a specific month, with a free-form note describing
/// the work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RepairEntry {
    pub amount: Decimal,
    #[serde(default)]
    pub note: String,
}

/// The complete forecasting plan: global settings, lease segments, and the
/// sparse per-month override maps.
///
/// This struct is the persisted snapshot. Its serialized shape is the
/// external interface: camelCase keys, override maps keyed by stringified
/// zero-based month indices. Every field falls back to its default when
/// missing, so older or partial snapshots restore cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastPlan {
    /// Base monthly mortgage payment, in effect until the first override.
    pub initial_mortgage: Decimal,
    /// Monthly utility cost charged while the property sits vacant.
    pub vacancy_utilities: Decimal,
    /// Forecast horizon in years.
    #[validate(range(min = 1, max = 10))]
    pub forecast_years: u32,
    /// Calendar month (1-12) the analysis starts in.
    #[validate(range(min = 1, max = 12))]
    pub analysis_start_month: u32,
    pub analysis_start_year: i32,
    /// Ordered lease segments. The first segment containing a month wins.
    #[validate(nested)]
    pub lease_segments: Vec<LeaseSegment>,
    /// Repairs keyed by zero-based month index within the window.
    pub monthly_repairs: BTreeMap<u32, RepairEntry>,
    /// Utility overrides keyed by zero-based month index.
    pub utility_overrides: BTreeMap<u32, Decimal>,
    /// Sticky mortgage updates keyed by zero-based month index. Each stays
    /// in effect until the next override.
    pub mortgage_updates: BTreeMap<u32, Decimal>,
}

impl Default for ForecastPlan {
    fn default() -> Self {
        let details = MoveOutDetails::new_tenant_default();
        Self {
            initial_mortgage: Decimal::new(1500, 0),
            vacancy_utilities: Decimal::new(150, 0),
            forecast_years: 3,
            analysis_start_month: 12,
            analysis_start_year: 2025,
            lease_segments: vec![LeaseSegment {
                id: 1,
                kind: SegmentKind::New,
                start_month: 1,
                duration: 12,
                marketing_fee: true,
                rent: Decimal::new(2500, 0),
                move_out_costs: details.total(),
                move_out_details: details,
            }],
            monthly_repairs: BTreeMap::new(),
            utility_overrides: BTreeMap::new(),
            mortgage_updates: BTreeMap::new(),
        }
    }
}

impl ForecastPlan {
    /// Number of months in the analysis window.
    pub fn total_months(&self) -> u32 {
        self.forecast_years * 12
    }

    /// Calendar anchor of the analysis window.
    pub fn window(&self) -> AnalysisWindow {
        AnalysisWindow::new(self.analysis_start_month, self.analysis_start_year)
    }

    /// The lease segment active in the given 1-based month, if any.
    ///
    /// Overlaps are not rejected; the first segment in array order wins.
    pub fn active_segment(&self, month: u32) -> Option<&LeaseSegment> {
        self.lease_segments.iter().find(|s| s.contains(month))
    }

    /// The segment whose tenant moved out right before the given month, i.e.
    /// whose last month was `month - 1`.
    pub fn vacated_segment(&self, month: u32) -> Option<&LeaseSegment> {
        self.lease_segments.iter().find(|s| s.vacated_before(month))
    }

    pub fn last_segment(&self) -> Option<&LeaseSegment> {
        self.lease_segments.last()
    }

    pub fn segment(&self, id: u64) -> Option<&LeaseSegment> {
        self.lease_segments.iter().find(|s| s.id == id)
    }

    pub fn segment_mut(&mut self, id: u64) -> Option<&mut LeaseSegment> {
        self.lease_segments.iter_mut().find(|s| s.id == id)
    }

    /// Next free segment id. Ids are assigned monotonically from the current
    /// maximum so they stay stable across save/load.
    pub fn next_segment_id(&self) -> u64 {
        self.lease_segments
            .iter()
            .map(|s| s.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Append a renewal segment continuing the last lease. Returns the id of
    /// the new segment.
    pub fn add_renewal(&mut self) -> u64 {
        let id = self.next_segment_id();
        let segment = match self.last_segment() {
            Some(last) => LeaseSegment::renewal_of(last, id),
            // An empty plan has nothing to renew; seed a first lease instead.
            None => LeaseSegment {
                id,
                ..Self::default().lease_segments[0].clone()
            },
        };
        self.lease_segments.push(segment);
        id
    }

    /// Append a new-tenant segment one month after the last lease ends (the
    /// gap month is the turnover). Returns the id of the new segment.
    pub fn add_new_tenant(&mut self) -> u64 {
        let id = self.next_segment_id();
        let segment = match self.last_segment() {
            Some(last) => LeaseSegment::new_tenant_after(last, id),
            None => LeaseSegment {
                id,
                ..Self::default().lease_segments[0].clone()
            },
        };
        self.lease_segments.push(segment);
        id
    }

    /// Remove a segment by id. Refuses to remove the last remaining segment
    /// and returns `false` when nothing was removed.
    pub fn remove_segment(&mut self, id: u64) -> bool {
        if self.lease_segments.len() <= 1 {
            return false;
        }
        let before = self.lease_segments.len();
        self.lease_segments.retain(|s| s.id != id);
        self.lease_segments.len() < before
    }

    /// Record a repair for the given zero-based month. A zero amount clears
    /// the entry.
    pub fn set_repair(&mut self, month: u32, amount: Decimal, note: String) {
        if amount.is_zero() {
            self.monthly_repairs.remove(&month);
        } else {
            self.monthly_repairs.insert(month, RepairEntry { amount, note });
        }
    }

    pub fn clear_repair(&mut self, month: u32) -> bool {
        self.monthly_repairs.remove(&month).is_some()
    }

    pub fn set_utility_override(&mut self, month: u32, amount: Decimal) {
        self.utility_overrides.insert(month, amount);
    }

    pub fn clear_utility_override(&mut self, month: u32) -> bool {
        self.utility_overrides.remove(&month).is_some()
    }

    pub fn set_mortgage_update(&mut self, month: u32, amount: Decimal) {
        self.mortgage_updates.insert(month, amount);
    }

    pub fn clear_mortgage_update(&mut self, month: u32) -> bool {
        self.mortgage_updates.remove(&month).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_matches_documented_defaults() {
        let plan = ForecastPlan::default();
        assert_eq!(plan.initial_mortgage, Decimal::new(1500, 0));
        assert_eq!(plan.vacancy_utilities, Decimal::new(150, 0));
        assert_eq!(plan.forecast_years, 3);
        assert_eq!(plan.analysis_start_month, 12);
        assert_eq!(plan.analysis_start_year, 2025);
        assert_eq!(plan.lease_segments.len(), 1);

        let segment = &plan.lease_segments[0];
        assert_eq!(segment.id, 1);
        assert_eq!(segment.kind, SegmentKind::New);
        assert_eq!(segment.rent, Decimal::new(2500, 0));
        assert_eq!(segment.move_out_costs, Decimal::new(550, 0));
        assert!(plan.monthly_repairs.is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut plan = ForecastPlan::default();
        plan.set_repair(4, Decimal::new(2500, 0), "Water heater".to_string());
        plan.set_utility_override(13, Decimal::new(85, 0));
        plan.set_mortgage_update(6, Decimal::new(1650, 0));
        plan.add_renewal();

        let json = serde_json::to_string_pretty(&plan).unwrap();
        let restored: ForecastPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, plan);
    }

    #[test]
    fn test_snapshot_uses_external_keys() {
        let plan = ForecastPlan::default();
        let json = serde_json::to_value(&plan).unwrap();
        for key in [
            "initialMortgage",
            "vacancyUtilities",
            "forecastYears",
            "analysisStartMonth",
            "analysisStartYear",
            "leaseSegments",
            "monthlyRepairs",
            "utilityOverrides",
            "mortgageUpdates",
        ] {
            assert!(json.get(key).is_some(), "missing snapshot key {}", key);
        }
    }

    #[test]
    fn test_missing_keys_restore_defaults() {
        let plan: ForecastPlan = serde_json::from_str(r#"{"forecastYears": 5}"#).unwrap();
        assert_eq!(plan.forecast_years, 5);
        assert_eq!(plan.initial_mortgage, Decimal::new(1500, 0));
        assert_eq!(plan.lease_segments.len(), 1);

        let empty: ForecastPlan = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ForecastPlan::default());
    }

    #[test]
    fn test_override_maps_accept_string_keys_and_numbers() {
        let json = r#"{
            "monthlyRepairs": {"3": {"amount": 2500, "note": "Roof"}},
            "utilityOverrides": {"0": 95.5},
            "mortgageUpdates": {"12": 1700}
        }"#;
        let plan: ForecastPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.monthly_repairs[&3].amount, Decimal::new(2500, 0));
        assert_eq!(plan.utility_overrides[&0], Decimal::new(955, 1));
        assert_eq!(plan.mortgage_updates[&12], Decimal::new(1700, 0));
    }

    #[test]
    fn test_first_segment_wins_on_overlap() {
        let mut plan = ForecastPlan::default();
        plan.lease_segments.push(LeaseSegment {
            id: 2,
            rent: Decimal::new(9999, 0),
            ..plan.lease_segments[0].clone()
        });
        let active = plan.active_segment(6).unwrap();
        assert_eq!(active.id, 1);
    }

    #[test]
    fn test_add_renewal_and_new_tenant_placement() {
        let mut plan = ForecastPlan::default();
        let renewal_id = plan.add_renewal();
        assert_eq!(renewal_id, 2);
        assert_eq!(plan.segment(renewal_id).unwrap().start_month, 13);

        let tenant_id = plan.add_new_tenant();
        assert_eq!(tenant_id, 3);
        // Renewal runs months 13-24; the new tenant starts after a gap month.
        assert_eq!(plan.segment(tenant_id).unwrap().start_month, 26);
    }

    #[test]
    fn test_remove_segment_keeps_at_least_one() {
        let mut plan = ForecastPlan::default();
        assert!(!plan.remove_segment(1));

        plan.add_renewal();
        assert!(plan.remove_segment(2));
        assert_eq!(plan.lease_segments.len(), 1);
        assert!(!plan.remove_segment(99));
    }

    #[test]
    fn test_zero_repair_clears_entry() {
        let mut plan = ForecastPlan::default();
        plan.set_repair(2, Decimal::new(300, 0), "Disposal".to_string());
        assert!(plan.monthly_repairs.contains_key(&2));
        plan.set_repair(2, Decimal::ZERO, String::new());
        assert!(!plan.monthly_repairs.contains_key(&2));
    }

    #[test]
    fn test_validation_bounds() {
        use validator::Validate;

        let mut plan = ForecastPlan::default();
        assert!(plan.validate().is_ok());

        plan.forecast_years = 11;
        assert!(plan.validate().is_err());
        plan.forecast_years = 3;

        plan.analysis_start_month = 13;
        assert!(plan.validate().is_err());
        plan.analysis_start_month = 12;

        plan.lease_segments[0].duration = 0;
        assert!(plan.validate().is_err());
    }
}
