use chrono::NaiveDate;
use model::{ForecastPlan, SegmentKind};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{ComputeError, Result};
use crate::schedule::FeeSchedule;

/// Itemized operating expenses for a single month.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseBreakdown {
    /// Monthly management fee (fraction of rent while occupied).
    pub management: Decimal,
    /// One-time leasing fee in a new lease's first month.
    pub leasing: Decimal,
    /// One-time renewal fee in a renewal's first month.
    pub renewal: Decimal,
    /// One-time marketing/photo fee.
    pub marketing: Decimal,
    /// HOA dues, plus the setup charge in month 1.
    pub hoa: Decimal,
    /// Utilities: the month's override, or the vacancy charge when empty.
    pub utilities: Decimal,
    /// Maintenance survey fee in a lease's final month.
    pub survey: Decimal,
    /// Repair amount recorded for the month.
    pub repair: Decimal,
    /// Coordination surcharge on large repairs.
    pub coordination: Decimal,
    /// Turnover cost from a segment that ended the previous month.
    pub move_out: Decimal,
    pub repair_note: Option<String>,
}

impl ExpenseBreakdown {
    /// Total operating expense for the month.
    pub fn total(&self) -> Decimal {
        self.management
            + self.leasing
            + self.renewal
            + self.marketing
            + self.hoa
            + self.utilities
            + self.survey
            + self.repair
            + self.coordination
            + self.move_out
    }

    /// One-time fee portion: everything outside the recurring
    /// management/HOA/utility charges.
    pub fn one_time(&self) -> Decimal {
        self.leasing + self.renewal + self.marketing + self.survey + self.move_out
    }
}

/// A single month of the projection.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    /// 1-based month index within the analysis window.
    pub index: u32,
    /// First day of the calendar month.
    pub date: NaiveDate,
    /// Short display label, e.g. `Dec '25`.
    pub label: String,
    /// 1-based analysis year the month belongs to.
    pub analysis_year: u32,
    /// Kind of the active lease segment; `None` while vacant.
    pub segment_kind: Option<SegmentKind>,
    /// Whether the active segment starts this month.
    pub lease_start: bool,
    /// Whether the active segment ends this month.
    pub lease_end: bool,
    pub rent: Decimal,
    pub expenses: ExpenseBreakdown,
    /// Effective mortgage after sticky overrides.
    pub mortgage: Decimal,
    /// rent − expenses − mortgage
    pub net: Decimal,
}

impl MonthRow {
    pub fn occupied(&self) -> bool {
        self.segment_kind.is_some()
    }
}

/// The full projection: one row per month plus running totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub rows: Vec<MonthRow>,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_mortgage: Decimal,
}

impl Projection {
    /// Net cash flow over the whole horizon.
    pub fn net_cash_flow(&self) -> Decimal {
        self.total_income - self.total_expenses - self.total_mortgage
    }
}

/// Generates the month-by-month cash-flow projection for a plan.
///
/// Single pass over the timeline. At each month: the sticky mortgage
/// override is applied first, then the active segment is resolved by range
/// containment (first match in array order wins), then rent and the fee
/// schedule produce the itemized expenses. Move-out costs of a segment that
/// ended in month `m-1` land in month `m`; a segment ending in the final
/// month of the window therefore never bills its turnover.
pub fn generate(plan: &ForecastPlan, schedule: &FeeSchedule) -> Result<Projection> {
    if !(1..=10).contains(&plan.forecast_years) {
        return Err(ComputeError::InvalidHorizon(plan.forecast_years));
    }
    if !(1..=12).contains(&plan.analysis_start_month) {
        return Err(ComputeError::InvalidStartMonth(plan.analysis_start_month));
    }
    if let Some(segment) = plan.lease_segments.iter().find(|s| s.duration == 0) {
        return Err(ComputeError::EmptySegment(segment.id));
    }

    let window = plan.window();
    let total_months = plan.total_months();
    debug!(total_months, "generating projection");

    let mut rows = Vec::with_capacity(total_months as usize);
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut total_mortgage = Decimal::ZERO;
    let mut current_mortgage = plan.initial_mortgage;

    for month in 1..=total_months {
        // Override maps are keyed by the zero-based index.
        let month_index = month - 1;

        if let Some(update) = plan.mortgage_updates.get(&month_index) {
            current_mortgage = *update;
        }

        let active = plan.active_segment(month);
        let lease_start = active.is_some_and(|s| s.starts_at(month));
        let lease_end = active.is_some_and(|s| s.ends_at(month));

        let rent = active.map_or(Decimal::ZERO, |s| s.rent);

        let mut expenses = ExpenseBreakdown {
            management: active.map_or(Decimal::ZERO, |s| s.rent * schedule.management_fee_rate),
            ..ExpenseBreakdown::default()
        };

        if lease_start {
            if let Some(segment) = active {
                match segment.kind {
                    SegmentKind::New => {
                        expenses.leasing = segment.rent * schedule.leasing_fee_rate;
                        if segment.marketing_fee {
                            expenses.marketing = schedule.marketing_fee;
                        }
                    }
                    SegmentKind::Renewal => {
                        expenses.renewal = segment.rent * schedule.renewal_fee_rate;
                    }
                }
            }
        }

        // Turnover from a segment that ended last month, charged regardless
        // of whether a follow-up lease already occupies this month.
        expenses.move_out = plan
            .vacated_segment(month)
            .map_or(Decimal::ZERO, |s| s.move_out_costs);

        expenses.hoa = schedule.hoa_monthly;
        if month == 1 {
            expenses.hoa += schedule.hoa_setup_fee;
        }

        expenses.utilities = match plan.utility_overrides.get(&month_index) {
            Some(amount) => *amount,
            None if active.is_none() => plan.vacancy_utilities,
            None => Decimal::ZERO,
        };

        if lease_end {
            expenses.survey = schedule.maintenance_survey_fee;
        }

        if let Some(entry) = plan.monthly_repairs.get(&month_index) {
            expenses.repair = entry.amount;
            if !entry.note.is_empty() {
                expenses.repair_note = Some(entry.note.clone());
            }
            if entry.amount > schedule.repair_coordination_threshold {
                expenses.coordination = entry.amount * schedule.repair_coordination_rate;
            }
        }

        let expense_total = expenses.total();
        let net = rent - expense_total - current_mortgage;

        total_income += rent;
        total_expenses += expense_total;
        total_mortgage += current_mortgage;

        let date = window
            .date_of(month)
            .ok_or(ComputeError::DateRange(month))?;

        rows.push(MonthRow {
            index: month,
            date,
            label: window.label_of(month),
            analysis_year: (month - 1) / 12 + 1,
            segment_kind: active.map(|s| s.kind),
            lease_start,
            lease_end,
            rent,
            expenses,
            mortgage: current_mortgage,
            net,
        });
    }

    Ok(Projection {
        rows,
        total_income,
        total_expenses,
        total_mortgage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{LeaseSegment, MoveOutDetails};

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    /// A one-year plan holding a single 12-month new lease at $2500 starting
    /// month 1, December 2025 anchor, no overrides.
    fn single_lease_plan() -> ForecastPlan {
        ForecastPlan {
            forecast_years: 1,
            ..ForecastPlan::default()
        }
    }

    #[test]
    fn test_first_month_of_new_lease_stacks_one_time_fees() {
        let plan = single_lease_plan();
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();
        assert_eq!(projection.rows.len(), 12);

        let first = &projection.rows[0];
        assert!(first.occupied());
        assert!(first.lease_start);
        assert_eq!(first.rent, dec(2500));
        // 0.5 * 2500 leasing + 150 marketing + 0.1 * 2500 management
        assert_eq!(first.expenses.leasing, dec(1250));
        assert_eq!(first.expenses.marketing, dec(150));
        assert_eq!(first.expenses.management, dec(250));
        // 240 dues + 150 one-time setup
        assert_eq!(first.expenses.hoa, dec(390));
        assert_eq!(first.expenses.utilities, Decimal::ZERO);
        assert_eq!(first.expenses.total(), dec(2040));
    }

    #[test]
    fn test_mid_lease_months_carry_only_recurring_fees() {
        let plan = single_lease_plan();
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();

        for row in &projection.rows[1..11] {
            assert_eq!(row.expenses.management, dec(250));
            assert_eq!(row.expenses.hoa, dec(240));
            assert_eq!(row.expenses.one_time(), Decimal::ZERO);
            assert_eq!(row.expenses.total(), dec(490));
        }
    }

    #[test]
    fn test_marketing_fee_respects_opt_out() {
        let mut plan = single_lease_plan();
        plan.lease_segments[0].marketing_fee = false;
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();
        assert_eq!(projection.rows[0].expenses.marketing, Decimal::ZERO);
        assert_eq!(projection.rows[0].expenses.leasing, dec(1250));
    }

    #[test]
    fn test_survey_fee_lands_on_final_lease_month() {
        let plan = single_lease_plan();
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();

        let last = &projection.rows[11];
        assert!(last.lease_end);
        assert_eq!(last.expenses.survey, dec(100));
        for row in &projection.rows[..11] {
            assert_eq!(row.expenses.survey, Decimal::ZERO);
        }
    }

    #[test]
    fn test_move_out_billed_month_after_lease_ends() {
        // Two-year window, lease covers months 1-12 only.
        let mut plan = single_lease_plan();
        plan.forecast_years = 2;
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();

        assert_eq!(projection.rows[11].expenses.move_out, Decimal::ZERO);
        assert_eq!(projection.rows[12].expenses.move_out, dec(550));
        assert!(!projection.rows[12].occupied());
    }

    #[test]
    fn test_move_out_dropped_when_lease_ends_at_window_edge() {
        // One-year window, lease ends in month 12; month 13 never exists.
        let plan = single_lease_plan();
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();
        let billed: Decimal = projection.rows.iter().map(|r| r.expenses.move_out).sum();
        assert_eq!(billed, Decimal::ZERO);
    }

    #[test]
    fn test_renewal_charges_renewal_fee_only() {
        let mut plan = single_lease_plan();
        plan.forecast_years = 2;
        plan.add_renewal();
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();

        // Renewal starts month 13; the previous lease's turnover is still
        // billed there, on top of the renewal fee.
        let renewal_start = &projection.rows[12];
        assert!(renewal_start.lease_start);
        assert_eq!(renewal_start.segment_kind, Some(SegmentKind::Renewal));
        assert_eq!(renewal_start.expenses.renewal, dec(250));
        assert_eq!(renewal_start.expenses.leasing, Decimal::ZERO);
        assert_eq!(renewal_start.expenses.marketing, Decimal::ZERO);
        assert_eq!(renewal_start.expenses.move_out, dec(550));
    }

    #[test]
    fn test_vacant_months_charge_vacancy_utilities() {
        let mut plan = single_lease_plan();
        plan.forecast_years = 2;
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();

        let vacant = &projection.rows[13];
        assert!(!vacant.occupied());
        assert_eq!(vacant.rent, Decimal::ZERO);
        assert_eq!(vacant.expenses.utilities, dec(150));
        assert_eq!(vacant.expenses.management, Decimal::ZERO);
    }

    #[test]
    fn test_utility_override_wins_over_vacancy_charge() {
        let mut plan = single_lease_plan();
        plan.forecast_years = 2;
        plan.set_utility_override(13, dec(80));
        // An override also applies while occupied ("tenant pays" otherwise).
        plan.set_utility_override(3, dec(45));
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();

        assert_eq!(projection.rows[13].expenses.utilities, dec(80));
        assert_eq!(projection.rows[3].expenses.utilities, dec(45));
    }

    #[test]
    fn test_large_repair_adds_coordination_surcharge() {
        let mut plan = single_lease_plan();
        plan.set_repair(4, dec(2500), "Water heater replacement".to_string());
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();

        let row = &projection.rows[4];
        assert_eq!(row.expenses.repair, dec(2500));
        assert_eq!(row.expenses.coordination, dec(250));
        assert_eq!(
            row.expenses.repair_note.as_deref(),
            Some("Water heater replacement")
        );
    }

    #[test]
    fn test_threshold_repair_has_no_surcharge() {
        let mut plan = single_lease_plan();
        plan.set_repair(4, dec(2000), String::new());
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();

        let row = &projection.rows[4];
        assert_eq!(row.expenses.repair, dec(2000));
        assert_eq!(row.expenses.coordination, Decimal::ZERO);
        assert_eq!(row.expenses.repair_note, None);
    }

    #[test]
    fn test_mortgage_override_is_sticky() {
        let mut plan = single_lease_plan();
        plan.set_mortgage_update(6, dec(1650));
        plan.set_mortgage_update(9, dec(1700));
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();

        assert!(projection.rows[..6].iter().all(|r| r.mortgage == dec(1500)));
        assert!(projection.rows[6..9].iter().all(|r| r.mortgage == dec(1650)));
        assert!(projection.rows[9..].iter().all(|r| r.mortgage == dec(1700)));
        assert_eq!(
            projection.total_mortgage,
            dec(1500 * 6 + 1650 * 3 + 1700 * 3)
        );
    }

    #[test]
    fn test_totals_accumulate_per_month_values() {
        let mut plan = single_lease_plan();
        plan.forecast_years = 2;
        plan.set_repair(2, dec(300), String::new());
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();

        let income: Decimal = projection.rows.iter().map(|r| r.rent).sum();
        let expenses: Decimal = projection.rows.iter().map(|r| r.expenses.total()).sum();
        let mortgage: Decimal = projection.rows.iter().map(|r| r.mortgage).sum();
        assert_eq!(projection.total_income, income);
        assert_eq!(projection.total_expenses, expenses);
        assert_eq!(projection.total_mortgage, mortgage);
        assert_eq!(projection.total_income, dec(2500 * 12));
        assert_eq!(
            projection.net_cash_flow(),
            income - expenses - mortgage
        );

        for row in &projection.rows {
            assert_eq!(row.net, row.rent - row.expenses.total() - row.mortgage);
        }
    }

    #[test]
    fn test_overlapping_segments_first_in_array_wins() {
        let mut plan = single_lease_plan();
        plan.lease_segments.push(LeaseSegment {
            id: 2,
            rent: dec(9000),
            move_out_costs: Decimal::ZERO,
            move_out_details: MoveOutDetails::default(),
            ..plan.lease_segments[0].clone()
        });
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();

        assert!(projection.rows.iter().all(|r| r.rent != dec(9000)));
        assert_eq!(projection.total_income, dec(2500 * 12));
    }

    #[test]
    fn test_calendar_labels_follow_window() {
        let plan = single_lease_plan();
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();
        assert_eq!(projection.rows[0].label, "Dec '25");
        assert_eq!(projection.rows[1].label, "Jan '26");
        assert_eq!(projection.rows[0].analysis_year, 1);

        let mut plan = single_lease_plan();
        plan.forecast_years = 2;
        let projection = generate(&plan, &FeeSchedule::default()).unwrap();
        assert_eq!(projection.rows[12].analysis_year, 2);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let mut plan = single_lease_plan();
        plan.forecast_years = 0;
        assert_eq!(
            generate(&plan, &FeeSchedule::default()),
            Err(ComputeError::InvalidHorizon(0))
        );

        let mut plan = single_lease_plan();
        plan.forecast_years = 11;
        assert_eq!(
            generate(&plan, &FeeSchedule::default()),
            Err(ComputeError::InvalidHorizon(11))
        );

        let mut plan = single_lease_plan();
        plan.analysis_start_month = 0;
        assert_eq!(
            generate(&plan, &FeeSchedule::default()),
            Err(ComputeError::InvalidStartMonth(0))
        );

        let mut plan = single_lease_plan();
        plan.lease_segments[0].duration = 0;
        assert_eq!(
            generate(&plan, &FeeSchedule::default()),
            Err(ComputeError::EmptySegment(1))
        );
    }
}
