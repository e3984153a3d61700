use common::{CashFlowTable, ExpenseLines, MonthlyCashFlow, OccupancyStatus, ProjectionTotals};
use compute::{MonthRow, Projection};
use model::SegmentKind;

/// Helper function to convert an engine projection into the transport table
pub fn projection_to_table(projection: &Projection) -> CashFlowTable {
    let rows = projection.rows.iter().map(month_row_to_cash_flow).collect();

    let totals = ProjectionTotals {
        income: projection.total_income,
        expenses: projection.total_expenses,
        mortgage: projection.total_mortgage,
        net_cash_flow: projection.net_cash_flow(),
    };

    CashFlowTable::new(rows, totals)
}

fn month_row_to_cash_flow(row: &MonthRow) -> MonthlyCashFlow {
    let status = match row.segment_kind {
        Some(SegmentKind::New) => OccupancyStatus::Leased,
        Some(SegmentKind::Renewal) => OccupancyStatus::Renewed,
        None => OccupancyStatus::Vacant,
    };

    MonthlyCashFlow {
        // Transport rows carry the zero-based index the override maps use.
        month_index: row.index - 1,
        date: row.date,
        label: row.label.clone(),
        analysis_year: row.analysis_year,
        status,
        lease_start: row.lease_start,
        lease_end: row.lease_end,
        rent: row.rent,
        expenses: ExpenseLines {
            management: row.expenses.management,
            leasing: row.expenses.leasing,
            renewal: row.expenses.renewal,
            marketing: row.expenses.marketing,
            hoa: row.expenses.hoa,
            utilities: row.expenses.utilities,
            survey: row.expenses.survey,
            repair: row.expenses.repair,
            coordination: row.expenses.coordination,
            move_out: row.expenses.move_out,
            repair_note: row.expenses.repair_note.clone(),
            total: row.expenses.total(),
        },
        mortgage: row.mortgage,
        net: row.net,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::ForecastPlan;
    use rust_decimal::Decimal;

    #[test]
    fn test_projection_converts_to_table() {
        let mut plan = ForecastPlan::default();
        plan.forecast_years = 2;
        plan.set_repair(4, Decimal::new(2500, 0), "Furnace".to_string());

        let projection = compute::project(&plan).unwrap();
        let table = projection_to_table(&projection);

        assert_eq!(table.month_count(), 24);
        assert_eq!(table.totals.income, projection.total_income);
        assert_eq!(table.totals.net_cash_flow, projection.net_cash_flow());

        let first = &table.rows[0];
        assert_eq!(first.month_index, 0);
        assert_eq!(first.status, OccupancyStatus::Leased);
        assert_eq!(first.expenses.total, projection.rows[0].expenses.total());

        let repaired = &table.rows[4];
        assert_eq!(repaired.expenses.repair, Decimal::new(2500, 0));
        assert_eq!(repaired.expenses.coordination, Decimal::new(250, 0));
        assert_eq!(repaired.expenses.repair_note.as_deref(), Some("Furnace"));

        let vacant = &table.rows[13];
        assert_eq!(vacant.status, OccupancyStatus::Vacant);
    }
}
