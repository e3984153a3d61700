use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Occupancy status of a month as shown in the breakdown table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyStatus {
    /// Occupied under a new-tenant lease.
    Leased,
    /// Occupied under a renewal.
    Renewed,
    Vacant,
}

/// Itemized expense lines for a single month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExpenseLines {
    pub management: Decimal,
    pub leasing: Decimal,
    pub renewal: Decimal,
    pub marketing: Decimal,
    pub hoa: Decimal,
    pub utilities: Decimal,
    pub survey: Decimal,
    pub repair: Decimal,
    pub coordination: Decimal,
    pub move_out: Decimal,
    pub repair_note: Option<String>,
    /// Sum of all lines above.
    pub total: Decimal,
}

/// One month of the cash-flow table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyCashFlow {
    /// Zero-based month index, the same key the override maps use.
    pub month_index: u32,
    /// First day of the calendar month (YYYY-MM-DD).
    pub date: NaiveDate,
    /// Short display label, e.g. `Dec '25`.
    pub label: String,
    /// 1-based analysis year.
    pub analysis_year: u32,
    pub status: OccupancyStatus,
    pub lease_start: bool,
    pub lease_end: bool,
    pub rent: Decimal,
    pub expenses: ExpenseLines,
    pub mortgage: Decimal,
    /// rent − expenses − mortgage
    pub net: Decimal,
}

/// Horizon-wide running totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectionTotals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub mortgage: Decimal,
    /// income − expenses − mortgage
    pub net_cash_flow: Decimal,
}

/// The complete projection payload: per-month rows plus totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CashFlowTable {
    pub rows: Vec<MonthlyCashFlow>,
    pub totals: ProjectionTotals,
}

impl CashFlowTable {
    pub fn new(rows: Vec<MonthlyCashFlow>, totals: ProjectionTotals) -> Self {
        Self { rows, totals }
    }

    pub fn month_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(OccupancyStatus::Leased).unwrap(),
            "leased"
        );
        assert_eq!(
            serde_json::to_value(OccupancyStatus::Vacant).unwrap(),
            "vacant"
        );
    }

    #[test]
    fn test_table_round_trip() {
        let table = CashFlowTable::new(
            vec![MonthlyCashFlow {
                month_index: 0,
                date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
                label: "Dec '25".to_string(),
                analysis_year: 1,
                status: OccupancyStatus::Leased,
                lease_start: true,
                lease_end: false,
                rent: Decimal::new(2500, 0),
                expenses: ExpenseLines {
                    management: Decimal::new(250, 0),
                    total: Decimal::new(250, 0),
                    ..ExpenseLines::default()
                },
                mortgage: Decimal::new(1500, 0),
                net: Decimal::new(750, 0),
            }],
            ProjectionTotals::default(),
        );

        let json = serde_json::to_string(&table).unwrap();
        let restored: CashFlowTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);
        assert_eq!(restored.month_count(), 1);
    }
}
