use std::fmt::Write;

use common::{CashFlowTable, OccupancyStatus};

fn status_label(status: OccupancyStatus) -> &'static str {
    match status {
        OccupancyStatus::Leased => "leased",
        OccupancyStatus::Renewed => "renewed",
        OccupancyStatus::Vacant => "vacant",
    }
}

/// Renders the month-by-month table and totals for terminal output.
pub fn render_table(table: &CashFlowTable) -> String {
    let mut out = String::new();

    writeln!(
        out,
        "{:<8} {:<8} {:>10} {:>12} {:>10} {:>12}",
        "Month", "Status", "Rent", "Expenses", "Mortgage", "Net"
    )
    .unwrap();

    let mut current_year = 0;
    for row in &table.rows {
        if row.analysis_year != current_year {
            current_year = row.analysis_year;
            writeln!(out, "--- Analysis year {} ---", current_year).unwrap();
        }
        writeln!(
            out,
            "{:<8} {:<8} {:>10} {:>12} {:>10} {:>12}",
            row.label,
            status_label(row.status),
            row.rent,
            row.expenses.total,
            row.mortgage,
            row.net
        )
        .unwrap();
    }

    writeln!(out).unwrap();
    writeln!(out, "Gross income:  {:>12}", table.totals.income).unwrap();
    writeln!(out, "Expenses:      {:>12}", table.totals.expenses).unwrap();
    writeln!(out, "Mortgage:      {:>12}", table.totals.mortgage).unwrap();
    writeln!(out, "Net cash flow: {:>12}", table.totals.net_cash_flow).unwrap();

    out
}
