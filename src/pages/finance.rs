//! Finance page: cash-flow cards, six-month series and the transaction table.

use crate::{
    core::{
        finance::{
            FinanceFilter, FinanceSummary, FinancialTransaction, MonthlyFlow, TransactionStatus,
            monthly_flows,
        },
        seed,
    },
    pages::{PageKind, list_section, rows_or_seed},
    query::{QueryKey, QueryState},
    ui::{
        Bar, Chart, Page, Section, Shell, StatsCard, Table,
        format::{currency, date},
    },
};
use chrono::NaiveDate;

/// Months covered by the cash-flow chart, the current one included.
pub const CHART_MONTHS: u32 = 6;

#[must_use]
pub fn build(
    state: &QueryState<FinancialTransaction>,
    filter: &FinanceFilter,
    today: NaiveDate,
) -> Page {
    let all = rows_or_seed(state, seed::financial_transactions);
    let summary = FinanceSummary::from_transactions(&all);
    let cards = vec![
        Shell::Stats(StatsCard::new("Inflows", currency(summary.inflows)).with_subtitle("completed")),
        Shell::Stats(StatsCard::new("Outflows", currency(summary.outflows)).with_subtitle("completed")),
        Shell::Stats(StatsCard::new("Balance", currency(summary.balance))),
        Shell::Stats(StatsCard::new("Pending", currency(summary.pending))),
    ];

    let flows = monthly_flows(&all, today, CHART_MONTHS);
    let charts = vec![
        Shell::Chart(flow_chart("Inflows by month", &flows, |f| f.inflows)),
        Shell::Chart(flow_chart("Outflows by month", &flows, |f| f.outflows)),
    ];

    Page::new(PageKind::Finance.title())
        .with_section(Section::new("Summary", cards))
        .with_section(Section::new("Cash flow", charts))
        .with_section(list_section(
            "Transactions",
            state,
            QueryKey::FinancialTransactions,
            |rows| transaction_table(rows, filter),
        ))
}

fn flow_chart(title: &str, flows: &[MonthlyFlow], value: impl Fn(&MonthlyFlow) -> f64) -> Chart {
    Chart {
        title: title.to_string(),
        bars: flows
            .iter()
            .map(|flow| Bar {
                label: flow.label(),
                value: value(flow),
                display: currency(value(flow)),
            })
            .collect(),
    }
}

fn transaction_table(rows: &[FinancialTransaction], filter: &FinanceFilter) -> Vec<Shell> {
    if rows.is_empty() {
        return vec![Shell::empty("No transactions recorded yet")];
    }
    let visible = filter.apply(rows);
    if visible.is_empty() {
        return vec![Shell::empty("No transactions match the filters")];
    }

    let mut table = Table::new(["Date", "Description", "Category", "Status", "Amount"]);
    for tx in &visible {
        table.push_row(vec![
            date(&tx.created_at),
            tx.description_or_category().to_string(),
            tx.category.clone(),
            match tx.status {
                TransactionStatus::Pending => "pending".to_string(),
                TransactionStatus::Completed => "completed".to_string(),
            },
            format!("{}{}", tx.kind.sign(), currency(tx.amount)),
        ]);
    }
    vec![Shell::Table(table)]
}
