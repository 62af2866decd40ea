//! Sales page: paid revenue cards and the order table.

use crate::{
    core::{
        customer::Customer,
        sale::{SaleFilter, SaleListing, SalesOrder, SalesSummary, with_customer_names},
        seed,
    },
    pages::{PageKind, list_section, rows_or_seed},
    query::{QueryKey, QueryState},
    ui::{
        Page, Section, Shell, StatsCard, Table,
        format::{currency, date},
    },
};

#[must_use]
pub fn build(
    orders: &QueryState<SalesOrder>,
    customers: &QueryState<Customer>,
    filter: &SaleFilter,
) -> Page {
    let summary = SalesSummary::from_orders(&rows_or_seed(orders, seed::sales_orders));
    let cards = vec![
        Shell::Stats(StatsCard::new("Paid orders", summary.paid_count.to_string())),
        Shell::Stats(StatsCard::new("Revenue", currency(summary.revenue))),
        Shell::Stats(StatsCard::new("Average ticket", currency(summary.average_ticket))),
    ];

    // Seed names stand in while the customer list is unavailable.
    let names = rows_or_seed(customers, seed::customers);

    Page::new(PageKind::Sales.title())
        .with_section(Section::new("Summary", cards))
        .with_section(list_section("Orders", orders, QueryKey::SalesOrders, |rows| {
            order_table(&with_customer_names(rows, &names), filter)
        }))
}

fn order_table(listings: &[SaleListing], filter: &SaleFilter) -> Vec<Shell> {
    if listings.is_empty() {
        return vec![Shell::empty("No sales recorded yet")];
    }
    let visible = filter.apply(listings);
    if visible.is_empty() {
        return vec![Shell::empty("No sales match the filters")];
    }

    let mut table = Table::new(["Order", "Customer", "Date", "Payment", "Status", "Total"]);
    for listing in visible {
        let order = &listing.order;
        table.push_row(vec![
            format!("#{}", order.id),
            listing.customer_name.clone(),
            date(&order.created_at),
            order.payment_method.clone().unwrap_or_else(|| "-".to_string()),
            order.status.to_string(),
            currency(order.total),
        ]);
    }
    vec![Shell::Table(table)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{SearchTerm, Selector};
    use crate::core::sale::{SaleStatus, WALK_IN_CUSTOMER};
    use crate::query::QueryStatus;
    use std::sync::Arc;

    fn loaded<T>(rows: Vec<T>) -> QueryState<T> {
        QueryState {
            status: QueryStatus::Success,
            data: Some(Arc::new(rows)),
            is_fetching: false,
            updated_at: None,
        }
    }

    fn table_of(page: &Page) -> Table {
        page.section("Orders")
            .and_then(|s| {
                s.shells.iter().find_map(|shell| match shell {
                    Shell::Table(table) => Some(table.clone()),
                    _ => None,
                })
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_summary_counts_paid_orders_only() {
        let page = build(
            &loaded(seed::sales_orders()),
            &loaded(seed::customers()),
            &SaleFilter::default(),
        );
        let summary = &page.sections[0].shells;
        assert_eq!(summary[0], Shell::Stats(StatsCard::new("Paid orders", "4")));
        assert_eq!(summary[1], Shell::Stats(StatsCard::new("Revenue", "R$ 5.780,00")));
        assert_eq!(summary[2], Shell::Stats(StatsCard::new("Average ticket", "R$ 1.445,00")));
    }

    #[test]
    fn test_walk_in_sale_is_searchable() {
        let filter = SaleFilter {
            search: SearchTerm::new("walk-in"),
            status: Selector::All,
        };
        let page = build(&loaded(seed::sales_orders()), &loaded(seed::customers()), &filter);
        let table = table_of(&page);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][1], WALK_IN_CUSTOMER);
    }

    #[test]
    fn test_status_filter() {
        let filter = SaleFilter {
            status: Selector::Only(SaleStatus::Cancelled),
            ..Default::default()
        };
        let page = build(&loaded(seed::sales_orders()), &loaded(seed::customers()), &filter);
        let table = table_of(&page);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][3], "Dinheiro");
    }

    #[test]
    fn test_failed_customers_do_not_block_orders() {
        let customers = QueryState {
            status: QueryStatus::Error("timeout".to_string()),
            data: None,
            is_fetching: false,
            updated_at: None,
        };
        let page = build(&loaded(seed::sales_orders()), &customers, &SaleFilter::default());
        assert_eq!(table_of(&page).rows.len(), 6);
    }
}
