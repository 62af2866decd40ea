//! Dashboard page: the week's revenue, payment mix, latest sales and stock
//! alerts.

use crate::{
    core::{
        customer::Customer,
        dashboard::{DashboardOverview, REVENUE_WINDOW_DAYS},
        product::Product,
        sale::{SalesOrder, with_customer_names},
        seed,
    },
    pages::{PageKind, list_section, rows_or_seed},
    query::{QueryKey, QueryState},
    ui::{
        Bar, Chart, Page, Section, Shell, StatsCard, Table,
        format::{currency, date, percent},
    },
};
use chrono::NaiveDate;

#[must_use]
pub fn build(
    orders: &QueryState<SalesOrder>,
    customers: &QueryState<Customer>,
    products: &QueryState<Product>,
    today: NaiveDate,
) -> Page {
    let sales = with_customer_names(
        &rows_or_seed(orders, seed::sales_orders),
        &rows_or_seed(customers, seed::customers),
    );
    let overview = DashboardOverview::compute(
        &sales,
        &rows_or_seed(products, seed::products),
        today,
    );

    let peak = overview.peak_day.as_ref().map_or_else(
        || StatsCard::new("Peak day", "-"),
        |day| StatsCard::new("Peak day", day.label()).with_subtitle(currency(day.total)),
    );
    let top_method = overview.top_payment_method().map_or_else(
        || StatsCard::new("Top payment method", "-"),
        |share| {
            StatsCard::new("Top payment method", share.method.clone())
                .with_subtitle(percent(share.share_percent))
        },
    );
    let cards = vec![
        Shell::Stats(
            StatsCard::new("Revenue", currency(overview.revenue_total))
                .with_subtitle(format!("last {REVENUE_WINDOW_DAYS} days")),
        ),
        Shell::Stats(StatsCard::new("Daily average", currency(overview.daily_average))),
        Shell::Stats(peak),
        Shell::Stats(top_method),
    ];

    let revenue_chart = Chart {
        title: "Revenue per day".to_string(),
        bars: overview
            .daily_revenue
            .iter()
            .map(|day| Bar {
                label: day.label(),
                value: day.total,
                display: currency(day.total),
            })
            .collect(),
    };
    let payment_chart = Chart {
        title: "Payment methods".to_string(),
        bars: overview
            .payment_mix
            .iter()
            .map(|share| Bar {
                label: share.method.clone(),
                value: share.share_percent,
                display: format!("{} ({})", share.count, percent(share.share_percent)),
            })
            .collect(),
    };

    Page::new(PageKind::Dashboard.title())
        .with_section(Section::new("Overview", cards))
        .with_section(Section::new(
            "Charts",
            vec![Shell::Chart(revenue_chart), Shell::Chart(payment_chart)],
        ))
        .with_section(list_section("Recent sales", orders, QueryKey::SalesOrders, |_| {
            recent_sales(&overview)
        }))
        .with_section(list_section("Low stock", products, QueryKey::Products, |_| {
            low_stock(&overview)
        }))
}

fn recent_sales(overview: &DashboardOverview) -> Vec<Shell> {
    if overview.recent_sales.is_empty() {
        return vec![Shell::empty("No sales yet")];
    }
    let mut table = Table::new(["Customer", "Date", "Status", "Total"]);
    for sale in &overview.recent_sales {
        table.push_row(vec![
            sale.customer_name.clone(),
            date(&sale.order.created_at),
            sale.order.status.to_string(),
            currency(sale.order.total),
        ]);
    }
    vec![Shell::Table(table)]
}

fn low_stock(overview: &DashboardOverview) -> Vec<Shell> {
    if overview.low_stock.is_empty() {
        return vec![Shell::empty("Every product is above its minimum")];
    }
    let mut table = Table::new(["Product", "SKU", "Stock", "Minimum"]);
    for product in &overview.low_stock {
        table.push_row(vec![
            product.name.clone(),
            product.sku.clone(),
            product.stock.to_string(),
            product.min_stock.to_string(),
        ]);
    }
    vec![Shell::Table(table)]
}
