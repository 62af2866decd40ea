//! Dashboard overview - revenue trend, payment mix, recent sales and stock
//! alerts computed from the live lists.
//!
//! Everything here is a pure fold over lists the caller already loaded; the
//! caller passes `today` so the seven-day window is deterministic.

use crate::core::{
    filter::average,
    product::{Product, low_stock},
    sale::{SaleListing, SaleStatus},
};
use chrono::{Days, NaiveDate};

/// How many days the revenue chart covers, today included.
pub const REVENUE_WINDOW_DAYS: u64 = 7;
/// How many sales the "recent sales" table shows.
pub const RECENT_SALES: usize = 5;
/// Label for orders without a payment method.
pub const UNSPECIFIED_METHOD: &str = "Unspecified";

/// Paid revenue on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub total: f64,
}

impl DailyRevenue {
    /// Short weekday name, e.g. "Wed".
    #[must_use]
    pub fn label(&self) -> String {
        self.date.format("%a").to_string()
    }
}

/// Number of orders paid with one method and its share of all counted orders.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentShare {
    pub method: String,
    pub count: usize,
    /// 0-100
    pub share_percent: f64,
}

/// Data behind every dashboard section.
#[derive(Debug, Clone)]
pub struct DashboardOverview {
    /// Oldest day first
    pub daily_revenue: Vec<DailyRevenue>,
    pub revenue_total: f64,
    /// First day with the highest revenue; `None` without revenue
    pub peak_day: Option<DailyRevenue>,
    pub daily_average: f64,
    /// Most used method first
    pub payment_mix: Vec<PaymentShare>,
    pub recent_sales: Vec<SaleListing>,
    pub low_stock: Vec<Product>,
}

impl DashboardOverview {
    /// Builds the overview from sales listings (newest first) and products.
    #[must_use]
    pub fn compute(sales: &[SaleListing], products: &[Product], today: NaiveDate) -> Self {
        let daily_revenue = daily_revenue(sales, today);
        let revenue_total: f64 = daily_revenue.iter().map(|d| d.total).sum();
        let peak_day = daily_revenue
            .iter()
            .fold(None::<&DailyRevenue>, |best, day| match best {
                Some(b) if day.total <= b.total => Some(b),
                _ if day.total > 0.0 => Some(day),
                _ => best,
            })
            .cloned();

        Self {
            daily_average: average(revenue_total, daily_revenue.len()),
            revenue_total,
            peak_day,
            daily_revenue,
            payment_mix: payment_mix(sales),
            recent_sales: sales.iter().take(RECENT_SALES).cloned().collect(),
            low_stock: low_stock(products),
        }
    }

    /// The most used payment method, if any order was counted.
    #[must_use]
    pub fn top_payment_method(&self) -> Option<&PaymentShare> {
        self.payment_mix.first()
    }
}

fn daily_revenue(sales: &[SaleListing], today: NaiveDate) -> Vec<DailyRevenue> {
    (0..REVENUE_WINDOW_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| DailyRevenue {
            date,
            total: sales
                .iter()
                .filter(|s| s.order.is_paid() && s.order.created_at.date_naive() == date)
                .map(|s| s.order.total)
                .sum(),
        })
        .collect()
}

fn payment_mix(sales: &[SaleListing]) -> Vec<PaymentShare> {
    let counted: Vec<&SaleListing> = sales
        .iter()
        .filter(|s| s.order.status != SaleStatus::Cancelled)
        .collect();

    let mut mix: Vec<PaymentShare> = Vec::new();
    for sale in &counted {
        let method = sale
            .order
            .payment_method
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(UNSPECIFIED_METHOD);
        match mix.iter_mut().find(|m| m.method == method) {
            Some(share) => share.count += 1,
            None => mix.push(PaymentShare {
                method: method.to_string(),
                count: 1,
                share_percent: 0.0,
            }),
        }
    }

    // Cast safety: order counts stay far below 2^52.
    #[allow(clippy::cast_precision_loss)]
    let total = counted.len() as f64;
    for share in &mut mix {
        #[allow(clippy::cast_precision_loss)]
        let count = share.count as f64;
        share.share_percent = count * 100.0 / total;
    }
    // Stable sort keeps first-seen order among ties.
    mix.sort_by(|a, b| b.count.cmp(&a.count));
    mix
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{sale::with_customer_names, seed};

    fn overview(today: NaiveDate) -> DashboardOverview {
        let sales = with_customer_names(&seed::sales_orders(), &seed::customers());
        DashboardOverview::compute(&sales, &seed::products(), today)
    }

    #[test]
    fn test_revenue_window_counts_paid_sales() {
        let overview = overview(NaiveDate::from_ymd_opt(2024, 12, 4).unwrap());
        assert_eq!(overview.daily_revenue.len(), 7);
        assert_eq!(overview.daily_revenue.last().unwrap().total, 1250.0);
        assert_eq!(overview.revenue_total, 1250.0 + 2100.0 + 1780.0 + 650.0);
        assert_eq!(overview.daily_average, overview.revenue_total / 7.0);
    }

    #[test]
    fn test_peak_day_is_highest_revenue() {
        let overview = overview(NaiveDate::from_ymd_opt(2024, 12, 4).unwrap());
        let peak = overview.peak_day.unwrap();
        assert_eq!(peak.date, NaiveDate::from_ymd_opt(2024, 12, 2).unwrap());
        assert_eq!(peak.total, 1780.0 + 650.0);
    }

    #[test]
    fn test_empty_window_has_no_peak_and_zero_average() {
        let overview = overview(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert!(overview.peak_day.is_none());
        assert_eq!(overview.revenue_total, 0.0);
        assert_eq!(overview.daily_average, 0.0);
    }

    #[test]
    fn test_payment_mix_excludes_cancelled_orders() {
        let overview = overview(NaiveDate::from_ymd_opt(2024, 12, 4).unwrap());
        let total: usize = overview.payment_mix.iter().map(|m| m.count).sum();
        assert_eq!(total, 5);
        assert!(overview.payment_mix.iter().all(|m| m.method != "Dinheiro"));
        let top = overview.top_payment_method().unwrap();
        assert_eq!(top.method, "Cartão Crédito");
        assert_eq!(top.share_percent, 40.0);
    }

    #[test]
    fn test_recent_sales_and_low_stock() {
        let overview = overview(NaiveDate::from_ymd_opt(2024, 12, 4).unwrap());
        assert_eq!(overview.recent_sales.len(), RECENT_SALES);
        assert_eq!(overview.recent_sales[0].order.id, 1);
        assert_eq!(overview.low_stock.len(), 2);
        assert_eq!(overview.low_stock[0].sku, "VX-XS-02");
    }

    #[test]
    fn test_empty_lists() {
        let overview =
            DashboardOverview::compute(&[], &[], NaiveDate::from_ymd_opt(2024, 12, 4).unwrap());
        assert!(overview.payment_mix.is_empty());
        assert!(overview.top_payment_method().is_none());
        assert!(overview.recent_sales.is_empty());
    }
}
