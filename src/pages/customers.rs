//! Customers page: customer cards with purchase counts.

use crate::{
    core::{
        customer::{Customer, CustomerFilter, CustomerSummary},
        seed,
    },
    pages::{PageKind, list_section, rows_or_seed},
    query::{QueryKey, QueryState},
    ui::{ListItem, Page, Section, Shell, StatsCard, format::mask_phone},
};

#[must_use]
pub fn build(state: &QueryState<Customer>, filter: &CustomerFilter) -> Page {
    let summary = CustomerSummary::from_customers(&rows_or_seed(state, seed::customers));
    let cards = vec![
        Shell::Stats(StatsCard::new("Customers", summary.customer_count.to_string())),
        Shell::Stats(
            StatsCard::new("Active", summary.active_count.to_string())
                .with_subtitle("with at least one purchase"),
        ),
        Shell::Stats(StatsCard::new("Purchases", summary.total_purchases.to_string())),
    ];

    Page::new(PageKind::Customers.title())
        .with_section(Section::new("Summary", cards))
        .with_section(list_section("Customers", state, QueryKey::Customers, |rows| {
            customer_cards(rows, filter)
        }))
}

fn customer_cards(rows: &[Customer], filter: &CustomerFilter) -> Vec<Shell> {
    if rows.is_empty() {
        return vec![Shell::empty("No customers registered yet")];
    }
    let visible = filter.apply(rows);
    if visible.is_empty() {
        return vec![Shell::empty("No customers match the search")];
    }
    visible.iter().map(|c| Shell::ListItem(card(c))).collect()
}

fn card(customer: &Customer) -> ListItem {
    let mut meta = vec![customer.email.clone()];
    if !customer.phone.is_empty() {
        meta.push(mask_phone(&customer.phone));
    }
    if !customer.city.is_empty() {
        meta.push(customer.city.clone());
    }
    ListItem {
        title: customer.name.clone(),
        subtitle: None,
        meta,
        badge: customer
            .total_purchases
            .map(|count| format!("{count} purchases")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::SearchTerm;
    use crate::query::QueryStatus;
    use std::sync::Arc;

    fn loaded(rows: Vec<Customer>) -> QueryState<Customer> {
        QueryState {
            status: QueryStatus::Success,
            data: Some(Arc::new(rows)),
            is_fetching: false,
            updated_at: None,
        }
    }

    #[test]
    fn test_summary_from_seed_customers() {
        let page = build(&loaded(seed::customers()), &CustomerFilter::default());
        let summary = &page.sections[0].shells;
        assert_eq!(summary[0], Shell::Stats(StatsCard::new("Customers", "5")));
        assert_eq!(summary[2], Shell::Stats(StatsCard::new("Purchases", "30")));
    }

    #[test]
    fn test_search_by_phone_digits() {
        let filter = CustomerFilter {
            search: SearchTerm::new("(21)"),
        };
        let page = build(&loaded(seed::customers()), &filter);
        let cards = &page.sections[1].shells;
        assert_eq!(cards.len(), 1);
        assert!(matches!(&cards[0], Shell::ListItem(item) if item.title == "Ana Costa"));
    }

    #[test]
    fn test_card_skips_blank_contact_fields() {
        let customer = Customer {
            id: 1,
            name: "Pedro Lima".to_string(),
            email: "pedro@email.com".to_string(),
            phone: String::new(),
            city: String::new(),
            total_purchases: None,
        };
        let item = card(&customer);
        assert_eq!(item.meta, vec!["pedro@email.com".to_string()]);
        assert!(item.badge.is_none());
    }
}
