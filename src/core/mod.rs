//! Core business logic - framework-agnostic records, filters and aggregates.
//!
//! Nothing in here talks to the store. Each page module maps storage rows to
//! display records, filters them, and folds them into summary cards.

/// Customer records, search and summary
pub mod customer;
/// Dashboard overview aggregates
pub mod dashboard;
/// Inventory CSV export
pub mod export;
/// Search terms, selectors and folds shared by every page
pub mod filter;
/// Financial transactions, cash-flow summary and monthly series
pub mod finance;
/// Inventory records, stock classification and summary
pub mod product;
/// Sales orders, status decoding and summary
pub mod sale;
/// Fallback records used before live data arrives
pub mod seed;
/// Store profile and its validation
pub mod settings;
/// Client-side form validation
pub mod validation;
