//! Retail dashboard - a back-office client for a small optical store
//!
//! This crate reads products, customers, sales orders and financial transactions
//! from a remote store, caches each list behind a stale-time query cache, and
//! renders dashboard, inventory, sales, customer, finance and settings pages with
//! search filters, aggregates and CSV export.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    // Documentation - missing docs should be added gradually
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,
    clippy::nursery,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_types_passed_by_value,
    clippy::needless_pass_by_value,
    clippy::unnecessary_wraps,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Complexity and readability
    clippy::cognitive_complexity,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::too_many_lines,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Dashboard root wiring configuration, queries, theme and pages
pub mod app;
/// Configuration management for the store endpoint and application settings
pub mod config;
/// Core business logic - filters, validation, aggregates and export
pub mod core;
/// SeaORM entity definitions for the store's tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// User-facing success and error notifications
pub mod notify;
/// Page builders turning query states into renderable sections
pub mod pages;
/// Query cache and client for reads and mutations
pub mod query;
/// Remote store backends
pub mod store;
/// Light and dark theme with persisted preference
pub mod theme;
/// Presentational shells and value formatting
pub mod ui;

#[cfg(test)]
pub mod test_utils;
