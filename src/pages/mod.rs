//! Pages - view-state to shells.
//!
//! Each page takes the query states it needs plus its filters and returns a
//! [`Page`]. Summary cards fall back to the seed records while a list has no
//! data. List sections show the error (with a retry target) or a loading
//! placeholder instead, so one failed list never blanks the whole page.

use crate::{
    errors::Error,
    query::{QueryKey, QueryState},
    ui::{Section, Shell},
};
use std::fmt;
use std::str::FromStr;

pub mod customers;
pub mod dashboard;
pub mod finance;
pub mod inventory;
pub mod sales;
pub mod settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageKind {
    #[default]
    Dashboard,
    Inventory,
    Sales,
    Customers,
    Finance,
    Settings,
}

impl PageKind {
    pub const ALL: [Self; 6] = [
        Self::Dashboard,
        Self::Inventory,
        Self::Sales,
        Self::Customers,
        Self::Finance,
        Self::Settings,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Inventory => "inventory",
            Self::Sales => "sales",
            Self::Customers => "customers",
            Self::Finance => "finance",
            Self::Settings => "settings",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Inventory => "Inventory",
            Self::Sales => "Sales",
            Self::Customers => "Customers",
            Self::Finance => "Finance",
            Self::Settings => "Settings",
        }
    }
}

impl FromStr for PageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| Error::Config {
                message: format!("unknown page '{s}'"),
            })
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows for summary cards: the live rows, or the seed while none arrived.
pub(crate) fn rows_or_seed<T: Clone>(state: &QueryState<T>, seed: impl FnOnce() -> Vec<T>) -> Vec<T> {
    state.data.as_deref().map_or_else(seed, Clone::clone)
}

/// A list section for `state`. `content` only sees live rows.
pub(crate) fn list_section<T>(
    title: &str,
    state: &QueryState<T>,
    key: QueryKey,
    content: impl FnOnce(&[T]) -> Vec<Shell>,
) -> Section {
    let mut shells = Vec::new();
    if let Some(message) = state.error() {
        shells.push(Shell::error(
            format!("Could not load {}: {message}", key.as_str().replace('_', " ")),
            format!("refetch {}", key.as_str()),
        ));
    }
    match &state.data {
        Some(rows) => shells.extend(content(rows)),
        None if state.error().is_none() => shells.push(Shell::loading(title.to_lowercase())),
        None => {}
    }
    Section::new(title, shells)
}
