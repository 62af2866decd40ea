//! Building blocks shared by every page's view-state: free-text matching,
//! categorical selectors and the folds used by summary cards.

/// A categorical filter value. `All` is the no-op selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<T> {
    /// Matches every row
    All,
    /// Matches rows whose field equals the value
    Only(T),
}

// Written by hand: the derive would require `T: Default`.
impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selector<T> {
    /// Returns true when `value` passes this selector.
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    /// Whether this selector narrows the list at all.
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Only(_))
    }
}

/// A normalized free-text search term.
///
/// The term is trimmed and lowercased once so matching a long list does not
/// re-normalize it per row. A blank term matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Normalizes the raw text typed by the user.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// True when the term is blank and filters nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive containment against any of `fields`.
    #[must_use]
    pub fn matches_any(&self, fields: &[&str]) -> bool {
        self.is_empty()
            || fields
                .iter()
                .any(|field| field.to_lowercase().contains(&self.0))
    }
}

impl From<&str> for SearchTerm {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Sums `value` over `items`. Empty input sums to zero.
pub fn sum_by<T>(items: &[T], value: impl Fn(&T) -> f64) -> f64 {
    items.iter().map(value).sum()
}

/// Arithmetic mean of `total` over `count` items; zero when `count` is zero.
#[must_use]
pub fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    // Cast safety: list lengths on a dashboard stay far below 2^52.
    #[allow(clippy::cast_precision_loss)]
    let count = count as f64;
    total / count
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_selector_all_accepts_everything() {
        let selector: Selector<&str> = Selector::All;
        assert!(selector.accepts(&"Lentes"));
        assert!(!selector.is_active());
    }

    #[test]
    fn test_selector_only_accepts_equal_values() {
        let selector = Selector::Only("Lentes");
        assert!(selector.accepts(&"Lentes"));
        assert!(!selector.accepts(&"Armações"));
        assert!(selector.is_active());
    }

    #[test]
    fn test_search_term_is_case_insensitive() {
        let term = SearchTerm::new("  RAY-ban ");
        assert!(term.matches_any(&["Óculos Ray-Ban Aviador"]));
        assert!(!term.matches_any(&["Oakley", "OK-CL-01"]));
    }

    #[test]
    fn test_blank_search_term_matches_everything() {
        let term = SearchTerm::new("   ");
        assert!(term.is_empty());
        assert!(term.matches_any(&[]));
    }

    #[test]
    fn test_sum_and_average_of_empty_list_are_zero() {
        let empty: Vec<f64> = Vec::new();
        assert_eq!(sum_by(&empty, |v| *v), 0.0);
        assert_eq!(average(0.0, 0), 0.0);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(300.0, 4), 75.0);
    }
}
