//! Client-side validation of form payloads.
//!
//! Validation never touches the store. Every failing field gets one message
//! and the whole set is returned at once so a form can show all of them.

use std::collections::BTreeMap;
use std::fmt;

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Sku,
    Category,
    Brand,
    Price,
    MinStock,
    Email,
    Phone,
    PostalCode,
    PaymentMethod,
    Total,
    Amount,
}

impl Field {
    /// Label used when printing the error next to the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Sku => "sku",
            Self::Category => "category",
            Self::Brand => "brand",
            Self::Price => "price",
            Self::MinStock => "min_stock",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::PostalCode => "postal_code",
            Self::PaymentMethod => "payment_method",
            Self::Total => "total",
            Self::Amount => "amount",
        }
    }
}

/// Per-field validation messages, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`; the first message for a field wins.
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors.
    pub fn into_result(self) -> crate::errors::Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(crate::errors::Error::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, msg)| format!("{}: {msg}", field.label()))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Keeps only ASCII digits.
#[must_use]
pub fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Accepts `local@domain.tld` with no whitespace and exactly one `@`.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Area code plus 8 or 9 digits.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    (10..=11).contains(&digits(value).len())
}

/// Postal codes (CEP) have exactly 8 digits.
#[must_use]
pub fn is_valid_postal_code(value: &str) -> bool {
    digits(value).len() == 8
}

/// Records an error when `value` is blank.
pub fn require(errors: &mut FieldErrors, field: Field, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "required");
    }
}

/// Records an error unless `amount` is finite and non-negative.
pub fn require_amount(errors: &mut FieldErrors, field: Field, amount: f64) {
    if !amount.is_finite() || amount < 0.0 {
        errors.add(field, "must be a non-negative number");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("contato@policromatico.com"));
        assert!(!is_valid_email("contato@policromatico"));
        assert!(!is_valid_email("contato policromatico@x.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@@x.com"));
        assert!(!is_valid_email("a@.com"));
    }

    #[test]
    fn test_phone_requires_ten_or_eleven_digits() {
        assert!(is_valid_phone("(11) 3333-4444"));
        assert!(is_valid_phone("(11) 99999-0001"));
        assert!(!is_valid_phone("3333-4444"));
        assert!(!is_valid_phone("(11) 99999-00011"));
    }

    #[test]
    fn test_postal_code_requires_eight_digits() {
        assert!(is_valid_postal_code("01000-000"));
        assert!(!is_valid_postal_code("0100-000"));
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.add(Field::Email, "invalid e-mail");
        errors.add(Field::Email, "second");
        assert_eq!(errors.get(Field::Email), Some("invalid e-mail"));
        assert_eq!(errors.len(), 1);
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_require_amount_rejects_negative_and_nan() {
        let mut errors = FieldErrors::new();
        require_amount(&mut errors, Field::Price, -1.0);
        require_amount(&mut errors, Field::Total, f64::NAN);
        require_amount(&mut errors, Field::Amount, 0.0);
        assert!(errors.get(Field::Price).is_some());
        assert!(errors.get(Field::Total).is_some());
        assert!(errors.get(Field::Amount).is_none());
    }
}
