//! Display formatting for money, percentages, dates and masked inputs.

use chrono::{DateTime, Utc};

/// Brazilian real with thousands dots and decimal comma, e.g. `R$ 1.250,00`.
#[must_use]
pub fn currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    // Amounts on a store dashboard stay far inside u64 cents.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (value.abs() * 100.0).round() as u64;
    format!(
        "{sign}R$ {},{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// One decimal place with a decimal comma, e.g. `33,3%`.
#[must_use]
pub fn percent(value: f64) -> String {
    format!("{value:.1}%").replace('.', ",")
}

/// Day/month/year, e.g. `04/12/2024`.
#[must_use]
pub fn date(value: &DateTime<Utc>) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// Formats phone digits as `(11) 3333-4444` or `(11) 99999-0001`.
/// Extra digits beyond eleven are dropped.
#[must_use]
pub fn mask_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(11).collect();
    let split = if digits.len() > 10 { 7 } else { 6 };
    match digits.len() {
        0..=2 => digits,
        n if n <= split => format!("({}) {}", &digits[..2], &digits[2..]),
        _ => format!(
            "({}) {}-{}",
            &digits[..2],
            &digits[2..split],
            &digits[split..]
        ),
    }
}

/// Formats postal code digits as `01000-000`.
#[must_use]
pub fn mask_postal_code(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(8).collect();
    if digits.len() > 5 {
        format!("{}-{}", &digits[..5], &digits[5..])
    } else {
        digits
    }
}
