//! Derivation rules applied while mapping an order onto the carrier request.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::contract::model::{OrderItem, Payment};
use crate::domain::error::DomainError;

pub fn auth_username(login: &str) -> String {
    login.to_uppercase()
}

/// Product names joined with ", ".
pub fn content_description(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|item| item.product_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pickup happens today, or tomorrow once `breaking_hour` has been reached.
/// Saturates at `NaiveDate::MAX`.
pub fn resolve_pickup_date(now: NaiveDateTime, breaking_hour: Option<u32>) -> NaiveDate {
    let today = now.date();
    match breaking_hour {
        Some(hour) if now.hour() >= hour => today.succ_opt().unwrap_or(NaiveDate::MAX),
        _ => today,
    }
}

/// Only the first payment decides; an order without payments is never COD.
pub fn is_cash_on_delivery(payments: &[Payment], cod_payment_method_code: &str) -> bool {
    payments
        .first()
        .is_some_and(|payment| payment.method_code == cod_payment_method_code)
}

/// Amount with exactly two decimals, half away from zero.
pub fn format_cod_amount(total: Decimal) -> String {
    let rounded = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// "00-950" → "00950"
pub fn normalize_postal_code(postal_code: &str) -> String {
    postal_code.replace('-', "")
}

/// Last space-separated token of the street.
pub fn extract_house_number(street: &str) -> Result<&str, DomainError> {
    match street.split(' ').next_back() {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(DomainError::invalid_street(street)),
    }
}

pub fn validate_weight(weight: f64) -> Result<f64, DomainError> {
    if weight.is_finite() && weight > 0.0 {
        Ok(weight)
    } else {
        Err(DomainError::invalid_weight(weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn items(names: &[&str]) -> Vec<OrderItem> {
        names
            .iter()
            .map(|n| OrderItem {
                product_name: n.to_string(),
            })
            .collect()
    }

    #[test]
    fn content_joins_without_trailing_separator() {
        assert_eq!(content_description(&items(&["Shirt", "Hat"])), "Shirt, Hat");
        assert_eq!(content_description(&items(&["Shirt"])), "Shirt");
        assert_eq!(content_description(&[]), "");
    }

    #[test]
    fn pickup_date_rolls_over_at_breaking_hour() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        assert_eq!(resolve_pickup_date(at(14, 59), Some(15)), day);
        assert_eq!(resolve_pickup_date(at(15, 0), Some(15)), day.succ_opt().unwrap());
        assert_eq!(resolve_pickup_date(at(23, 59), None), day);
        assert_eq!(resolve_pickup_date(at(0, 0), None), day);
    }

    #[test]
    fn pickup_date_crosses_month_end() {
        let now = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap();
        assert_eq!(
            resolve_pickup_date(now, Some(15)).to_string(),
            "2024-03-01"
        );
    }

    #[test]
    fn pickup_date_saturates_at_last_representable_day() {
        let now = NaiveDate::MAX.and_hms_opt(20, 0, 0).unwrap();
        assert_eq!(resolve_pickup_date(now, Some(15)), NaiveDate::MAX);
    }

    #[test]
    fn cod_is_decided_by_first_payment() {
        let cod = Payment {
            method_code: "cash_on_delivery".into(),
        };
        let transfer = Payment {
            method_code: "bank_transfer".into(),
        };

        assert!(is_cash_on_delivery(&[cod.clone()], "cash_on_delivery"));
        assert!(!is_cash_on_delivery(&[], "cash_on_delivery"));
        assert!(!is_cash_on_delivery(&[transfer.clone(), cod.clone()], "cash_on_delivery"));
        assert!(is_cash_on_delivery(&[cod, transfer], "cash_on_delivery"));
    }

    #[test]
    fn cod_amount_has_two_decimals() {
        let amount = |s: &str| format_cod_amount(Decimal::from_str(s).unwrap());
        assert_eq!(amount("100"), "100.00");
        assert_eq!(amount("49.9"), "49.90");
        assert_eq!(amount("10.005"), "10.01");
        assert_eq!(amount("10.004"), "10.00");
    }

    #[test]
    fn house_number_is_last_token() {
        assert_eq!(extract_house_number("Opolska 45").unwrap(), "45");
        assert_eq!(extract_house_number("Aleja Jana Pawła II 10A").unwrap(), "10A");
    }

    #[test]
    fn house_number_missing_is_error() {
        assert!(matches!(
            extract_house_number(""),
            Err(DomainError::InvalidStreet { .. })
        ));
        assert!(matches!(
            extract_house_number("Opolska "),
            Err(DomainError::InvalidStreet { .. })
        ));
    }

    #[test]
    fn postal_code_hyphen_is_stripped() {
        assert_eq!(normalize_postal_code("00-950"), "00950");
        assert_eq!(normalize_postal_code("00950"), "00950");
    }

    #[test]
    fn weight_must_be_positive() {
        assert_eq!(validate_weight(1.5).unwrap(), 1.5);
        assert!(validate_weight(0.0).is_err());
        assert!(validate_weight(-2.0).is_err());
        assert!(validate_weight(f64::NAN).is_err());
    }

    #[test]
    fn username_is_uppercased() {
        assert_eq!(auth_username("shop_api"), "SHOP_API");
    }
}
