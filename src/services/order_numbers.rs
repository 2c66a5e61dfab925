//! Order-number composition and parsing.
//!
//! The generated code is the one bit-exact external contract of the system:
//!
//! ```text
//! {CODE}-{YY}-{SEQ:03}{TYPE}[-{SUBTYPE}|-{PART}]
//! ```
//!
//! `CODE` is the customer's short code, `YY` the two-digit year, `SEQ` the
//! per-customer-per-year counter starting at 001, and `TYPE` the product-line
//! code letters. A sub-order does not allocate a sequence of its own: it
//! reuses the parent's full number and appends the `SUBTYPE` suffix, which
//! also means the suffix wins over a part suffix when both are requested.

use crate::entities::order::{OrderType, SubOrderType};

/// Two-digit year suffix, zero-padded.
pub fn year_suffix(year: i32) -> i32 {
    year.rem_euclid(100)
}

/// Compose the full order number for an allocated sequence. A missing type
/// (legal only when a parent or part context substitutes for it) simply
/// contributes no letters.
pub fn compose_order_number(
    customer_code: &str,
    year: i32,
    sequence: u32,
    order_type: Option<OrderType>,
    part: Option<i32>,
) -> String {
    let mut number = format!(
        "{}-{:02}-{:03}{}",
        customer_code,
        year_suffix(year),
        sequence,
        order_type.map(|t| t.code()).unwrap_or("")
    );
    if let Some(part) = part {
        number.push('-');
        number.push_str(&part.to_string());
    }
    number
}

/// Number for a sub-order: the parent's number with the qualifier suffix.
/// The parent's sequence is kept, so `TST-24-002Н` begets `TST-24-002Н-ДОП`.
pub fn sub_order_number(parent_number: &str, sub_order_type: SubOrderType) -> String {
    format!("{}-{}", parent_number, sub_order_type.code())
}

/// Parse the sequence number out of an existing order number belonging to the
/// given customer and year.
///
/// Anchors on the `{CODE}-{YY}-` prefix and then reads only the leading ASCII
/// digits of the next segment, so the trailing type letters and any sub-order
/// or part suffix cannot bleed into the parsed value.
pub fn parse_sequence(order_number: &str, customer_code: &str, year: i32) -> Option<u32> {
    let rest = order_number
        .strip_prefix(customer_code)?
        .strip_prefix('-')?
        .strip_prefix(&format!("{:02}", year_suffix(year)))?
        .strip_prefix('-')?;

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// Highest sequence among existing order numbers for a customer and year.
/// Used once to seed the counter for data created before counters existed.
pub fn max_sequence<'a, I>(order_numbers: I, customer_code: &str, year: i32) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    order_numbers
        .into_iter()
        .filter_map(|n| parse_sequence(n, customer_code, year))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_base_code() {
        let number = compose_order_number("TST", 2024, 1, Some(OrderType::CustomItems), None);
        assert_eq!(number, "TST-24-001Н");
    }

    #[test]
    fn pads_sequence_to_three_digits() {
        assert_eq!(
            compose_order_number("TST", 2024, 42, Some(OrderType::CustomKitchen), None),
            "TST-24-042К"
        );
        assert_eq!(
            compose_order_number("TST", 2024, 1042, Some(OrderType::CustomKitchen), None),
            "TST-24-1042К"
        );
    }

    #[test]
    fn pads_year_suffix() {
        assert_eq!(
            compose_order_number("ABC", 2005, 3, Some(OrderType::Portal), None),
            "ABC-05-003П"
        );
    }

    #[test]
    fn sub_order_keeps_parent_sequence() {
        assert_eq!(
            sub_order_number("TST-24-002Н", SubOrderType::Supplement),
            "TST-24-002Н-ДОП"
        );
        assert_eq!(
            sub_order_number("TST-24-012ЛК", SubOrderType::Rework),
            "TST-24-012ЛК-ДОД"
        );
    }

    #[test]
    fn appends_part_suffix() {
        let number = compose_order_number("TST", 2024, 3, Some(OrderType::CustomItems), Some(1));
        assert_eq!(number, "TST-24-003Н-1");
    }

    #[test]
    fn part_context_alone_composes_without_type_letters() {
        let number = compose_order_number("TST", 2024, 3, None, Some(1));
        assert_eq!(number, "TST-24-003-1");
        assert_eq!(parse_sequence(&number, "TST", 2024), Some(3));
    }

    #[test]
    fn parses_sequence_from_plain_number() {
        assert_eq!(parse_sequence("TST-24-007Н", "TST", 2024), Some(7));
    }

    #[test]
    fn parses_sequence_despite_suffixes() {
        // The last dash-delimited segment is not the sequence here; naive
        // split-on-dash parsing used to break on these.
        assert_eq!(parse_sequence("TST-24-002Н-ДОП", "TST", 2024), Some(2));
        assert_eq!(parse_sequence("TST-24-003Н-1", "TST", 2024), Some(3));
        assert_eq!(parse_sequence("TST-24-012ЛК-ДОД", "TST", 2024), Some(12));
    }

    #[test]
    fn rejects_foreign_numbers() {
        assert_eq!(parse_sequence("OTH-24-001Н", "TST", 2024), None);
        assert_eq!(parse_sequence("TST-23-001Н", "TST", 2024), None);
        assert_eq!(parse_sequence("TST-24-Н", "TST", 2024), None);
    }

    #[test]
    fn max_sequence_over_mixed_numbers() {
        let numbers = [
            "TST-24-001Н",
            "TST-24-002Н-ДОП",
            "TST-24-005ЭШ",
            "TST-23-009Н",
            "OTH-24-044К",
        ];
        assert_eq!(max_sequence(numbers, "TST", 2024), 5);
        assert_eq!(max_sequence(numbers, "TST", 2023), 9);
        assert_eq!(max_sequence(numbers, "NEW", 2024), 0);
    }
}
