//! Amount display strings and lenient digit parsing.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::caret::{compute_caret_offset, CaretOffset};

const GROUP_SEPARATOR: char = ',';
const CURRENCY_SUFFIX: char = '$';

/// Render an amount for an input field.
///
/// `None` and zero render as an empty string so an unset field reads blank
/// rather than `0$`. Anything else is rounded to a whole number, grouped with
/// `,` every three digits and suffixed with `$`: `1234567` → `"1,234,567$"`.
///
/// The zero check happens before rounding, so `0.3` renders as `"0$"`.
pub fn to_display_string(amount: Option<Decimal>) -> String {
    let amount = match amount {
        Some(a) if !a.is_zero() => a,
        _ => return String::new(),
    };

    let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = whole.abs().normalize().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if whole.is_sign_negative() && !whole.is_zero() {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out.push(CURRENCY_SUFFIX);
    out
}

/// Parse the digits out of user-entered text.
///
/// Every character that is not an ASCII digit is discarded and the rest is
/// read as an unsigned integer. Decimal points are discarded too, so
/// `"1,234.56$"` parses as `123456`. Empty or digit-free input is zero, and
/// values beyond the `Decimal` range saturate at `Decimal::MAX`.
pub fn parse_digits(raw: &str) -> Decimal {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(significant).unwrap_or(Decimal::MAX)
}

/// Parse free-form numeric text the way a number field reads it.
///
/// Blank text is zero and a trailing or leading point is tolerated, so a
/// value that is still being typed (`"1."`, `".5"`) parses. Exponent
/// notation is accepted. Anything else is `None`.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let text = raw.trim();
    if text.is_empty() {
        return Some(Decimal::ZERO);
    }
    if text.contains(|c: char| c.eq_ignore_ascii_case(&'e')) {
        return Decimal::from_scientific(text).ok();
    }

    let (negative, unsigned) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let unsigned = unsigned.strip_suffix('.').unwrap_or(unsigned);
    if unsigned.is_empty() || unsigned == "." {
        return None;
    }
    let padded;
    let unsigned = if unsigned.starts_with('.') {
        padded = format!("0{}", unsigned);
        padded.as_str()
    } else {
        unsigned
    };
    if !unsigned.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }

    let value = Decimal::from_str(unsigned).ok()?;
    Some(if negative { -value } else { value })
}

/// Length of a value's plain rendering (no grouping, no suffix).
pub fn plain_len(value: Decimal) -> usize {
    value.normalize().to_string().len()
}

/// Outcome of editing an amount field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountEdit {
    /// Parsed amount
    pub value: Decimal,
    /// Text to repaint into the field
    pub display: String,
    /// Caret correction to apply once the repaint lands
    pub offset: CaretOffset,
}

/// Parse an edited amount field and work out how it should be repainted.
pub fn apply_amount_edit(previous: Decimal, raw: &str) -> AmountEdit {
    let value = parse_digits(raw);
    AmountEdit {
        value,
        display: to_display_string(Some(value)),
        offset: compute_caret_offset(previous, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(to_display_string(Some(dec!(1234567))), "1,234,567$");
        assert_eq!(to_display_string(Some(dec!(1000))), "1,000$");
        assert_eq!(to_display_string(Some(dec!(999))), "999$");
        assert_eq!(to_display_string(Some(dec!(100000))), "100,000$");
        assert_eq!(to_display_string(Some(dec!(7))), "7$");
    }

    #[test]
    fn test_display_blank_for_unset_and_zero() {
        assert_eq!(to_display_string(None), "");
        assert_eq!(to_display_string(Some(Decimal::ZERO)), "");
        assert_eq!(to_display_string(Some(dec!(0.00))), "");
    }

    #[test]
    fn test_display_rounds_to_whole_units() {
        assert_eq!(to_display_string(Some(dec!(1234.4))), "1,234$");
        assert_eq!(to_display_string(Some(dec!(1234.5))), "1,235$");
        assert_eq!(to_display_string(Some(dec!(999.5))), "1,000$");
        // Non-zero before rounding, so not blank.
        assert_eq!(to_display_string(Some(dec!(0.3))), "0$");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(to_display_string(Some(dec!(-123))), "-123$");
        assert_eq!(to_display_string(Some(dec!(-1234))), "-1,234$");
    }

    #[test]
    fn test_parse_digits_strips_everything_else() {
        assert_eq!(parse_digits("1,234,567$"), dec!(1234567));
        assert_eq!(parse_digits("  42 "), dec!(42));
        assert_eq!(parse_digits("007"), dec!(7));
    }

    #[test]
    fn test_parse_digits_drops_decimal_point() {
        // Fractional cents are not representable: the point is just another
        // non-digit and the cents become part of the integer.
        assert_eq!(parse_digits("1,234.56$"), dec!(123456));
        assert_eq!(parse_digits("0.5"), dec!(5));
    }

    #[test]
    fn test_parse_digits_garbage_is_zero() {
        assert_eq!(parse_digits(""), Decimal::ZERO);
        assert_eq!(parse_digits("$"), Decimal::ZERO);
        assert_eq!(parse_digits("abc"), Decimal::ZERO);
        assert_eq!(parse_digits("-"), Decimal::ZERO);
        assert_eq!(parse_digits("０１２"), Decimal::ZERO); // full-width digits are not ASCII
    }

    #[test]
    fn test_parse_digits_saturates() {
        let huge = "9".repeat(60);
        assert!(parse_digits(&huge) >= dec!(1000000000000000000000000000));
    }

    #[test]
    fn test_parse_decimal_partial_input() {
        assert_eq!(parse_decimal(""), Some(Decimal::ZERO));
        assert_eq!(parse_decimal("1."), Some(dec!(1)));
        assert_eq!(parse_decimal("1.5"), Some(dec!(1.5)));
        assert_eq!(parse_decimal(".5"), Some(dec!(0.5)));
        assert_eq!(parse_decimal(" 50 "), Some(dec!(50)));
        assert_eq!(parse_decimal("-2"), Some(dec!(-2)));
        assert_eq!(parse_decimal("1e2"), Some(dec!(100)));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("."), None);
        assert_eq!(parse_decimal("-"), None);
        assert_eq!(parse_decimal("1.2.3"), None);
        assert_eq!(parse_decimal("50 pips"), None);
    }

    #[test]
    fn test_plain_len() {
        assert_eq!(plain_len(Decimal::ZERO), 1);
        assert_eq!(plain_len(dec!(999)), 3);
        assert_eq!(plain_len(dec!(1000)), 4);
        assert_eq!(plain_len(dec!(1000.00)), 4);
    }

    #[test]
    fn test_apply_amount_edit() {
        let edit = apply_amount_edit(dec!(999), "9,9990$");
        assert_eq!(edit.value, dec!(99990));
        assert_eq!(edit.display, "99,990$");
        assert_eq!(edit.offset, CaretOffset::Stay);

        let edit = apply_amount_edit(dec!(999), "9990$");
        assert_eq!(edit.display, "9,990$");
        assert_eq!(edit.offset, CaretOffset::Forward);
    }

    proptest! {
        #[test]
        fn prop_reformat_is_idempotent(n in 0u64..1_000_000_000_000u64) {
            let once = to_display_string(Some(Decimal::from(n)));
            let twice = to_display_string(Some(parse_digits(&once)));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_reformat_any_text_is_stable(s in "\\PC*") {
            let once = to_display_string(Some(parse_digits(&s)));
            let twice = to_display_string(Some(parse_digits(&once)));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_comma_count(n in 1u64..1_000_000_000u64) {
            let shown = to_display_string(Some(Decimal::from(n)));
            let digits = n.to_string().len();
            prop_assert_eq!(shown.matches(',').count(), (digits - 1) / 3);
            prop_assert!(shown.ends_with('$'));
        }

        #[test]
        fn prop_parse_digits_never_panics(s in "\\PC*") {
            let value = parse_digits(&s);
            prop_assert!(value >= Decimal::ZERO);
        }
    }
}
