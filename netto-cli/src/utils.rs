use netto_core::calculations::common::round_half_up;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::i18n::Language;

/// Inserts `sep` between every group of three digits, counting from the right.
fn group_thousands(
    digits: &str,
    sep: char,
) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// Formats a euro amount rounded to cents.
///
/// German output reads `1.234,56 €`, English output `€1,234.56`.
pub fn format_eur(
    value: Decimal,
    lang: Language,
) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = rounded.abs();
    let whole = abs.trunc();
    let cents = ((abs - whole) * Decimal::ONE_HUNDRED).to_u64().unwrap_or(0);
    let whole = whole.to_u64().unwrap_or(0).to_string();

    match lang {
        Language::De => format!("{sign}{},{cents:02} €", group_thousands(&whole, '.')),
        Language::En => format!("{sign}€{}.{cents:02}", group_thousands(&whole, ',')),
    }
}

/// Formats a plain number without trailing zeros, using the language's
/// decimal separator.
pub fn format_decimal(
    value: Decimal,
    lang: Language,
) -> String {
    let text = value.normalize().to_string();
    match lang {
        Language::De => text.replace('.', ","),
        Language::En => text,
    }
}

/// Formats a fractional rate (`0.09`) as a percentage (`9%` / `9 %`).
pub fn format_percent(
    rate: Decimal,
    lang: Language,
) -> String {
    let number = format_decimal(rate * Decimal::ONE_HUNDRED, lang);
    match lang {
        Language::De => format!("{number} %"),
        Language::En => format!("{number}%"),
    }
}
