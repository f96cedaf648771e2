use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Locale-dependent number formatting symbols supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberLocale {
    pub decimal_separator: char,
    /// `None` disables digit grouping.
    pub group_separator: Option<char>,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::en()
    }
}

impl NumberLocale {
    #[must_use]
    pub const fn en() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: Some(','),
        }
    }

    #[must_use]
    pub const fn de() -> Self {
        Self {
            decimal_separator: ',',
            group_separator: Some('.'),
        }
    }

    #[must_use]
    pub const fn fr() -> Self {
        Self {
            decimal_separator: ',',
            group_separator: Some('\u{202f}'),
        }
    }

    #[must_use]
    pub const fn custom(decimal_separator: char, group_separator: Option<char>) -> Self {
        Self {
            decimal_separator,
            group_separator,
        }
    }
}

/// Fraction-digit bounds, same meaning as the host number formatter's options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberFormatOptions {
    pub min_fraction_digits: u32,
    pub max_fraction_digits: u32,
}

impl Default for NumberFormatOptions {
    fn default() -> Self {
        Self {
            min_fraction_digits: 0,
            max_fraction_digits: 3,
        }
    }
}

impl NumberFormatOptions {
    #[must_use]
    pub const fn whole() -> Self {
        Self {
            min_fraction_digits: 0,
            max_fraction_digits: 0,
        }
    }

    #[must_use]
    pub const fn fixed(digits: u32) -> Self {
        Self {
            min_fraction_digits: digits,
            max_fraction_digits: digits,
        }
    }
}

/// Formats `value` for display; non-finite input yields an empty string.
///
/// Rounding is half away from zero on the decimal value, so `21.25` with one
/// fraction digit reads `21.3`. Finite values beyond the decimal range keep
/// their shortest `f64` digits.
#[must_use]
pub fn format_number(value: f64, locale: NumberLocale, options: NumberFormatOptions) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let max_digits = options.max_fraction_digits.min(28);
    let min_digits = options.min_fraction_digits.min(max_digits);

    let text = match Decimal::from_f64(value) {
        Some(decimal) => {
            let mut rounded = decimal
                .round_dp_with_strategy(max_digits, RoundingStrategy::MidpointAwayFromZero)
                .normalize();
            if rounded.is_zero() {
                rounded.set_sign_positive(true);
            }
            if rounded.scale() < min_digits {
                rounded.rescale(min_digits);
            }
            rounded.to_string()
        }
        // Out of decimal range means |value| >= 2^96, which has no fraction.
        None => {
            let mut text = value.to_string();
            if min_digits > 0 {
                text.push('.');
                text.extend(std::iter::repeat_n('0', min_digits as usize));
            }
            text
        }
    };

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut out = String::with_capacity(text.len() + integer.len() / 3);
    out.push_str(sign);
    push_grouped(&mut out, integer, locale.group_separator);
    if !fraction.is_empty() {
        out.push(locale.decimal_separator);
        out.push_str(fraction);
    }
    out
}

fn push_grouped(out: &mut String, integer: &str, separator: Option<char>) {
    let Some(separator) = separator else {
        out.push_str(integer);
        return;
    };
    let len = integer.len();
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
}
