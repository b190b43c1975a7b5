//! Display currencies and conversion-for-display.
//!
//! Prices are stored in USD ([`super::Money`]); converting them into the
//! user's preferred display currency is a pure, stateless function of a
//! [`RateTable`] and is never persisted.
//!
//! Rounding policy: UZS and RUB display with zero decimal places, USD with
//! two. USD prefixes its symbol, UZS and RUB suffix theirs.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Errors that can occur when parsing a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyParseError {
    /// The input is not a supported currency code.
    #[error("unsupported currency code: {0}")]
    Unsupported(String),
}

/// Supported display currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// US dollar (the base currency).
    USD,
    /// Uzbek so'm.
    #[default]
    UZS,
    /// Russian rouble.
    RUB,
}

impl CurrencyCode {
    /// The display symbol for this currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::UZS => "so'm",
            Self::RUB => "\u{20bd}",
        }
    }

    /// The ISO 4217 code for this currency.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::UZS => "UZS",
            Self::RUB => "RUB",
        }
    }

    /// Decimal places shown for this currency.
    #[must_use]
    pub const fn decimal_places(self) -> u32 {
        match self {
            Self::USD => 2,
            Self::UZS | Self::RUB => 0,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "UZS" => Ok(Self::UZS),
            "RUB" => Ok(Self::RUB),
            other => Err(CurrencyParseError::Unsupported(other.to_string())),
        }
    }
}

/// Exchange rates from the base currency (USD) into display currencies.
///
/// The default table carries fixed rates; callers with a live source can
/// construct their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    /// USD per USD (always 1 in the default table).
    pub usd: Decimal,
    /// UZS per USD.
    pub uzs: Decimal,
    /// RUB per USD.
    pub rub: Decimal,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            usd: Decimal::ONE,
            uzs: Decimal::from(12_800),
            rub: Decimal::from(92),
        }
    }
}

impl RateTable {
    /// The conversion rate from USD into `currency`.
    #[must_use]
    pub const fn rate(&self, currency: CurrencyCode) -> Decimal {
        match currency {
            CurrencyCode::USD => self.usd,
            CurrencyCode::UZS => self.uzs,
            CurrencyCode::RUB => self.rub,
        }
    }
}

/// Format a USD amount in the given display currency.
///
/// Conversion, rounding and symbol placement follow the policy above;
/// thousands are grouped with commas.
#[must_use]
pub fn format_money(money: Money, currency: CurrencyCode, rates: &RateTable) -> String {
    let converted = money.amount() * rates.rate(currency);
    let rounded = converted.round_dp_with_strategy(
        currency.decimal_places(),
        RoundingStrategy::MidpointAwayFromZero,
    );

    let grouped = group_thousands(&format!(
        "{rounded:.prec$}",
        prec = currency.decimal_places() as usize
    ));

    match currency {
        CurrencyCode::USD => format!("{}{grouped}", currency.symbol()),
        CurrencyCode::UZS | CurrencyCode::RUB => format!("{grouped} {}", currency.symbol()),
    }
}

/// Format a raw price input in the given display currency.
///
/// The input may be a bare number or a currency-prefixed string; anything
/// unparsable is returned unchanged rather than failing, so this is a total
/// function over arbitrary backend data.
#[must_use]
pub fn format_raw(input: &str, currency: CurrencyCode, rates: &RateTable) -> String {
    Money::parse_lenient(input).map_or_else(
        |_| input.to_string(),
        |money| format_money(money, currency, rates),
    )
}

/// Insert comma separators into the integer part of a formatted number.
fn group_thousands(formatted: &str) -> String {
    let (sign, rest) = formatted
        .strip_prefix('-')
        .map_or(("", formatted), |rest| ("-", rest));
    let (int_part, frac_part) = rest
        .split_once('.')
        .map_or((rest, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
