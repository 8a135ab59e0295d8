use std::collections::{BTreeMap, HashMap};
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, Result};

/// Currency used for budget items that predate multi-currency limits.
pub const DEFAULT_CURRENCY: &str = "RUB";

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_CURRENCY
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Static presentation metadata for a supported currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    pub minor_units: u8,
}

static CURRENCIES: Lazy<HashMap<&'static str, CurrencyInfo>> = Lazy::new(|| {
    [
        ("RUB", "₽", "Russian ruble", 2),
        ("USD", "$", "US dollar", 2),
        ("EUR", "€", "Euro", 2),
        ("GBP", "£", "Pound sterling", 2),
        ("CNY", "¥", "Chinese yuan", 2),
        ("JPY", "¥", "Japanese yen", 0),
        ("KZT", "₸", "Kazakhstani tenge", 2),
        ("TRY", "₺", "Turkish lira", 2),
        ("GEL", "₾", "Georgian lari", 2),
        ("AMD", "֏", "Armenian dram", 2),
        ("BYN", "Br", "Belarusian ruble", 2),
        ("UAH", "₴", "Ukrainian hryvnia", 2),
        ("AED", "AED", "UAE dirham", 2),
        ("KWD", "KWD", "Kuwaiti dinar", 3),
    ]
    .into_iter()
    .map(|(code, symbol, name, minor_units)| {
        (
            code,
            CurrencyInfo {
                code,
                symbol,
                name,
                minor_units,
            },
        )
    })
    .collect()
});

/// Looks up static metadata for a currency code, case-insensitively.
pub fn currency_info(code: &str) -> Option<CurrencyInfo> {
    CURRENCIES.get(code.to_uppercase().as_str()).copied()
}

/// Lists known currencies ordered by code.
pub fn supported_currencies() -> Vec<CurrencyInfo> {
    let mut all: Vec<CurrencyInfo> = CURRENCIES.values().copied().collect();
    all.sort_by_key(|info| info.code);
    all
}

pub fn symbol_for(code: &str) -> String {
    currency_info(code)
        .map(|info| info.symbol.to_string())
        .unwrap_or_else(|| code.to_uppercase())
}

pub fn minor_units_for(code: &str) -> u8 {
    currency_info(code).map(|info| info.minor_units).unwrap_or(2)
}

/// Locale-aware number formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    /// Places the currency mark after the amount (`1 000 ₽`) instead of before (`$1,000`).
    pub symbol_after: bool,
}

impl LocaleConfig {
    pub fn russian() -> Self {
        Self {
            language_tag: "ru-RU".into(),
            decimal_separator: ',',
            grouping_separator: '\u{a0}',
            symbol_after: true,
        }
    }

    pub fn english() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            symbol_after: false,
        }
    }

    /// Resolves a preset from a BCP 47 tag, falling back to the Russian preset.
    pub fn for_tag(tag: &str) -> Self {
        let lowered = tag.to_ascii_lowercase();
        if lowered.starts_with("en") {
            Self::english()
        } else {
            let mut locale = Self::russian();
            if !lowered.starts_with("ru") {
                locale.language_tag = tag.to_string();
            }
            locale
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::russian()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NegativeStyle {
    #[default]
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyDisplay {
    #[default]
    Symbol,
    Code,
    SymbolAndCode,
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let grouped = match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, locale.grouping_separator)),
        None => group_digits(int_part, locale.grouping_separator),
    };
    match frac_part {
        Some(frac) => format!("{}{}{}", grouped, locale.decimal_separator, frac),
        None => grouped,
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Formats a monetary amount with the currency's minor units and the locale's separators.
pub fn format_money(
    amount: f64,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, amount.abs(), precision);
    let symbol = symbol_for(code.as_str());
    let place = |mark: &str| {
        if locale.symbol_after {
            format!("{} {}", body, mark)
        } else if mark.chars().all(|ch| ch.is_ascii_alphabetic()) {
            format!("{} {}", mark, body)
        } else {
            format!("{}{}", mark, body)
        }
    };
    let unsigned = match options.currency_display {
        CurrencyDisplay::Symbol => place(&symbol),
        CurrencyDisplay::Code => place(code.as_str()),
        CurrencyDisplay::SymbolAndCode => format!("{} ({})", place(&symbol), code.as_str()),
    };
    let rounded_to_zero = body.chars().all(|ch| !ch.is_ascii_digit() || ch == '0');
    if amount < 0.0 && !rounded_to_zero {
        match options.negative_style {
            NegativeStyle::Sign => format!("-{}", unsigned),
            NegativeStyle::Parentheses => format!("({})", unsigned),
        }
    } else {
        unsigned
    }
}

/// Coerces free-form amount input into a number.
///
/// Accepts either `.` or `,` as the decimal mark and ignores whitespace,
/// apostrophes and currency symbols. Anything that still fails to parse
/// becomes `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '\'' | '\u{a0}' | '\u{202f}'))
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
        .collect();
    if cleaned.is_empty() || raw.chars().any(|ch| ch.is_alphabetic()) {
        return 0.0;
    }
    let normalized = match (cleaned.rfind('.'), cleaned.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (None, Some(_)) if cleaned.matches(',').count() == 1 => cleaned.replace(',', "."),
        (None, Some(_)) => cleaned.replace(',', ""),
        _ => cleaned,
    };
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Exchange rates quoted against a single base currency.
///
/// Each entry records how many units of `base` one unit of the keyed currency buys.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(try_from = "RawFxTable")]
pub struct FxTable {
    pub base: CurrencyCode,
    #[serde(default)]
    rates: BTreeMap<CurrencyCode, f64>,
}

/// Unchecked wire form of [`FxTable`]; every rate goes through `set_rate`.
#[derive(Deserialize)]
struct RawFxTable {
    base: CurrencyCode,
    #[serde(default)]
    rates: BTreeMap<CurrencyCode, f64>,
}

impl TryFrom<RawFxTable> for FxTable {
    type Error = EngineError;

    fn try_from(raw: RawFxTable) -> Result<Self> {
        let mut table = FxTable::new(raw.base);
        for (code, rate) in raw.rates {
            table.set_rate(code, rate)?;
        }
        Ok(table)
    }
}

impl FxTable {
    pub fn new(base: CurrencyCode) -> Self {
        Self {
            base,
            rates: BTreeMap::new(),
        }
    }

    pub fn set_rate(&mut self, code: CurrencyCode, rate_to_base: f64) -> Result<()> {
        if !rate_to_base.is_finite() || rate_to_base <= 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "rate for {} must be positive, got {}",
                code, rate_to_base
            )));
        }
        self.rates.insert(code, rate_to_base);
        Ok(())
    }

    pub fn with_rate(mut self, code: impl Into<CurrencyCode>, rate_to_base: f64) -> Result<Self> {
        self.set_rate(code.into(), rate_to_base)?;
        Ok(self)
    }

    fn to_base(&self, code: &CurrencyCode) -> Option<f64> {
        if code == &self.base {
            Some(1.0)
        } else {
            self.rates.get(code).copied()
        }
    }

    /// Rate that converts one unit of `from` into `to`, crossing through the base if needed.
    pub fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<f64> {
        if from == to {
            return Ok(1.0);
        }
        match (self.to_base(from), self.to_base(to)) {
            (Some(from_rate), Some(to_rate)) => Ok(from_rate / to_rate),
            _ => Err(EngineError::MissingRate {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    pub fn convert(&self, amount: f64, from: &CurrencyCode, to: &CurrencyCode) -> Result<f64> {
        Ok(amount * self.rate(from, to)?)
    }
}
