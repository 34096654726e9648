//! Locale-aware currency formatting.
//!
//! Covers a fixed table of currencies and locale conventions. Construction validates both
//! parameters so a bad currency code surfaces when the column is declared, not at render time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default ISO 4217 code.
pub const DEFAULT_CURRENCY: &str = "USD";
/// Default BCP 47 locale tag.
pub const DEFAULT_LOCALE: &str = "en-US";

const NBSP: char = '\u{a0}';
const NARROW_NBSP: char = '\u{202f}';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Currency formatter construction failures.
pub enum CurrencyError {
    /// The currency code is not three ASCII letters.
    #[error("invalid currency code `{0}`")]
    InvalidCode(String),
    /// The locale tag is not well formed.
    #[error("invalid locale `{0}`")]
    InvalidLocale(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPlacement {
    Prefix,
    Suffix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LocaleRules {
    tag: &'static str,
    group: char,
    decimal: char,
    placement: SymbolPlacement,
}

const LOCALES: &[LocaleRules] = &[
    LocaleRules {
        tag: "en-US",
        group: ',',
        decimal: '.',
        placement: SymbolPlacement::Prefix,
    },
    LocaleRules {
        tag: "en-GB",
        group: ',',
        decimal: '.',
        placement: SymbolPlacement::Prefix,
    },
    LocaleRules {
        tag: "ja-JP",
        group: ',',
        decimal: '.',
        placement: SymbolPlacement::Prefix,
    },
    LocaleRules {
        tag: "de-DE",
        group: '.',
        decimal: ',',
        placement: SymbolPlacement::Suffix,
    },
    LocaleRules {
        tag: "es-ES",
        group: '.',
        decimal: ',',
        placement: SymbolPlacement::Suffix,
    },
    LocaleRules {
        tag: "it-IT",
        group: '.',
        decimal: ',',
        placement: SymbolPlacement::Suffix,
    },
    LocaleRules {
        tag: "fr-FR",
        group: NARROW_NBSP,
        decimal: ',',
        placement: SymbolPlacement::Suffix,
    },
    LocaleRules {
        tag: "pt-BR",
        group: '.',
        decimal: ',',
        placement: SymbolPlacement::Prefix,
    },
];

// (code, symbol, fraction digits)
const CURRENCIES: &[(&str, &str, usize)] = &[
    ("USD", "$", 2),
    ("EUR", "€", 2),
    ("GBP", "£", 2),
    ("JPY", "¥", 0),
    ("CNY", "CN¥", 2),
    ("INR", "₹", 2),
    ("KRW", "₩", 0),
    ("BRL", "R$", 2),
    ("CAD", "CA$", 2),
    ("AUD", "A$", 2),
    ("MXN", "MX$", 2),
    ("CHF", "CHF", 2),
];

fn is_valid_locale(tag: &str) -> bool {
    let mut parts = tag.split('-');
    let language_ok = parts
        .next()
        .is_some_and(|lang| (2..=3).contains(&lang.len()) && lang.chars().all(|c| c.is_ascii_alphabetic()));
    language_ok
        && parts.all(|part| {
            (2..=8).contains(&part.len()) && part.chars().all(|c| c.is_ascii_alphanumeric())
        })
}

fn resolve_locale(tag: &str) -> &'static LocaleRules {
    let exact = LOCALES
        .iter()
        .find(|rules| rules.tag.eq_ignore_ascii_case(tag));
    let language = tag.split('-').next().unwrap_or_default();
    exact
        .or_else(|| {
            LOCALES.iter().find(|rules| {
                rules
                    .tag
                    .split('-')
                    .next()
                    .is_some_and(|lang| lang.eq_ignore_ascii_case(language))
            })
        })
        .unwrap_or(&LOCALES[0])
}

/// Currency formatter bound to one currency and locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CurrencySpec", into = "CurrencySpec")]
pub struct CurrencyFormatter {
    currency: String,
    locale: String,
    symbol: String,
    fraction_digits: usize,
    rules: LocaleRulesRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LocaleRulesRef(&'static LocaleRules);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct CurrencySpec {
    currency: String,
    locale: String,
}

impl Default for CurrencySpec {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl TryFrom<CurrencySpec> for CurrencyFormatter {
    type Error = CurrencyError;

    fn try_from(spec: CurrencySpec) -> Result<Self, Self::Error> {
        Self::new(&spec.currency, &spec.locale)
    }
}

impl From<CurrencyFormatter> for CurrencySpec {
    fn from(formatter: CurrencyFormatter) -> Self {
        Self {
            currency: formatter.currency,
            locale: formatter.locale,
        }
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::build(DEFAULT_CURRENCY.to_string(), DEFAULT_LOCALE.to_string())
    }
}

impl CurrencyFormatter {
    /// Creates a formatter.
    ///
    /// Codes outside the built-in table are accepted when well formed and render with the code
    /// as their symbol. Locales fall back by language, then to [`DEFAULT_LOCALE`].
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::InvalidCode`] unless `currency` is three ASCII letters and
    /// [`CurrencyError::InvalidLocale`] for malformed locale tags.
    pub fn new(currency: &str, locale: &str) -> Result<Self, CurrencyError> {
        let code = currency.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyError::InvalidCode(currency.to_string()));
        }
        if !is_valid_locale(locale) {
            return Err(CurrencyError::InvalidLocale(locale.to_string()));
        }
        Ok(Self::build(code.to_ascii_uppercase(), locale.to_string()))
    }

    fn build(currency: String, locale: String) -> Self {
        let (symbol, fraction_digits) = CURRENCIES
            .iter()
            .find(|(code, _, _)| *code == currency)
            .map(|(_, symbol, digits)| ((*symbol).to_string(), *digits))
            .unwrap_or_else(|| (currency.clone(), 2));
        let rules = LocaleRulesRef(resolve_locale(&locale));
        Self {
            currency,
            locale,
            symbol,
            fraction_digits,
            rules,
        }
    }

    /// ISO 4217 code.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Locale tag as supplied.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Formats `amount`.
    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return amount.to_string();
        }
        let rules = self.rules.0;
        let fixed = format!("{:.*}", self.fraction_digits, amount.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        let mut number = group_digits(whole, rules.group);
        if !fraction.is_empty() {
            number.push(rules.decimal);
            number.push_str(fraction);
        }
        let negative = amount < 0.0 && fixed.chars().any(|c| c != '0' && c != '.');
        let sign = if negative { "-" } else { "" };
        let word_symbol = self.symbol.chars().all(|c| c.is_ascii_alphabetic());
        match rules.placement {
            SymbolPlacement::Prefix if word_symbol => {
                format!("{sign}{}{NBSP}{number}", self.symbol)
            }
            SymbolPlacement::Prefix => format!("{sign}{}{number}", self.symbol),
            SymbolPlacement::Suffix => format!("{sign}{number}{NBSP}{}", self.symbol),
        }
    }
}

fn group_digits(whole: &str, separator: char) -> String {
    let digits = whole.chars().collect::<Vec<_>>();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(*digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_to_us_dollars() {
        let formatter = CurrencyFormatter::default();
        assert_eq!(formatter.format(1234.5), "$1,234.50");
        assert_eq!(formatter.format(-0.5), "-$0.50");
        assert_eq!(formatter.format(0.0), "$0.00");
    }

    #[test]
    fn locale_controls_separators_and_placement() {
        let euro = CurrencyFormatter::new("EUR", "de-DE").expect("formatter");
        assert_eq!(euro.format(1234567.891), "1.234.567,89\u{a0}€");

        let yen = CurrencyFormatter::new("jpy", "ja-JP").expect("formatter");
        assert_eq!(yen.format(1234.4), "¥1,234");

        let austrian = CurrencyFormatter::new("EUR", "de-AT").expect("formatter");
        assert_eq!(austrian.format(10.0), "10,00\u{a0}€");
    }

    #[test]
    fn unknown_well_formed_code_uses_code_as_symbol() {
        let formatter = CurrencyFormatter::new("XYZ", "en-US").expect("formatter");
        assert_eq!(formatter.format(5.0), "XYZ\u{a0}5.00");
    }

    #[test]
    fn malformed_inputs_fail_at_construction() {
        assert_eq!(
            CurrencyFormatter::new("DOLLARS", "en-US").expect_err("bad code"),
            CurrencyError::InvalidCode("DOLLARS".to_string())
        );
        assert_eq!(
            CurrencyFormatter::new("USD", "english!").expect_err("bad locale"),
            CurrencyError::InvalidLocale("english!".to_string())
        );
    }

    #[test]
    fn deserialization_validates_code() {
        let parsed: Result<CurrencyFormatter, _> =
            serde_json::from_str(r#"{ "currency": "12", "locale": "en-US" }"#);
        assert!(parsed.is_err());

        let parsed: CurrencyFormatter =
            serde_json::from_str(r#"{ "currency": "gbp" }"#).expect("parse");
        assert_eq!(parsed.format(3.0), "£3.00");
    }
}
