//! Currency normalization against a static, injected exchange-rate table.
//!
//! Rates are factors relative to a single base currency (EUR for [`ExchangeRateTable::builtin`]).
//! The table is read-only once built; share it between converters with [`Arc`].
//!
//! ```rust
//! use std::sync::Arc;
//! use salary_survey_insights::currency::{CurrencyConverter, ExchangeRateTable};
//!
//! let table = ExchangeRateTable::new("EUR", [("USD", 0.95), ("GBP", 1.17)]).unwrap();
//! let converter = CurrencyConverter::new(Arc::new(table));
//!
//! assert_eq!(converter.convert(1000.0, "EUR").unwrap(), 1000.0);
//! assert!((converter.convert(1000.0, "USD").unwrap() - 950.0).abs() < 1e-9);
//! assert!(converter.convert(1000.0, "XYZ").is_err());
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{SurveyError, SurveyResult};

/// Base currency of the built-in table.
pub const BASE_CURRENCY: &str = "EUR";

/// Rates to EUR for every currency seen in the survey exports.
const BUILTIN_RATES: &[(&str, f64)] = &[
    ("GBP", 1.17),
    ("EUR", 1.00),
    ("CHF", 1.03),
    ("PLN", 0.21),
    ("USD", 0.95),
    ("CAD", 0.69),
    ("CUP", 0.04),
    ("XPF", 0.0084),
    ("IRR", 0.000022),
    ("FJD", 0.42),
    ("GIP", 1.17),
    ("UAH", 0.026),
    ("ZAR", 0.054),
    ("ALL", 0.009),
    ("CDF", 0.00045),
    ("AND", 1.00),
    ("AED", 0.26),
    ("FKP", 1.17),
    ("CLP", 0.0011),
    ("ZMW", 0.049),
    ("BRL", 0.19),
    ("DJF", 0.0054),
    ("GHS", 0.074),
    ("HUF", 0.0027),
    ("AFN", 0.010),
    ("THB", 0.027),
    ("AZN", 0.55),
    ("AUD", 0.61),
    ("TWD", 0.029),
    ("YER", 0.0038),
    ("AWG", 0.51),
    ("BAM", 0.51),
    ("QAR", 0.26),
    ("LAK", 0.000049),
    ("PEN", 0.24),
    ("BIF", 0.00045),
    ("SLL", 0.000045),
    ("NOK", 0.089),
    ("IDR", 0.000061),
    ("AMD", 0.0023),
    ("ARS", 0.0035),
    ("COP", 0.00021),
    ("UZS", 0.000083),
    ("UGX", 0.00025),
    ("SAR", 0.25),
    ("MYR", 0.20),
    ("BGN", 0.51),
    ("ILS", 0.25),
    ("CRC", 0.0015),
    ("BBP", 1.17),
    ("HKD", 0.12),
    ("INR", 0.012),
    ("CNY", 0.13),
    ("JPY", 0.007),
    ("BOB", 0.14),
    ("ANG", 0.5280),
];

/// Returned by [`CurrencyConverter::convert`] when the table has no rate for a code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no exchange rate for currency '{code}'")]
pub struct UnknownRate {
    pub code: String,
}

/// Currency code → conversion factor to the base currency.
///
/// Invariants: the base currency maps to exactly `1.0`; every rate is finite and positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRateTable {
    base: String,
    rates: HashMap<String, f64>,
    ignored_keys: Vec<String>,
}

/// On-disk shape of a rate table.
#[derive(Debug, Deserialize)]
struct RateTableFile {
    #[serde(default = "default_base")]
    base: String,
    rates: HashMap<String, f64>,
}

fn default_base() -> String {
    BASE_CURRENCY.to_string()
}

impl ExchangeRateTable {
    /// Build a validated table.
    ///
    /// The base currency is added with rate `1.0` when absent. Keys that are not plain codes
    /// (e.g. `"EUR European Euro"`) are never looked up, so they are kept aside in
    /// [`Self::ignored_keys`] instead of becoming unreachable entries.
    ///
    /// Errors with [`SurveyError::Config`] if the base is not a plain code, if the base has a rate
    /// other than `1.0`, or if any rate is not finite and strictly positive.
    pub fn new<I, K>(base: impl Into<String>, rates: I) -> SurveyResult<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let base = base.into();
        if !is_plain_code(&base) {
            return Err(SurveyError::config(format!(
                "base currency '{base}' is not a plain currency code"
            )));
        }

        let mut table = HashMap::new();
        let mut ignored_keys = Vec::new();
        for (code, rate) in rates {
            let code = code.into();
            if !rate.is_finite() || rate <= 0.0 {
                return Err(SurveyError::config(format!(
                    "rate for '{code}' must be finite and positive, got {rate}"
                )));
            }
            if !is_plain_code(&code) {
                tracing::warn!(key = %code, "ignoring composite exchange-rate key");
                ignored_keys.push(code);
                continue;
            }
            table.insert(code, rate);
        }

        match table.get(&base) {
            None => {
                table.insert(base.clone(), 1.0);
            }
            Some(rate) if *rate != 1.0 => {
                return Err(SurveyError::config(format!(
                    "base currency '{base}' must have rate 1.0, got {rate}"
                )));
            }
            Some(_) => {}
        }

        ignored_keys.sort();
        Ok(Self {
            base,
            rates: table,
            ignored_keys,
        })
    }

    /// The EUR-based table shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            base: BASE_CURRENCY.to_string(),
            rates: BUILTIN_RATES
                .iter()
                .map(|(code, rate)| ((*code).to_string(), *rate))
                .collect(),
            ignored_keys: Vec::new(),
        }
    }

    /// Parse a table from JSON: `{"base": "EUR", "rates": {"USD": 0.95, ...}}`.
    ///
    /// `base` defaults to [`BASE_CURRENCY`].
    pub fn from_json_str(input: &str) -> SurveyResult<Self> {
        let file: RateTableFile = serde_json::from_str(input)?;
        Self::new(file.base, file.rates)
    }

    /// Read a table from a JSON file (see [`Self::from_json_str`]).
    pub fn from_json_path(path: impl AsRef<Path>) -> SurveyResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Rate for `code`, or `None` if the table does not know it.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Composite keys set aside at construction time, sorted.
    pub fn ignored_keys(&self) -> &[String] {
        &self.ignored_keys
    }
}

impl Default for ExchangeRateTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn is_plain_code(code: &str) -> bool {
    !code.is_empty() && !code.chars().any(char::is_whitespace)
}

/// Converts amounts to the base currency of its rate table.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    table: Arc<ExchangeRateTable>,
}

impl CurrencyConverter {
    pub fn new(table: Arc<ExchangeRateTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ExchangeRateTable {
        &self.table
    }

    /// `amount * rate[code]`, or [`UnknownRate`] when the code is not in the table.
    ///
    /// The amount is not validated here.
    pub fn convert(&self, amount: f64, code: &str) -> Result<f64, UnknownRate> {
        match self.table.rate(code) {
            Some(rate) => Ok(amount * rate),
            None => {
                tracing::warn!(currency = code, "missing exchange rate");
                Err(UnknownRate {
                    code: code.to_string(),
                })
            }
        }
    }
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self::new(Arc::new(ExchangeRateTable::builtin()))
    }
}
