//! Currency codes, pairs and pip conventions.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies accepted by default.
pub const DEFAULT_CURRENCIES: [&str; 15] = [
    "USD", "EUR", "JPY", "GBP", "AUD", "CAD", "CHF", "NZD", "CNY", "SEK", "KRW", "SGD", "NOK",
    "MXN", "HKD",
];

/// Three-letter uppercase ISO-style currency code.
///
/// Parsing is case-insensitive and always stores the uppercase form, so
/// `"usd".parse()` and `"USD".parse()` produce the same code. A parsed code
/// is only well-formed; whether it is accepted is decided by a
/// [`CurrencyAllowList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    pub const USD: CurrencyCode = CurrencyCode(*b"USD");
    pub const EUR: CurrencyCode = CurrencyCode(*b"EUR");
    pub const JPY: CurrencyCode = CurrencyCode(*b"JPY");

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }

    /// Check if this is the US dollar.
    pub fn is_usd(&self) -> bool {
        *self == Self::USD
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(format!("Invalid currency code: {:?}", s));
        }
        let mut code = [0u8; 3];
        for (slot, b) in code.iter_mut().zip(bytes) {
            *slot = b.to_ascii_uppercase();
        }
        Ok(CurrencyCode(code))
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_string()
    }
}

/// Pip size convention of a pair, decided by its quote currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipConvention {
    /// Four-decimal pip (0.0001)
    Standard,
    /// Two-decimal pip for yen-quoted pairs (0.01)
    Yen,
}

impl PipConvention {
    /// Get the convention for a quote currency.
    pub fn for_quote(quote: CurrencyCode) -> Self {
        if quote == CurrencyCode::JPY {
            PipConvention::Yen
        } else {
            PipConvention::Standard
        }
    }

    /// Price increment of one pip.
    pub fn pip_decimal(&self) -> Decimal {
        match self {
            PipConvention::Standard => dec!(0.0001),
            PipConvention::Yen => dec!(0.01),
        }
    }
}

/// A BASE/QUOTE currency pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: CurrencyCode,
    pub quote: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(base: CurrencyCode, quote: CurrencyCode) -> Self {
        Self { base, quote }
    }

    /// Get the pip convention of this pair.
    pub fn pip_convention(&self) -> PipConvention {
        PipConvention::for_quote(self.quote)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Immutable set of currencies the calculator accepts.
///
/// Passed into validation explicitly so callers (and tests) can swap it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyAllowList {
    codes: Vec<CurrencyCode>,
}

impl CurrencyAllowList {
    /// Create an allow-list from codes. Duplicates are dropped, order is kept.
    pub fn new(codes: impl IntoIterator<Item = CurrencyCode>) -> Self {
        let mut unique = Vec::new();
        for code in codes {
            if !unique.contains(&code) {
                unique.push(code);
            }
        }
        Self { codes: unique }
    }

    /// Parse an allow-list from raw code strings.
    pub fn parse<I, S>(codes: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = codes
            .into_iter()
            .map(|c| c.as_ref().parse::<CurrencyCode>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(parsed))
    }

    /// Check membership of an already-parsed code.
    pub fn contains(&self, code: CurrencyCode) -> bool {
        self.codes.contains(&code)
    }

    /// Check raw user input, case-insensitively.
    pub fn is_valid_currency(&self, raw: &str) -> bool {
        self.resolve(raw).is_some()
    }

    /// Parse raw user input and return the code if it is allowed.
    pub fn resolve(&self, raw: &str) -> Option<CurrencyCode> {
        raw.parse::<CurrencyCode>()
            .ok()
            .filter(|code| self.contains(*code))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.codes.iter()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for CurrencyAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCIES.iter().map(|c| CurrencyCode(ascii3(c))))
    }
}

const fn ascii3(s: &str) -> [u8; 3] {
    let b = s.as_bytes();
    [b[0], b[1], b[2]]
}
