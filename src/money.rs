//! Money Conversion Module
//!
//! Conversion between the internal whole-unit `u64` representation and the
//! strings shown to customers or read from the catalog. All conversions
//! go through this module.
//!
//! ## Internal Representation
//! - Amounts are [`Rupiah`](crate::core_types::Rupiah), whole units, no scale
//! - Display groups digits in threes with a separator, no decimal places
//!
//! ## Usage
//! ```rust
//! use kedai::money::{format_grouped, parse_price};
//!
//! let price = parse_price("25000").unwrap();
//! assert_eq!(format_grouped(price * 2, ','), "50,000");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core_types::Rupiah;

// ============================================================================
// Error Types
// ============================================================================

/// Price parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Price must not be negative or signed")]
    InvalidAmount,

    #[error("Price too large, would overflow")]
    Overflow,

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

// ============================================================================
// Display configuration
// ============================================================================

/// How an amount is rendered for customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Text placed before the digits, e.g. `"Rp "`
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Thousands separator
    #[serde(default = "default_separator")]
    pub separator: char,
}

fn default_prefix() -> String {
    "Rp ".to_string()
}

fn default_separator() -> char {
    ','
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            separator: default_separator(),
        }
    }
}

impl CurrencyFormat {
    /// Digits only, `,` separator, no prefix
    pub fn plain() -> Self {
        Self {
            prefix: String::new(),
            separator: default_separator(),
        }
    }
}

// ============================================================================
// Parse: Catalog → Internal (String → u64)
// ============================================================================

/// Parse a whole-unit price string.
///
/// # Errors
/// * `InvalidFormat` - empty, decimal point, grouping characters, non-digits
/// * `InvalidAmount` - explicit sign (`-` or `+`)
/// * `Overflow` - does not fit in u64
///
/// Zero is accepted: complimentary items are priced at 0.
pub fn parse_price(price_str: &str) -> Result<Rupiah, MoneyError> {
    let price_str = price_str.trim();
    if price_str.is_empty() {
        return Err(MoneyError::InvalidFormat("empty string".into()));
    }

    if price_str.starts_with('-') || price_str.starts_with('+') {
        return Err(MoneyError::InvalidAmount);
    }

    // Whole units only: grouping and decimals belong to display, not input
    if let Some(bad) = price_str.chars().find(|c| !c.is_ascii_digit()) {
        return Err(MoneyError::InvalidFormat(format!(
            "unexpected character '{}' in '{}'",
            bad, price_str
        )));
    }

    price_str.parse::<u64>().map_err(|_| MoneyError::Overflow)
}

// ============================================================================
// Format: Internal → Client (u64 → String)
// ============================================================================

/// Group digits in threes from the right.
///
/// # Example
/// ```rust
/// use kedai::money::format_grouped;
/// assert_eq!(format_grouped(1_234_567, ','), "1,234,567");
/// assert_eq!(format_grouped(999, '.'), "999");
/// ```
pub fn format_grouped(value: Rupiah, separator: char) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Format with the configured prefix and separator (e.g. `"Rp 50,000"`)
pub fn format_currency(value: Rupiah, currency: &CurrencyFormat) -> String {
    format!(
        "{}{}",
        currency.prefix,
        format_grouped(value, currency.separator)
    )
}

// ============================================================================
// Unit Tests
// ============================================================================
