//! Fixed Currency Catalogue with Macro-Based Generation
//!
//! The converter offers a closed, ordered set of nine currencies. Each entry is
//! declared once in the `define_currencies!` invocation below, which generates
//! the [`CurrencyCode`] enum together with its metadata accessors, parsing and
//! serde support.
//!
//! Every entry also carries a reference valuation in US dollars. Those values
//! are static and only back the development rate provider; live conversions
//! always go through a remote rate source.
//!
//! # Example
//! ```
//! use exchange_rates::CurrencyCode;
//!
//! let eur: CurrencyCode = "eur".parse().unwrap();
//! assert_eq!(eur.name(), "Euro");
//! assert_eq!(CurrencyCode::all()[0], CurrencyCode::USD);
//!
//! let rate = exchange_rates::reference_rate(CurrencyCode::USD, CurrencyCode::USD);
//! assert_eq!(rate, 1.0);
//! ```

use std::collections::HashMap;

/// Returned when a string does not name one of the catalogue currencies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum and its metadata tables
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define the catalogue with auto-generated metadata lookups.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Variant => ("CODE", "Display name", "symbol", "flag", usd_value),
/// }
/// ```
///
/// Declaration order is catalogue order.
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $display:literal, $symbol:literal, $flag:literal, $to_usd:expr)
        ),* $(,)?
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            /// ISO 4217 code.
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            /// Human readable name shown next to the code in pickers.
            pub fn name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $display),*
                }
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $symbol),*
                }
            }

            /// Decorative flag glyph.
            pub fn flag(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $flag),*
                }
            }

            /// Reference value of one unit in US dollars.
            pub fn reference_usd_value(&self) -> f64 {
                match self {
                    $(CurrencyCode::$name => $to_usd),*
                }
            }

            /// All catalogue entries in declaration order.
            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = $crate::UnknownCurrency;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err($crate::UnknownCurrency(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    USD => ("USD", "US Dollar", "$", "🇺🇸", 1.0),
    EUR => ("EUR", "Euro", "€", "🇪🇺", 1.087),
    GBP => ("GBP", "British Pound", "£", "🇬🇧", 1.266),
    JPY => ("JPY", "Japanese Yen", "¥", "🇯🇵", 0.0067),
    AUD => ("AUD", "Australian Dollar", "A$", "🇦🇺", 0.655),
    CAD => ("CAD", "Canadian Dollar", "C$", "🇨🇦", 0.738),
    CHF => ("CHF", "Swiss Franc", "Fr", "🇨🇭", 1.128),
    CNY => ("CNY", "Chinese Yuan", "¥", "🇨🇳", 0.1385),
    INR => ("INR", "Indian Rupee", "₹", "🇮🇳", 0.01203),
}

// ─────────────────────────────────────────────────────────────────────────────
// Reference Rates
// ─────────────────────────────────────────────────────────────────────────────

/// Units of `to` per one unit of `from`, derived from the reference valuations.
pub fn reference_rate(from: CurrencyCode, to: CurrencyCode) -> f64 {
    if from == to {
        return 1.0;
    }
    from.reference_usd_value() / to.reference_usd_value()
}

/// Reference rates from `base` to every catalogue currency, keyed by code.
pub fn reference_rates(base: CurrencyCode) -> HashMap<String, f64> {
    CurrencyCode::all()
        .iter()
        .map(|&c| (c.code().to_string(), reference_rate(base, c)))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
