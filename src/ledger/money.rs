//! Currency metadata and display formatting for minor-unit amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Static metadata for one supported currency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub symbol: &'static str,
    /// Fractional digits shown (0 for yen-like currencies)
    pub decimals: u32,
    pub name: &'static str,
}

pub const CURRENCIES: &[CurrencyInfo] = &[
    CurrencyInfo { code: "USD", symbol: "$", decimals: 2, name: "US Dollar" },
    CurrencyInfo { code: "EUR", symbol: "\u{20ac}", decimals: 2, name: "Euro" },
    CurrencyInfo { code: "GBP", symbol: "\u{a3}", decimals: 2, name: "British Pound" },
    CurrencyInfo { code: "CAD", symbol: "C$", decimals: 2, name: "Canadian Dollar" },
    CurrencyInfo { code: "AUD", symbol: "A$", decimals: 2, name: "Australian Dollar" },
    CurrencyInfo { code: "JPY", symbol: "\u{a5}", decimals: 0, name: "Japanese Yen" },
    CurrencyInfo { code: "INR", symbol: "\u{20b9}", decimals: 2, name: "Indian Rupee" },
    CurrencyInfo { code: "CHF", symbol: "CHF", decimals: 2, name: "Swiss Franc" },
    CurrencyInfo { code: "CNY", symbol: "\u{a5}", decimals: 2, name: "Chinese Yuan" },
    CurrencyInfo { code: "BRL", symbol: "R$", decimals: 2, name: "Brazilian Real" },
    CurrencyInfo { code: "KRW", symbol: "\u{20a9}", decimals: 0, name: "South Korean Won" },
    CurrencyInfo { code: "SEK", symbol: "kr", decimals: 2, name: "Swedish Krona" },
    CurrencyInfo { code: "PLN", symbol: "z\u{142}", decimals: 2, name: "Polish Zloty" },
    CurrencyInfo { code: "SGD", symbol: "S$", decimals: 2, name: "Singapore Dollar" },
    CurrencyInfo { code: "NZD", symbol: "NZ$", decimals: 2, name: "New Zealand Dollar" },
];

const FALLBACK: CurrencyInfo = CurrencyInfo {
    code: "???",
    symbol: "$",
    decimals: 2,
    name: "Unknown",
};

pub fn find_currency(code: &str) -> Option<&'static CurrencyInfo> {
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Format minor units as a display string, e.g. `format_cents(-1234, "USD")`
/// is "-$12.34". Unknown codes fall back to "$" with two decimals.
pub fn format_cents(cents: i64, code: &str) -> String {
    let info = find_currency(code).unwrap_or(&FALLBACK);
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();

    if info.decimals == 0 {
        // Whole units, rounded half-up from the stored cents
        let whole = (Decimal::from(magnitude) / dec!(100))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        return format!("{}{}{}", sign, info.symbol, whole);
    }

    format!(
        "{}{}{}.{:02}",
        sign,
        info.symbol,
        magnitude / 100,
        magnitude % 100
    )
}
