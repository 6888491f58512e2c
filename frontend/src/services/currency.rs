use shared::BudgetResult;

/// Currency adopted until a country with a known currency is picked
pub const DEFAULT_CURRENCY: &str = "USD";

pub const FALLBACK_SYMBOL: &str = "$";

const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("INR", "₹"),
    ("JPY", "¥"),
    ("AUD", "A$"),
    ("CAD", "C$"),
    ("CHF", "CHF"),
    ("CNY", "¥"),
    ("RUB", "₽"),
];

pub fn symbol_for_code(code: &str) -> Option<&'static str> {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, symbol)| *symbol)
}

/// Symbol for a history row, which carries its own currency code
pub fn symbol_or_fallback(code: &str) -> &'static str {
    symbol_for_code(code).unwrap_or(FALLBACK_SYMBOL)
}

/// Symbol shown next to amounts.
///
/// A symbol supplied by the latest result wins over the selected code,
/// even when the two disagree.
pub fn resolve_symbol(result: Option<&BudgetResult>, currency: &str) -> String {
    if let Some(symbol) = result
        .and_then(|r| r.currency_symbol.as_deref())
        .filter(|s| !s.is_empty())
    {
        return symbol.to_string();
    }
    symbol_or_fallback(currency).to_string()
}
