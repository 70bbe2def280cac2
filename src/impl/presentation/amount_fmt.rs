use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};

/// Format a cash amount with the currency's symbol, its standard number of
/// decimal places (EUR = 2, JPY = 0) and thousands separators.
///
/// Uses the en locale (`1,234.56`) regardless of the user's locale, for
/// consistency across statements. Display-only: ledger math never reads
/// formatted values back.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    let decimals = currency.exponent().unwrap_or(0) as usize;
    let fixed = format!("{amount:.decimals$}");
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };
    let sign = if integer.starts_with('-') { "-" } else { "" };
    let grouped = integer
        .trim_start_matches('-')
        .parse::<i64>()
        .map(|v| v.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| integer.trim_start_matches('-').to_string());
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction} {}", currency.symbol()),
        None => format!("{sign}{grouped} {}", currency.symbol()),
    }
}
