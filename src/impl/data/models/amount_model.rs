use std::str::FromStr;

use crate::errors::Error;

/// Money cell as exported by spreadsheets: currency symbols, thousands
/// separators and comma decimal marks are all tolerated (`"€ 118,00"`,
/// `"1.234,56"`, `"118.00"`).
#[derive(Debug)]
pub(crate) struct AmountModel(pub f64);

impl FromStr for AmountModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '€' && *c != '$')
            .collect();
        let normalized = if stripped.contains(',') {
            // Comma is the decimal mark; any dots are thousands separators.
            stripped.replace('.', "").replace(',', ".")
        } else {
            stripped
        };
        normalized
            .parse::<f64>()
            .map(AmountModel)
            .map_err(|_| Error::InvalidAmount {
                value: s.to_string(),
            })
    }
}

impl AmountModel {
    /// Malformed cells default to zero; the engine assumes well-typed input.
    pub(crate) fn parse_or_zero(s: &str) -> f64 {
        s.parse::<AmountModel>().map(|model| model.0).unwrap_or(0.0)
    }
}
