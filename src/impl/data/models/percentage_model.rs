/// Percentage cell covering the spellings found in real plan sheets:
/// `"20%"`, `"0,2"`, `"0.2"` and `"20"` all read as `0.2`. A bare `1` stays
/// `1.0` — bounty columns use it to mean 100%.
#[derive(Debug)]
pub(crate) struct PercentageModel;

impl PercentageModel {
    /// Out-of-range and malformed values are normalized, never rejected;
    /// plan authoring surfaces them separately.
    pub(crate) fn parse_or_zero(raw: &str) -> f64 {
        let cleaned = raw.replace(',', ".").replace('%', "");
        let Ok(value) = cleaned.trim().parse::<f64>() else {
            return 0.0;
        };
        if raw.contains('%') || value > 1.0 {
            value / 100.0
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_parses(input: &str, expected: f64) {
        let actual = PercentageModel::parse_or_zero(input);
        assert!(
            (actual - expected).abs() < 1e-9,
            "'{input}': expected {expected}, got {actual}"
        );
    }

    #[test]
    fn normalizes_common_spellings() {
        assert_parses("20%", 0.20);
        assert_parses("0,2", 0.20);
        assert_parses("0.2", 0.20);
        assert_parses("20", 0.20);
    }

    #[test]
    fn bare_one_means_full_fee() {
        assert_parses("1", 1.0);
        assert_parses("100%", 1.0);
    }

    #[test]
    fn malformed_cells_default_to_zero() {
        assert_parses("", 0.0);
        assert_parses("n/a", 0.0);
    }
}
