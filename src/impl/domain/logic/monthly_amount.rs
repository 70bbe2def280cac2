use crate::domain::entities::commercial_plan::TierRule;

/// Commission owed for one month of a subscription, plus the label of the
/// rule that produced it.
///
/// `month_index` is 1-based and counted from the subscription's own start
/// date: the bounty window covers the first `bounty_months` indices, year 1
/// runs through index 12, everything after is year 2+. No rounding is applied
/// here; currency rounding is a display concern.
pub fn monthly_amount(fee: f64, month_index: i64, rule: &TierRule) -> (f64, String) {
    if month_index <= rule.bounty_months as i64 {
        (
            fee * rule.bounty_percentage,
            format!(
                "Bounty (month {} - {}%)",
                month_index,
                fmt_percent(rule.bounty_percentage)
            ),
        )
    } else if month_index <= 12 {
        (
            fee * rule.year1_percentage,
            format!("Year 1 ({}%)", fmt_percent(rule.year1_percentage)),
        )
    } else {
        (
            fee * rule.year2_percentage,
            format!("Year 2+ ({}%)", fmt_percent(rule.year2_percentage)),
        )
    }
}

/// Render a fraction as a percentage, dropping the decimals when whole.
fn fmt_percent(fraction: f64) -> String {
    let value = fraction * 100.0;
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.2}")
    }
}
