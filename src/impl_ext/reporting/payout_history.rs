use chrono::NaiveDate;

use crate::domain::entities::payout_record::{PayoutRecord, PayoutStatus};

use super::dashboard_metrics::DateRangeFilter;

/// Headline numbers of the payout history view.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutHistoryMetrics {
    /// Total of payouts whose payment date falls in the current quarter.
    pub paid_this_quarter: f64,
    /// Total of payouts generated in the current quarter, paid or not.
    pub generated_this_quarter: f64,
    /// Backlog: everything still waiting for a payment date.
    pub pending_total: f64,
}

pub fn payout_history_metrics(
    payouts: &[PayoutRecord],
    today: NaiveDate,
) -> PayoutHistoryMetrics {
    let quarter = DateRangeFilter::CurrentQuarter.resolve(today);
    PayoutHistoryMetrics {
        paid_this_quarter: payouts
            .iter()
            .filter(|p| {
                p.status == PayoutStatus::Paid
                    && p.payment_date.is_some_and(|date| quarter.contains(date))
            })
            .map(|p| p.total_amount)
            .sum(),
        generated_this_quarter: payouts
            .iter()
            .filter(|p| quarter.contains(p.generated))
            .map(|p| p.total_amount)
            .sum(),
        pending_total: payouts
            .iter()
            .filter(|p| p.status == PayoutStatus::Pending)
            .map(|p| p.total_amount)
            .sum(),
    }
}
