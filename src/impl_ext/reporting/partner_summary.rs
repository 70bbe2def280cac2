use chrono::NaiveDate;

use crate::domain::entities::{
    liquidation::Liquidation,
    partner::PartnerId,
    payable_item::{PayableItem, PayableStatus},
    subscription::{Subscription, SubscriptionStatus},
};

/// The per-partner header numbers of the detail view: portfolio, paid-out
/// history, and what the current statement says is still owed or withheld.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerSummary {
    pub active_clients: usize,
    pub cancelled_clients: usize,
    pub mrr: f64,
    pub total_paid: f64,
    pub last_payment: Option<NaiveDate>,
    pub pending: f64,
    pub locked: f64,
}

pub fn partner_summary(
    partner_id: &PartnerId,
    subscriptions: &[Subscription],
    liquidations: &[Liquidation],
    statement: &[PayableItem],
) -> PartnerSummary {
    let own_subs: Vec<&Subscription> = subscriptions
        .iter()
        .filter(|s| &s.partner_id == partner_id)
        .collect();
    let own_liqs: Vec<&Liquidation> = liquidations
        .iter()
        .filter(|l| &l.partner_id == partner_id)
        .collect();
    let own_lines = statement.iter().filter(|i| &i.partner_id == partner_id);

    let (mut pending, mut locked) = (0.0, 0.0);
    for line in own_lines {
        match line.status {
            PayableStatus::Pending => pending += line.amount,
            PayableStatus::Locked => locked += line.amount,
            _ => {}
        }
    }

    PartnerSummary {
        active_clients: own_subs
            .iter()
            .filter(|s| s.status == SubscriptionStatus::Active)
            .count(),
        cancelled_clients: own_subs
            .iter()
            .filter(|s| s.status == SubscriptionStatus::Cancelled)
            .count(),
        mrr: own_subs
            .iter()
            .filter(|s| s.status == SubscriptionStatus::Active)
            .map(|s| s.fee)
            .sum(),
        total_paid: own_liqs.iter().map(|l| l.amount).sum(),
        last_payment: own_liqs.iter().map(|l| l.payment_date).max(),
        pending,
        locked,
    }
}
