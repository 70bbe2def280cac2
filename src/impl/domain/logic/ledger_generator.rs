use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::domain::entities::{
    commercial_plan::CommercialPlan,
    company::Company,
    dataset::Dataset,
    liquidation::{Liquidation, PaidPeriod},
    month_key::MonthKey,
    partner::{Partner, PartnerId},
    payable_item::{PayableItem, PayablePeriod, PayableStatus},
    subscription::Subscription,
};

use super::{
    monthly_amount::monthly_amount,
    pending_aggregator::collapse_stale_pending,
    rule_resolver::{resolve_rule, RuleResolution},
    utils::months_between,
};

/// Months-active sentinel on the legacy opening-balance line, so it always
/// ranks oldest.
pub(crate) const LEGACY_MONTHS_ACTIVE: i64 = 999;

/// The input collections of a statement run, borrowed from wherever the
/// caller keeps them.
#[derive(Debug, Clone, Copy)]
pub struct StatementInputs<'a> {
    pub subscriptions: &'a [Subscription],
    pub liquidations: &'a [Liquidation],
    pub partners: &'a [Partner],
    pub plans: &'a [CommercialPlan],
    pub companies: &'a [Company],
}

impl<'a> StatementInputs<'a> {
    pub fn from_dataset(dataset: &'a Dataset) -> Self {
        Self {
            subscriptions: &dataset.subscriptions,
            liquidations: &dataset.liquidations,
            partners: &dataset.partners,
            plans: &dataset.plans,
            companies: &dataset.companies,
        }
    }
}

/// Derive the full payable statement, one line per billable period, restricted
/// to one partner when `scope` is given.
///
/// Pure with respect to its arguments: statuses come from the liquidation log
/// and the pause/vesting configuration on every run, so the statement can
/// never drift from the payment history. `today` is the evaluation clock.
pub fn generate_statement(
    inputs: &StatementInputs<'_>,
    scope: Option<&PartnerId>,
    today: NaiveDate,
) -> Vec<PayableItem> {
    let mut items = Vec::new();
    for subscription in inputs.subscriptions {
        if scope.is_some_and(|partner| partner != &subscription.partner_id) {
            continue;
        }
        generate_for_subscription(subscription, inputs, today, &mut items);
    }

    let mut items = collapse_stale_pending(items, today.year());
    items.sort_by(|a, b| a.period.sort_key().cmp(&b.period.sort_key()));
    debug!(lines = items.len(), "payable statement generated");
    items
}

fn generate_for_subscription(
    subscription: &Subscription,
    inputs: &StatementInputs<'_>,
    today: NaiveDate,
    out: &mut Vec<PayableItem>,
) {
    let partner = inputs
        .partners
        .iter()
        .find(|p| p.id == subscription.partner_id);
    let tier = partner.map(|p| p.tier).unwrap_or_default();
    let plan_id = subscription
        .plan_id
        .as_ref()
        .or_else(|| partner.and_then(|p| p.plan_id.as_ref()));

    let rule = match resolve_rule(tier, plan_id, inputs.plans) {
        RuleResolution::Found(rule) => rule,
        RuleResolution::Fallback { rule, reason } => {
            warn!(
                subscription = %subscription.id,
                ?reason,
                "billing on a fallback tier rule"
            );
            rule
        }
        RuleResolution::Unresolvable => {
            warn!(
                subscription = %subscription.id,
                "no tier rules available, subscription skipped"
            );
            return;
        }
    };

    let client = subscription.client_name(inputs.companies).to_string();

    // Legacy opening balance: billed as a single lump line until a
    // liquidation tagged with the legacy sentinel exists for it.
    if let Some(balance) = subscription.opening_balance.filter(|b| *b > 0.0) {
        let legacy_paid = inputs.liquidations.iter().any(|l| {
            l.subscription_id == subscription.id && l.period == PaidPeriod::LegacyBalance
        });
        if !legacy_paid {
            out.push(PayableItem {
                id: format!("LEGACY-{}", subscription.id),
                subscription_id: subscription.id.clone(),
                partner_id: subscription.partner_id.clone(),
                client: client.clone(),
                period: PayablePeriod::LegacyBalance,
                rule: "Accumulated debt (migration)".to_string(),
                amount: balance,
                status: PayableStatus::Pending,
                is_selectable: true,
                months_active: LEGACY_MONTHS_ACTIVE,
            });
        }
    }

    let months_active_total = months_between(subscription.start_date, today);
    let in_lockup = months_active_total < rule.vesting_months as i64;

    // The commission clock decides which months get a line; rate thresholds
    // stay anchored at the true subscription start.
    let anchor = MonthKey::from_date(subscription.start_date);
    let current = MonthKey::from_date(today);
    let mut month = MonthKey::from_date(subscription.commission_clock_start());

    while month <= current {
        let month_index = month.months_since(anchor) + 1;
        let (amount, rule_label) = monthly_amount(subscription.fee, month_index, rule);

        let paid = inputs.liquidations.iter().any(|l| {
            l.subscription_id == subscription.id && l.period == PaidPeriod::Month(month)
        });
        let (status, is_selectable) = if paid {
            (PayableStatus::Paid, false)
        } else if subscription.paused_months.contains(&month) {
            (PayableStatus::Paused, false)
        } else if in_lockup {
            (PayableStatus::Locked, false)
        } else {
            (PayableStatus::Pending, true)
        };

        out.push(PayableItem {
            id: format!("{}-{}", subscription.id, month),
            subscription_id: subscription.id.clone(),
            partner_id: subscription.partner_id.clone(),
            client: client.clone(),
            period: PayablePeriod::Month(month),
            rule: rule_label,
            amount,
            status,
            is_selectable,
            months_active: months_active_total,
        });

        month = month.next();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::domain::entities::{
        commercial_plan::{PartnerTier, PlanId, TierRule},
        liquidation::LiquidationId,
        partner::PartnerStatus,
        subscription::{ClientRef, SubscriptionId, SubscriptionStatus},
    };

    use super::*;

    const TODAY: (i32, u32, u32) = (2024, 8, 5);

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(TODAY.0, TODAY.1, TODAY.2).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan(vesting_months: u32) -> CommercialPlan {
        CommercialPlan {
            id: PlanId("PLAN-2025".into()),
            name: "Partner program".into(),
            start_date: date(2023, 1, 1),
            is_active: true,
            is_default: true,
            rules: vec![TierRule {
                tier: PartnerTier::Silver,
                min_clients: 0,
                max_clients: Some(9),
                bounty_months: 1,
                bounty_percentage: 1.0,
                year1_percentage: 0.20,
                year2_percentage: 0.15,
                vesting_months,
            }],
        }
    }

    fn partner() -> Partner {
        Partner {
            id: PartnerId("P01".into()),
            name: "3Dids".into(),
            contact: "Andres".into(),
            email: "finanzas@example.com".into(),
            status: PartnerStatus::Partner,
            tier: PartnerTier::Silver,
            enrolled: Some(date(2023, 1, 15)),
            commissionable: true,
            plan_id: Some(PlanId("PLAN-2025".into())),
        }
    }

    fn subscription(start: NaiveDate) -> Subscription {
        Subscription {
            id: SubscriptionId("S01".into()),
            partner_id: PartnerId("P01".into()),
            client: ClientRef::Named("Hispanitas".into()),
            fee: 100.0,
            start_date: start,
            end_date: None,
            status: SubscriptionStatus::Active,
            opening_balance: None,
            commission_start: None,
            paused_months: HashSet::new(),
            plan_id: None,
        }
    }

    fn paid(sub: &str, period: PaidPeriod) -> Liquidation {
        Liquidation {
            id: LiquidationId("L01".into()),
            partner_id: PartnerId("P01".into()),
            subscription_id: SubscriptionId(sub.into()),
            period,
            amount: 100.0,
            payment_date: date(2024, 2, 15),
        }
    }

    fn run(
        subscriptions: &[Subscription],
        liquidations: &[Liquidation],
        scope: Option<&PartnerId>,
    ) -> Vec<PayableItem> {
        let partners = vec![partner()];
        let plans = vec![plan(6)];
        let inputs = StatementInputs {
            subscriptions,
            liquidations,
            partners: &partners,
            plans: &plans,
            companies: &[],
        };
        generate_statement(&inputs, scope, today())
    }

    fn assert_amount(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn one_line_per_month_from_start_through_today() {
        let subs = vec![subscription(date(2024, 1, 14))];
        let items = run(&subs, &[], None);
        let keys: Vec<String> = items.iter().map(|i| i.period.to_string()).collect();
        assert_eq!(
            keys,
            vec![
                "2024-01", "2024-02", "2024-03", "2024-04", "2024-05", "2024-06", "2024-07",
                "2024-08"
            ]
        );
        // Including the current, only partially elapsed, month.
        assert_eq!(items.last().unwrap().id, "S01-2024-08");
    }

    #[test]
    fn statement_is_a_pure_function_of_its_inputs() {
        let subs = vec![subscription(date(2024, 1, 14))];
        let liqs = vec![paid("S01", PaidPeriod::Month(MonthKey::new(2024, 1).unwrap()))];
        assert_eq!(run(&subs, &liqs, None), run(&subs, &liqs, None));
    }

    #[test]
    fn liquidated_months_are_paid_and_not_selectable() {
        let subs = vec![subscription(date(2024, 1, 14))];
        let liqs = vec![paid("S01", PaidPeriod::Month(MonthKey::new(2024, 2).unwrap()))];
        let items = run(&subs, &liqs, None);
        let february = items.iter().find(|i| i.id == "S01-2024-02").unwrap();
        assert_eq!(february.status, PayableStatus::Paid);
        assert!(!february.is_selectable);
        let march = items.iter().find(|i| i.id == "S01-2024-03").unwrap();
        assert_eq!(march.status, PayableStatus::Pending);
        assert!(march.is_selectable);
    }

    #[test]
    fn paused_months_are_skipped_without_moving_the_counter() {
        let mut sub = subscription(date(2024, 1, 14));
        sub.paused_months
            .insert(MonthKey::new(2024, 7).unwrap());
        let items = run(&vec![sub], &[], None);
        let july = items.iter().find(|i| i.id == "S01-2024-07").unwrap();
        assert_eq!(july.status, PayableStatus::Paused);
        assert!(!july.is_selectable);
        // August is month index 8, still billed at the year-1 rate.
        let august = items.iter().find(|i| i.id == "S01-2024-08").unwrap();
        assert_amount(august.amount, 20.0);
    }

    #[test]
    fn lockup_lifts_exactly_at_the_vesting_age() {
        // Subscription exactly `vesting_months` old: released.
        let at_vesting = vec![subscription(date(2024, 2, 5))];
        let items = run(&at_vesting, &[], None);
        assert_eq!(items[0].months_active, 6);
        assert!(items.iter().all(|i| i.status == PayableStatus::Pending));

        // One month younger: every line still locked.
        let under_vesting = vec![subscription(date(2024, 3, 5))];
        let items = run(&under_vesting, &[], None);
        assert_eq!(items[0].months_active, 5);
        assert!(items.iter().all(|i| i.status == PayableStatus::Locked));
        assert!(items.iter().all(|i| !i.is_selectable));
    }

    #[test]
    fn locked_amounts_are_still_computed() {
        let subs = vec![subscription(date(2024, 6, 1))];
        let items = run(&subs, &[], None);
        let first = items.iter().find(|i| i.id == "S01-2024-06").unwrap();
        assert_eq!(first.status, PayableStatus::Locked);
        assert_amount(first.amount, 100.0);
        assert_eq!(first.rule, "Bounty (month 1 - 100%)");
    }

    #[test]
    fn seven_month_old_subscription_scenario() {
        // fee=100, bounty 1 month @ 100%, year-1 20%, vesting 6, started
        // seven months ago: month 1 pays the full fee, month 7 the year-1
        // rate, and nothing is locked.
        let subs = vec![subscription(date(2024, 1, 5))];
        let items = run(&subs, &[], None);
        assert_eq!(items[0].months_active, 7);
        let month1 = items.iter().find(|i| i.id == "S01-2024-01").unwrap();
        assert_amount(month1.amount, 100.0);
        assert_eq!(month1.status, PayableStatus::Pending);
        let month7 = items.iter().find(|i| i.id == "S01-2024-07").unwrap();
        assert_amount(month7.amount, 20.0);
        assert_eq!(month7.status, PayableStatus::Pending);
    }

    #[test]
    fn clock_override_moves_lines_but_not_rate_thresholds() {
        let mut sub = subscription(date(2023, 6, 1));
        sub.commission_start = Some(date(2024, 1, 1));
        let items = run(&vec![sub], &[], None);
        // No lines before the override month.
        assert!(items.iter().all(|i| i.period.to_string() >= "2024-01".to_string()));
        // 2024-01 is month index 8 of the subscription: year-1 rate, not bounty.
        let first = items.iter().find(|i| i.id == "S01-2024-01").unwrap();
        assert_amount(first.amount, 20.0);
        assert_eq!(first.rule, "Year 1 (20%)");
        // Month 13 (2024-06) switches to the year-2 rate.
        let june = items.iter().find(|i| i.id == "S01-2024-06").unwrap();
        assert_amount(june.amount, 15.0);
    }

    #[test]
    fn legacy_balance_emitted_once_and_suppressed_when_paid() {
        let mut sub = subscription(date(2024, 1, 14));
        sub.opening_balance = Some(450.0);
        let subs = vec![sub];

        let items = run(&subs, &[], None);
        let legacy = items.iter().find(|i| i.id == "LEGACY-S01").unwrap();
        assert_amount(legacy.amount, 450.0);
        assert_eq!(legacy.months_active, LEGACY_MONTHS_ACTIVE);
        assert!(legacy.is_selectable);
        // Sorted to the very top.
        assert_eq!(items[0].id, "LEGACY-S01");

        let liqs = vec![paid("S01", PaidPeriod::LegacyBalance)];
        let items = run(&subs, &liqs, None);
        assert!(!items.iter().any(|i| i.id == "LEGACY-S01"));
    }

    #[test]
    fn stale_pending_years_collapse_into_a_prior_balance_line() {
        let subs = vec![subscription(date(2023, 3, 1))];
        let items = run(&subs, &[], None);
        let aggregate = items
            .iter()
            .find(|i| matches!(i.period, PayablePeriod::PriorBalance { .. }))
            .expect("aggregate line");
        // 2023-03..2023-12: one bounty month plus nine year-1 months.
        assert_amount(aggregate.amount, 100.0 + 9.0 * 20.0);
        // Granular lines remain only for the current year.
        assert!(items
            .iter()
            .filter(|i| matches!(i.period, PayablePeriod::Month(_)))
            .all(|i| i.period.to_string().starts_with("2024")));
        // Aggregate sorts before the monthly lines.
        assert_eq!(items[0].id, "PRIOR-S01");
    }

    #[test]
    fn scope_restricts_to_one_partner() {
        let mut other = subscription(date(2024, 1, 14));
        other.id = SubscriptionId("S02".into());
        other.partner_id = PartnerId("P02".into());
        let subs = vec![subscription(date(2024, 1, 14)), other];
        let scope = PartnerId("P01".into());
        let items = run(&subs, &[], Some(&scope));
        assert!(!items.is_empty());
        assert!(items.iter().all(|i| i.partner_id == scope));
    }

    #[test]
    fn future_start_dates_produce_no_lines() {
        let subs = vec![subscription(date(2025, 1, 1))];
        assert!(run(&subs, &[], None).is_empty());
    }

    #[test]
    fn subscriptions_without_any_plan_are_skipped() {
        let subs = vec![subscription(date(2024, 1, 14))];
        let partners = vec![partner()];
        let inputs = StatementInputs {
            subscriptions: &subs,
            liquidations: &[],
            partners: &partners,
            plans: &[],
            companies: &[],
        };
        assert!(generate_statement(&inputs, None, today()).is_empty());
    }
}
