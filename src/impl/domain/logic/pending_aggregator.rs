use crate::domain::entities::{
    month_key::MonthKey,
    payable_item::{PayableItem, PayablePeriod, PayableStatus},
    subscription::SubscriptionId,
};

/// Fold pending months from years before `current_year` into one actionable
/// prior-balance line per subscription.
///
/// Only `Pending` monthly lines are collapsed; paid, paused and locked lines
/// stay granular, as do all lines from the current year. The aggregate keeps
/// the collapsed months so registration can expand it back.
pub(crate) fn collapse_stale_pending(
    items: Vec<PayableItem>,
    current_year: i32,
) -> Vec<PayableItem> {
    let mut kept = Vec::with_capacity(items.len());
    let mut stale: Vec<(SubscriptionId, Vec<PayableItem>)> = Vec::new();

    for item in items {
        let is_stale_pending = item.status == PayableStatus::Pending
            && matches!(&item.period, PayablePeriod::Month(key) if key.year < current_year);
        if !is_stale_pending {
            kept.push(item);
            continue;
        }
        match stale.iter_mut().find(|(id, _)| *id == item.subscription_id) {
            Some((_, bucket)) => bucket.push(item),
            None => stale.push((item.subscription_id.clone(), vec![item])),
        }
    }

    for (subscription_id, bucket) in stale {
        let months: Vec<(MonthKey, f64)> = bucket
            .iter()
            .filter_map(|item| match &item.period {
                PayablePeriod::Month(key) => Some((*key, item.amount)),
                _ => None,
            })
            .collect();
        let amount: f64 = months.iter().map(|(_, amount)| *amount).sum();
        kept.push(PayableItem {
            id: format!("PRIOR-{subscription_id}"),
            subscription_id,
            partner_id: bucket[0].partner_id.clone(),
            client: bucket[0].client.clone(),
            period: PayablePeriod::PriorBalance {
                through_year: current_year - 1,
                months,
            },
            rule: format!("Accumulated through end of {}", current_year - 1),
            amount,
            status: PayableStatus::Pending,
            is_selectable: true,
            months_active: bucket[0].months_active,
        });
    }

    kept
}

#[cfg(test)]
mod tests {
    use crate::domain::entities::partner::PartnerId;

    use super::*;

    fn line(sub: &str, month: &str, amount: f64, status: PayableStatus) -> PayableItem {
        let key: MonthKey = month.parse().unwrap();
        PayableItem {
            id: format!("{sub}-{key}"),
            subscription_id: SubscriptionId(sub.into()),
            partner_id: PartnerId("P01".into()),
            client: "Hispanitas".into(),
            period: PayablePeriod::Month(key),
            rule: "Year 1 (20%)".into(),
            amount,
            status,
            is_selectable: status == PayableStatus::Pending,
            months_active: 15,
        }
    }

    #[test]
    fn prior_year_pendings_collapse_into_one_line() {
        let items = vec![
            line("S1", "2023-03", 20.0, PayableStatus::Pending),
            line("S1", "2023-11", 20.0, PayableStatus::Pending),
            line("S1", "2024-01", 20.0, PayableStatus::Pending),
        ];
        let out = collapse_stale_pending(items, 2024);
        assert_eq!(out.len(), 2);
        let aggregate = out
            .iter()
            .find(|i| matches!(i.period, PayablePeriod::PriorBalance { .. }))
            .expect("aggregate line");
        assert!((aggregate.amount - 40.0).abs() < 1e-9);
        assert_eq!(aggregate.id, "PRIOR-S1");
        assert!(aggregate.is_selectable);
        let PayablePeriod::PriorBalance {
            through_year,
            months,
        } = &aggregate.period
        else {
            unreachable!()
        };
        assert_eq!(*through_year, 2023);
        assert_eq!(months.len(), 2);
        // The current-year line stays granular.
        assert!(out.iter().any(|i| i.id == "S1-2024-01"));
    }

    #[test]
    fn non_pending_stale_lines_stay_granular() {
        let items = vec![
            line("S1", "2023-03", 20.0, PayableStatus::Paid),
            line("S1", "2023-04", 20.0, PayableStatus::Paused),
            line("S1", "2023-05", 20.0, PayableStatus::Locked),
        ];
        let out = collapse_stale_pending(items, 2024);
        assert_eq!(out.len(), 3);
        assert!(!out
            .iter()
            .any(|i| matches!(i.period, PayablePeriod::PriorBalance { .. })));
    }

    #[test]
    fn aggregates_per_subscription() {
        let items = vec![
            line("S1", "2023-03", 10.0, PayableStatus::Pending),
            line("S2", "2023-03", 30.0, PayableStatus::Pending),
        ];
        let out = collapse_stale_pending(items, 2024);
        assert_eq!(out.len(), 2);
        assert!(out.iter().any(|i| i.id == "PRIOR-S1"));
        assert!(out.iter().any(|i| i.id == "PRIOR-S2"));
    }
}
