use std::path::Path;

use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};

use crate::{
    domain::entities::{
        liquidation::Liquidation,
        payout_record::{PayoutId, PayoutRecord, PayoutStatus},
    },
    errors::Error,
};

/// In-memory log of liquidations and the payout records that minted them,
/// with JSON snapshot persistence.
///
/// Uniqueness of (subscription, period) is enforced here, at the storage
/// layer: a registration batch is validated in full before anything is
/// inserted, so two sessions racing on the same pending month cannot both
/// book it, and a failed batch leaves the store untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayoutStore {
    liquidations: Vec<Liquidation>,
    payouts: Vec<PayoutRecord>,
}

impl PayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn liquidations(&self) -> &[Liquidation] {
        &self.liquidations
    }

    /// Newest first, the order the history view presents them in.
    pub fn payouts(&self) -> &[PayoutRecord] {
        &self.payouts
    }

    pub fn register(
        &mut self,
        liquidations: Vec<Liquidation>,
        record: PayoutRecord,
    ) -> Result<(), Error> {
        for (i, liquidation) in liquidations.iter().enumerate() {
            let duplicate = self
                .liquidations
                .iter()
                .chain(&liquidations[..i])
                .any(|l| {
                    l.subscription_id == liquidation.subscription_id
                        && l.period == liquidation.period
                });
            if duplicate {
                return Err(Error::DuplicatePeriod {
                    subscription: liquidation.subscription_id.to_string(),
                    period: liquidation.period.to_string(),
                });
            }
        }
        self.liquidations.extend(liquidations);
        self.payouts.insert(0, record);
        Ok(())
    }

    /// Stamping a date marks the payout paid; clearing it reverts to
    /// pending. The only mutation allowed on an existing record.
    pub fn set_payment_date(
        &mut self,
        id: &PayoutId,
        date: Option<NaiveDate>,
    ) -> Result<PayoutRecord, Error> {
        let record = self
            .payouts
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| Error::UnknownPayout { id: id.to_string() })?;
        record.payment_date = date;
        record.status = if date.is_some() {
            PayoutStatus::Paid
        } else {
            PayoutStatus::Pending
        };
        Ok(record.clone())
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    pub async fn save_snapshot(&self, path: impl AsRef<Path> + Send) -> Result<(), Error> {
        let path = path.as_ref();
        let json = self.to_json()?;
        tokio::fs::write(path, json)
            .await
            .map_err(|source| Error::Write {
                path: path.display().to_string(),
                source,
            })
    }

    pub async fn load_snapshot(path: impl AsRef<Path> + Send) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| Error::Read {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::entities::{
        liquidation::{LiquidationId, PaidPeriod},
        month_key::MonthKey,
        partner::PartnerId,
        subscription::SubscriptionId,
    };

    use super::*;

    fn liquidation(id: &str, sub: &str, month: (i32, u32)) -> Liquidation {
        Liquidation {
            id: LiquidationId(id.into()),
            partner_id: PartnerId("P01".into()),
            subscription_id: SubscriptionId(sub.into()),
            period: PaidPeriod::Month(MonthKey::new(month.0, month.1).unwrap()),
            amount: 20.0,
            payment_date: NaiveDate::from_ymd_opt(2024, 8, 5).unwrap(),
        }
    }

    fn record(id: &str, items: Vec<Liquidation>) -> PayoutRecord {
        PayoutRecord {
            id: PayoutId(id.into()),
            partner_id: PartnerId("P01".into()),
            partner_name: "3Dids".into(),
            generated: NaiveDate::from_ymd_opt(2024, 8, 5).unwrap(),
            payment_date: None,
            total_amount: items.iter().map(|l| l.amount).sum(),
            status: PayoutStatus::Pending,
            items,
        }
    }

    #[test]
    fn duplicate_periods_reject_the_whole_batch() {
        let mut store = PayoutStore::new();
        let first = vec![liquidation("L1", "S01", (2024, 5))];
        store
            .register(first.clone(), record("INV-1", first))
            .unwrap();

        let batch = vec![
            liquidation("L2", "S01", (2024, 6)),
            liquidation("L3", "S01", (2024, 5)),
        ];
        let result = store.register(batch.clone(), record("INV-2", batch));
        assert!(matches!(result, Err(Error::DuplicatePeriod { .. })));
        // Nothing from the failed batch landed.
        assert_eq!(store.liquidations().len(), 1);
        assert_eq!(store.payouts().len(), 1);
    }

    #[test]
    fn duplicates_within_one_batch_are_caught() {
        let mut store = PayoutStore::new();
        let batch = vec![
            liquidation("L1", "S01", (2024, 5)),
            liquidation("L2", "S01", (2024, 5)),
        ];
        let result = store.register(batch.clone(), record("INV-1", batch));
        assert!(matches!(result, Err(Error::DuplicatePeriod { .. })));
        assert!(store.liquidations().is_empty());
    }

    #[test]
    fn payment_date_toggles_status() {
        let mut store = PayoutStore::new();
        let items = vec![liquidation("L1", "S01", (2024, 5))];
        store
            .register(items.clone(), record("INV-1", items))
            .unwrap();

        let id = PayoutId("INV-1".into());
        let paid = store
            .set_payment_date(&id, NaiveDate::from_ymd_opt(2024, 8, 20))
            .unwrap();
        assert_eq!(paid.status, PayoutStatus::Paid);

        let reverted = store.set_payment_date(&id, None).unwrap();
        assert_eq!(reverted.status, PayoutStatus::Pending);
        assert_eq!(reverted.payment_date, None);

        let missing = PayoutId("INV-404".into());
        assert!(matches!(
            store.set_payment_date(&missing, None),
            Err(Error::UnknownPayout { .. })
        ));
    }

    #[test]
    fn snapshot_round_trips() {
        let mut store = PayoutStore::new();
        let items = vec![liquidation("L1", "S01", (2024, 5))];
        store
            .register(items.clone(), record("INV-1", items))
            .unwrap();
        let json = store.to_json().unwrap();
        let restored = PayoutStore::from_json(&json).unwrap();
        assert_eq!(restored, store);
        assert!(PayoutStore::from_json("not json").is_err());
    }
}
