use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::{
    domain::entities::{
        liquidation::{Liquidation, LiquidationId, PaidPeriod},
        partner::Partner,
        payable_item::{PayableItem, PayablePeriod},
        payout_record::{PayoutId, PayoutRecord, PayoutStatus},
    },
    errors::Error,
};

/// Turns a caller-selected subset of statement lines into liquidations plus
/// the payout record wrapping them.
///
/// Validation happens up front, so a failed build leaves nothing half-minted:
/// the selection must be non-empty, every id must name a selectable line, and
/// all lines must belong to a single partner. A prior-balance aggregate is
/// expanded into one liquidation per collapsed month, which keeps those
/// months paid on the next statement run.
pub struct PayoutBuilder<'a> {
    selection: &'a [String],
    ledger: &'a [PayableItem],
    partners: &'a [Partner],
}

impl<'a> PayoutBuilder<'a> {
    pub fn new(
        selection: &'a [String],
        ledger: &'a [PayableItem],
        partners: &'a [Partner],
    ) -> Self {
        Self {
            selection,
            ledger,
            partners,
        }
    }

    pub fn build(self, today: NaiveDate) -> Result<(Vec<Liquidation>, PayoutRecord), Error> {
        if self.selection.is_empty() {
            return Err(Error::EmptySelection);
        }

        let mut items = Vec::with_capacity(self.selection.len());
        for id in self.selection {
            let item = self
                .ledger
                .iter()
                .find(|i| &i.id == id)
                .ok_or_else(|| Error::UnknownItem { id: id.clone() })?;
            if !item.is_selectable {
                return Err(Error::ItemNotSelectable { id: id.clone() });
            }
            items.push(item);
        }

        let partner_id = &items[0].partner_id;
        if let Some(other) = items.iter().find(|i| &i.partner_id != partner_id) {
            return Err(Error::MixedPartnerSelection {
                first: partner_id.to_string(),
                second: other.partner_id.to_string(),
            });
        }
        let partner = self
            .partners
            .iter()
            .find(|p| &p.id == partner_id)
            .ok_or_else(|| Error::UnknownPartner {
                id: partner_id.to_string(),
            })?;

        let mut liquidations = Vec::with_capacity(items.len());
        for item in &items {
            match &item.period {
                PayablePeriod::Month(key) => {
                    liquidations.push(mint(item, PaidPeriod::Month(*key), item.amount, today));
                }
                PayablePeriod::LegacyBalance => {
                    liquidations.push(mint(item, PaidPeriod::LegacyBalance, item.amount, today));
                }
                PayablePeriod::PriorBalance { months, .. } => {
                    for (month, amount) in months {
                        liquidations.push(mint(item, PaidPeriod::Month(*month), *amount, today));
                    }
                }
            }
        }

        let total_amount: f64 = liquidations.iter().map(|l| l.amount).sum();
        let record = PayoutRecord {
            id: PayoutId(format!("INV-{}-{}", today.year(), short_uid())),
            partner_id: partner.id.clone(),
            partner_name: partner.name.clone(),
            generated: today,
            payment_date: None,
            total_amount,
            status: PayoutStatus::Pending,
            items: liquidations.clone(),
        };
        Ok((liquidations, record))
    }
}

fn mint(item: &PayableItem, period: PaidPeriod, amount: f64, today: NaiveDate) -> Liquidation {
    Liquidation {
        id: LiquidationId(format!("L-{}", short_uid())),
        partner_id: item.partner_id.clone(),
        subscription_id: item.subscription_id.clone(),
        period,
        amount,
        payment_date: today,
    }
}

fn short_uid() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
