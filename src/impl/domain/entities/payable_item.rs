use std::fmt;

use super::{month_key::MonthKey, partner::PartnerId, subscription::SubscriptionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayableStatus {
    Pending,
    Paid,
    Locked,
    Paused,
}

impl PayableStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PayableStatus::Pending => "Pending",
            PayableStatus::Paid => "Paid",
            PayableStatus::Locked => "Lock-up",
            PayableStatus::Paused => "Paused",
        }
    }
}

impl fmt::Display for PayableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The period a ledger line covers.
///
/// `PriorBalance` carries the collapsed months (with their individual
/// amounts) so that registering the aggregate can expand it back into one
/// liquidation per month, keeping those months suppressed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum PayablePeriod {
    Month(MonthKey),
    LegacyBalance,
    PriorBalance {
        through_year: i32,
        months: Vec<(MonthKey, f64)>,
    },
}

impl PayablePeriod {
    /// Display rank: legacy balance first, aggregated prior balance second,
    /// then months in chronological order.
    pub(crate) fn sort_key(&self) -> (u8, i32, u32) {
        match self {
            PayablePeriod::LegacyBalance => (0, 0, 0),
            PayablePeriod::PriorBalance { .. } => (1, 0, 0),
            PayablePeriod::Month(key) => (2, key.year, key.month),
        }
    }
}

impl fmt::Display for PayablePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayablePeriod::Month(key) => key.fmt(f),
            PayablePeriod::LegacyBalance | PayablePeriod::PriorBalance { .. } => {
                f.write_str("Prior balance")
            }
        }
    }
}

/// One line of the payable statement. Derived on every read from the input
/// collections; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PayableItem {
    pub id: String,
    pub subscription_id: SubscriptionId,
    pub partner_id: PartnerId,
    pub client: String,
    pub period: PayablePeriod,
    /// Human-readable description of the rule that produced the amount.
    pub rule: String,
    pub amount: f64,
    pub status: PayableStatus,
    pub is_selectable: bool,
    /// Whole months since subscription start, used for lock-up
    /// classification. 999 on the legacy line so it always sorts oldest.
    pub months_active: i64,
}
