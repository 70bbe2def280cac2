use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_derive::{Deserialize as DeriveDeserialize, Serialize as DeriveSerialize};

use super::{month_key::MonthKey, partner::PartnerId, subscription::SubscriptionId};
use crate::errors::Error;

/// Wire sentinel marking the opening-balance pseudo-month as paid.
const LEGACY_SENTINEL: &str = "LEGACY";

#[derive(Debug, Clone, PartialEq, Eq, Hash, DeriveSerialize, DeriveDeserialize)]
pub struct LiquidationId(pub String);

impl fmt::Display for LiquidationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a liquidation settles: a concrete billing month, or the subscription's
/// legacy opening balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaidPeriod {
    Month(MonthKey),
    LegacyBalance,
}

impl fmt::Display for PaidPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaidPeriod::Month(key) => key.fmt(f),
            PaidPeriod::LegacyBalance => f.write_str(LEGACY_SENTINEL),
        }
    }
}

impl FromStr for PaidPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Historical exports used Spanish sentinel spellings.
        match s.trim() {
            LEGACY_SENTINEL | "SALDO-ANTERIOR" | "SALDO-INICIAL" => Ok(PaidPeriod::LegacyBalance),
            other => Ok(PaidPeriod::Month(other.parse()?)),
        }
    }
}

impl Serialize for PaidPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PaidPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PaidPeriod::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Immutable record that one period of one subscription has been paid out.
/// The ledger generator consults these to suppress re-billing; they are never
/// mutated once written.
#[derive(Debug, Clone, PartialEq, DeriveSerialize, DeriveDeserialize)]
pub struct Liquidation {
    pub id: LiquidationId,
    pub partner_id: PartnerId,
    pub subscription_id: SubscriptionId,
    pub period: PaidPeriod,
    pub amount: f64,
    pub payment_date: NaiveDate,
}
