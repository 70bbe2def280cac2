use std::fmt;

use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};

use super::{liquidation::Liquidation, partner::PartnerId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayoutId(pub String);

impl fmt::Display for PayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutStatus {
    Pending,
    Paid,
}

/// Invoice-like wrapper around the liquidations minted in one registration
/// action. After creation the only allowed mutation is stamping or clearing
/// the payment date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutRecord {
    pub id: PayoutId,
    pub partner_id: PartnerId,
    pub partner_name: String,
    pub generated: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub total_amount: f64,
    pub status: PayoutStatus,
    pub items: Vec<Liquidation>,
}
