use std::fmt;

use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};

use super::commercial_plan::{PartnerTier, PlanId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartnerId(pub String);

impl fmt::Display for PartnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerStatus {
    Partner,
    Potential,
}

/// A referral agency originating client subscriptions.
#[derive(Debug, Clone, PartialEq)]
pub struct Partner {
    pub id: PartnerId,
    pub name: String,
    pub contact: String,
    pub email: String,
    pub status: PartnerStatus,
    /// Looked up live at ledger time: a tier change affects all months not
    /// yet liquidated, including historical ones.
    pub tier: PartnerTier,
    pub enrolled: Option<NaiveDate>,
    /// Advisory halt flag from the partner sheet. The ledger generator does
    /// not consult it; callers decide whether to act on it.
    pub commissionable: bool,
    pub plan_id: Option<PlanId>,
}
