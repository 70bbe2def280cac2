use std::{collections::HashSet, fmt};

use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};

use super::{
    commercial_plan::PlanId,
    company::{Company, CompanyId},
    month_key::MonthKey,
    partner::PartnerId,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub String);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
}

/// The client a subscription belongs to, either embedded by name (spreadsheet
/// imports) or by company id (linked datasets).
#[derive(Debug, Clone, PartialEq)]
pub enum ClientRef {
    Named(String),
    Company(CompanyId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub partner_id: PartnerId,
    pub client: ClientRef,
    /// Monthly recurring fee, non-negative.
    pub fee: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: SubscriptionStatus,
    /// Commission debt accumulated before this system existed, billed as a
    /// single lump line until liquidated.
    pub opening_balance: Option<f64>,
    /// Moves the month the commission clock starts emitting lines from,
    /// without moving the rate thresholds anchored at `start_date`. Used for
    /// migrated subscriptions.
    pub commission_start: Option<NaiveDate>,
    /// Months where accrual is skipped; the month-index counter still
    /// advances through them.
    pub paused_months: HashSet<MonthKey>,
    pub plan_id: Option<PlanId>,
}

impl Subscription {
    pub fn commission_clock_start(&self) -> NaiveDate {
        self.commission_start.unwrap_or(self.start_date)
    }

    pub fn client_name<'a>(&'a self, companies: &'a [Company]) -> &'a str {
        match &self.client {
            ClientRef::Named(name) => name,
            ClientRef::Company(id) => companies
                .iter()
                .find(|c| &c.id == id)
                .map(|c| c.name.as_str())
                .unwrap_or("Unknown client"),
        }
    }
}
