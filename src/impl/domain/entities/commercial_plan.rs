use std::fmt;

use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PartnerTier {
    #[default]
    Silver,
    Gold,
    Platinum,
}

impl PartnerTier {
    pub fn label(&self) -> &'static str {
        match self {
            PartnerTier::Silver => "Silver",
            PartnerTier::Gold => "Gold",
            PartnerTier::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for PartnerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(pub String);

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Commission percentages for one partner tier within a plan.
///
/// The client-count range is authoring guidance for assigning tiers; it is
/// never consulted while generating the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct TierRule {
    pub tier: PartnerTier,
    pub min_clients: u32,
    pub max_clients: Option<u32>,
    pub bounty_months: u32,
    pub bounty_percentage: f64,
    pub year1_percentage: f64,
    pub year2_percentage: f64,
    pub vesting_months: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommercialPlan {
    pub id: PlanId,
    pub name: String,
    pub start_date: NaiveDate,
    pub is_active: bool,
    pub is_default: bool,
    pub rules: Vec<TierRule>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanIssue {
    EmptyRules,
    DuplicateTier(PartnerTier),
    InvertedClientRange(PartnerTier),
    PercentageOutOfRange {
        tier: PartnerTier,
        field: &'static str,
        value: f64,
    },
}

impl fmt::Display for PlanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanIssue::EmptyRules => write!(f, "plan has no tier rules"),
            PlanIssue::DuplicateTier(tier) => write!(f, "tier {tier} appears more than once"),
            PlanIssue::InvertedClientRange(tier) => {
                write!(f, "tier {tier} has min clients above max clients")
            }
            PlanIssue::PercentageOutOfRange { tier, field, value } => {
                write!(f, "tier {tier}: {field} of {value} is outside 0..=1")
            }
        }
    }
}

impl CommercialPlan {
    /// Authoring-time sanity checks. Ledger generation never blocks on these;
    /// they exist so plan editors can surface misconfiguration before it
    /// produces wrong-but-plausible numbers.
    pub fn validate(&self) -> Vec<PlanIssue> {
        let mut issues = Vec::new();
        if self.rules.is_empty() {
            issues.push(PlanIssue::EmptyRules);
            return issues;
        }
        let mut seen: Vec<PartnerTier> = Vec::new();
        for rule in &self.rules {
            if seen.contains(&rule.tier) {
                issues.push(PlanIssue::DuplicateTier(rule.tier));
            } else {
                seen.push(rule.tier);
            }
            if rule.max_clients.is_some_and(|max| rule.min_clients > max) {
                issues.push(PlanIssue::InvertedClientRange(rule.tier));
            }
            for (field, value) in [
                ("bounty percentage", rule.bounty_percentage),
                ("year-1 percentage", rule.year1_percentage),
                ("year-2 percentage", rule.year2_percentage),
            ] {
                if !(0.0..=1.0).contains(&value) {
                    issues.push(PlanIssue::PercentageOutOfRange {
                        tier: rule.tier,
                        field,
                        value,
                    });
                }
            }
        }
        issues
    }
}
