use crate::domain::entities::commercial_plan::{CommercialPlan, PartnerTier, PlanId, TierRule};

/// Why a substitute rule was billed instead of an exact tier match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The explicitly assigned plan id does not exist in the plan set.
    PlanNotFound,
    /// The resolved plan carries no rule for the partner's tier.
    TierNotInPlan,
}

/// Outcome of resolving a partner's tier against the available plans.
///
/// Billing never blocks on misconfiguration, but callers and tests can tell
/// a clean resolution from a degraded one instead of getting an
/// indistinguishable rule back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleResolution<'a> {
    Found(&'a TierRule),
    Fallback {
        rule: &'a TierRule,
        reason: FallbackReason,
    },
    /// No plans, or a plan without rules. Nothing can be billed.
    Unresolvable,
}

impl<'a> RuleResolution<'a> {
    pub fn rule(&self) -> Option<&'a TierRule> {
        match self {
            RuleResolution::Found(rule) => Some(rule),
            RuleResolution::Fallback { rule, .. } => Some(rule),
            RuleResolution::Unresolvable => None,
        }
    }
}

/// Select the tier rule for `tier` out of the plan named by `plan_id`. An
/// unknown plan id falls back to the first available plan, and a missing
/// tier falls back to the plan's first rule.
pub fn resolve_rule<'a>(
    tier: PartnerTier,
    plan_id: Option<&PlanId>,
    plans: &'a [CommercialPlan],
) -> RuleResolution<'a> {
    let explicit = plan_id.and_then(|id| plans.iter().find(|p| &p.id == id));
    let missing_explicit = plan_id.is_some() && explicit.is_none();
    let Some(plan) = explicit.or_else(|| plans.first()) else {
        return RuleResolution::Unresolvable;
    };

    match plan.rules.iter().find(|r| r.tier == tier) {
        Some(rule) if !missing_explicit => RuleResolution::Found(rule),
        Some(rule) => RuleResolution::Fallback {
            rule,
            reason: FallbackReason::PlanNotFound,
        },
        None => match plan.rules.first() {
            Some(rule) => RuleResolution::Fallback {
                rule,
                reason: if missing_explicit {
                    FallbackReason::PlanNotFound
                } else {
                    FallbackReason::TierNotInPlan
                },
            },
            None => RuleResolution::Unresolvable,
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn rule(tier: PartnerTier, year1: f64) -> TierRule {
        TierRule {
            tier,
            min_clients: 0,
            max_clients: None,
            bounty_months: 1,
            bounty_percentage: 1.0,
            year1_percentage: year1,
            year2_percentage: 0.15,
            vesting_months: 6,
        }
    }

    fn plan(id: &str, rules: Vec<TierRule>) -> CommercialPlan {
        CommercialPlan {
            id: PlanId(id.into()),
            name: id.into(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            is_active: true,
            is_default: false,
            rules,
        }
    }

    #[test]
    fn finds_exact_tier_in_assigned_plan() {
        let plans = vec![
            plan("A", vec![rule(PartnerTier::Silver, 0.10)]),
            plan("B", vec![rule(PartnerTier::Silver, 0.20)]),
        ];
        let id = PlanId("B".into());
        let resolution = resolve_rule(PartnerTier::Silver, Some(&id), &plans);
        let RuleResolution::Found(rule) = resolution else {
            panic!("expected clean resolution, got {resolution:?}");
        };
        assert_eq!(rule.year1_percentage, 0.20);
    }

    #[test]
    fn defaults_to_first_plan_without_an_assignment() {
        let plans = vec![plan("A", vec![rule(PartnerTier::Gold, 0.10)])];
        let resolution = resolve_rule(PartnerTier::Gold, None, &plans);
        assert!(matches!(resolution, RuleResolution::Found(_)));
    }

    #[test]
    fn unknown_plan_id_degrades_to_first_plan() {
        let plans = vec![plan("A", vec![rule(PartnerTier::Gold, 0.10)])];
        let id = PlanId("MISSING".into());
        let resolution = resolve_rule(PartnerTier::Gold, Some(&id), &plans);
        assert!(matches!(
            resolution,
            RuleResolution::Fallback {
                reason: FallbackReason::PlanNotFound,
                ..
            }
        ));
    }

    #[test]
    fn missing_tier_degrades_to_first_rule() {
        let plans = vec![plan("A", vec![rule(PartnerTier::Silver, 0.10)])];
        let resolution = resolve_rule(PartnerTier::Platinum, None, &plans);
        let RuleResolution::Fallback { rule, reason } = resolution else {
            panic!("expected fallback, got {resolution:?}");
        };
        assert_eq!(reason, FallbackReason::TierNotInPlan);
        assert_eq!(rule.tier, PartnerTier::Silver);
    }

    #[test]
    fn no_plans_is_unresolvable() {
        assert_eq!(
            resolve_rule(PartnerTier::Silver, None, &[]),
            RuleResolution::Unresolvable
        );
        let empty = vec![plan("A", vec![])];
        assert_eq!(
            resolve_rule(PartnerTier::Silver, None, &empty),
            RuleResolution::Unresolvable
        );
    }
}
