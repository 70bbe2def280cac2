use super::{
    commercial_plan::{CommercialPlan, PlanId},
    company::Company,
    goal_target::GoalTarget,
    liquidation::Liquidation,
    partner::{Partner, PartnerId},
    subscription::Subscription,
};

/// The in-memory input collections the commission engine works from. The
/// engine does not care whether they came from spreadsheet exports, a
/// database, or manual entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub partners: Vec<Partner>,
    pub companies: Vec<Company>,
    pub subscriptions: Vec<Subscription>,
    pub plans: Vec<CommercialPlan>,
    pub liquidations: Vec<Liquidation>,
    pub goals: Vec<GoalTarget>,
}

impl Dataset {
    pub fn partner(&self, id: &PartnerId) -> Option<&Partner> {
        self.partners.iter().find(|p| &p.id == id)
    }

    pub fn plan(&self, id: &PlanId) -> Option<&CommercialPlan> {
        self.plans.iter().find(|p| &p.id == id)
    }
}
