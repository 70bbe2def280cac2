use crate::domain::entities::goal_target::GoalTarget;

use super::dashboard_metrics::DashboardMetrics;

/// One target dimension: what was reached against what was aimed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attainment {
    pub actual: f64,
    pub target: f64,
}

impl Attainment {
    /// Progress percentage, capped at 100. A zero target counts as met.
    pub fn percent(&self) -> f64 {
        if self.target <= 0.0 {
            100.0
        } else {
            (self.actual / self.target * 100.0).min(100.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub goal_id: String,
    pub label: String,
    pub new_clients: Attainment,
    pub new_partners: Attainment,
    pub mrr: Attainment,
}

/// Measure range metrics against a goal. The caller picks metrics whose
/// range matches the goal's period.
pub fn goal_progress(goal: &GoalTarget, metrics: &DashboardMetrics) -> GoalProgress {
    GoalProgress {
        goal_id: goal.id.clone(),
        label: goal.label.clone(),
        new_clients: Attainment {
            actual: metrics.new_subscriptions as f64,
            target: goal.new_clients_target as f64,
        },
        new_partners: Attainment {
            actual: metrics.new_partners as f64,
            target: goal.new_partners_target as f64,
        },
        mrr: Attainment {
            actual: metrics.mrr_added,
            target: goal.mrr_target,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> DashboardMetrics {
        DashboardMetrics {
            total_mrr: 950.0,
            total_clients: 12,
            new_subscriptions: 5,
            cancellations: 1,
            mrr_added: 2500.0,
            new_partners: 4,
        }
    }

    #[test]
    fn measures_each_dimension() {
        let goal = GoalTarget {
            id: "Q1".into(),
            label: "Q1 2025".into(),
            new_clients_target: 10,
            new_partners_target: 3,
            mrr_target: 5000.0,
            period: None,
        };
        let progress = goal_progress(&goal, &metrics());
        assert!((progress.new_clients.percent() - 50.0).abs() < 1e-9);
        // Overachieved dimensions cap at 100.
        assert!((progress.new_partners.percent() - 100.0).abs() < 1e-9);
        assert!((progress.mrr.percent() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_targets_count_as_met() {
        let attainment = Attainment {
            actual: 0.0,
            target: 0.0,
        };
        assert!((attainment.percent() - 100.0).abs() < 1e-9);
    }
}
