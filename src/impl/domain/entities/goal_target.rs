use chrono::NaiveDate;

/// A sales target for one tracking period (quarter, year, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct GoalTarget {
    pub id: String,
    pub label: String,
    pub new_clients_target: u32,
    pub new_partners_target: u32,
    pub mrr_target: f64,
    /// Explicit period bounds; when absent the caller picks the range.
    pub period: Option<(NaiveDate, NaiveDate)>,
}
