use chrono::{Datelike, NaiveDate};

use crate::domain::entities::{
    month_key::MonthKey,
    partner::Partner,
    subscription::{Subscription, SubscriptionStatus},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeFilter {
    CurrentMonth,
    LastMonth,
    CurrentQuarter,
    LastQuarter,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: &'static str,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl DateRangeFilter {
    /// Concrete calendar bounds for the filter, evaluated against `today`.
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        let this_month = MonthKey::from_date(today);
        let quarter_start = MonthKey::new(today.year(), (today.month0() / 3) * 3 + 1)
            .expect("quarter start month is always 1, 4, 7 or 10");
        match self {
            DateRangeFilter::CurrentMonth => span(this_month, this_month, "This month"),
            DateRangeFilter::LastMonth => {
                let last = this_month.plus_months(-1);
                span(last, last, "Last month")
            }
            DateRangeFilter::CurrentQuarter => {
                span(quarter_start, quarter_start.plus_months(2), "This quarter")
            }
            DateRangeFilter::LastQuarter => span(
                quarter_start.plus_months(-3),
                quarter_start.plus_months(-1),
                "Last quarter",
            ),
            DateRangeFilter::Year => span(
                MonthKey::new(today.year(), 1).expect("January is a valid month"),
                MonthKey::new(today.year(), 12).expect("December is a valid month"),
                "This year",
            ),
        }
    }
}

fn span(from: MonthKey, to: MonthKey, label: &'static str) -> DateRange {
    DateRange {
        start: from.first_day(),
        end: last_day(to),
        label,
    }
}

fn last_day(month: MonthKey) -> NaiveDate {
    month
        .next()
        .first_day()
        .pred_opt()
        .expect("the day before a first-of-month always exists")
}

/// Headline portfolio numbers: global MRR and client count, plus the
/// new-business movements inside the selected range.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    pub total_mrr: f64,
    pub total_clients: usize,
    pub new_subscriptions: usize,
    pub cancellations: usize,
    pub mrr_added: f64,
    pub new_partners: usize,
}

pub fn dashboard_metrics(
    subscriptions: &[Subscription],
    partners: &[Partner],
    range: &DateRange,
) -> DashboardMetrics {
    let total_mrr = subscriptions
        .iter()
        .filter(|s| s.status == SubscriptionStatus::Active)
        .map(|s| s.fee)
        .sum();
    let started_in_range: Vec<&Subscription> = subscriptions
        .iter()
        .filter(|s| range.contains(s.start_date))
        .collect();
    DashboardMetrics {
        total_mrr,
        total_clients: subscriptions.len(),
        new_subscriptions: started_in_range.len(),
        cancellations: subscriptions
            .iter()
            .filter(|s| {
                s.status == SubscriptionStatus::Cancelled
                    && s.end_date.is_some_and(|end| range.contains(end))
            })
            .count(),
        mrr_added: started_in_range.iter().map(|s| s.fee).sum(),
        new_partners: partners
            .iter()
            .filter(|p| p.enrolled.is_some_and(|enrolled| range.contains(enrolled)))
            .count(),
    }
}
