use chrono::NaiveDate;

use crate::domain::entities::month_key::MonthKey;

/// Whole calendar months between the two dates, floor semantics: only the
/// (year, month) components count, the day of month is ignored.
pub(crate) fn months_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    MonthKey::from_date(later).months_since(MonthKey::from_date(earlier))
}
