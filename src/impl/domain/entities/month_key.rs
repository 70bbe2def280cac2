use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::Error;

/// A calendar month, the billing granularity of the commission ledger.
/// Serialized as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("month is range-checked on construction")
    }

    pub fn next(&self) -> Self {
        self.plus_months(1)
    }

    pub fn plus_months(&self, delta: i32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }

    /// Whole-month distance since `earlier`. Negative if `earlier` is later.
    pub fn months_since(&self, earlier: MonthKey) -> i64 {
        (self.year as i64 - earlier.year as i64) * 12
            + (self.month as i64 - earlier.month as i64)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonthKey {
            value: s.to_string(),
        };
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.trim().parse().map_err(|_| invalid())?;
        let month: u32 = month.trim().parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        MonthKey::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_year_month() {
        let key: MonthKey = "2024-03".parse().unwrap();
        assert_eq!(key, MonthKey::new(2024, 3).unwrap());
        assert_eq!(key.to_string(), "2024-03");
    }

    #[test]
    fn rejects_out_of_range_months() {
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("2024-00".parse::<MonthKey>().is_err());
        assert!("garbage".parse::<MonthKey>().is_err());
    }

    #[test]
    fn orders_chronologically() {
        let a: MonthKey = "2023-12".parse().unwrap();
        let b: MonthKey = "2024-01".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn wraps_across_year_boundaries() {
        let dec = MonthKey::new(2023, 12).unwrap();
        assert_eq!(dec.next(), MonthKey::new(2024, 1).unwrap());
        assert_eq!(dec.plus_months(-12), MonthKey::new(2022, 12).unwrap());
        assert_eq!(
            MonthKey::new(2024, 2).unwrap().plus_months(-3),
            MonthKey::new(2023, 11).unwrap()
        );
    }

    #[test]
    fn months_since_counts_whole_months() {
        let start = MonthKey::new(2023, 11).unwrap();
        let end = MonthKey::new(2024, 2).unwrap();
        assert_eq!(end.months_since(start), 3);
        assert_eq!(start.months_since(end), -3);
    }
}
