use std::str::FromStr;

use chrono::NaiveDate;

use crate::errors::Error;

/// Strict `YYYY-MM-DD` date cell.
#[derive(Debug)]
pub(crate) struct IsoDateModel(pub NaiveDate);

impl FromStr for IsoDateModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(IsoDateModel)
            .map_err(|_| Error::InvalidIsoDate {
                value: s.to_string(),
            })
    }
}

impl IsoDateModel {
    /// Lenient form for optional cells: unparseable input reads as absent.
    pub(crate) fn parse_opt(s: &str) -> Option<NaiveDate> {
        s.parse::<IsoDateModel>().ok().map(|model| model.0)
    }
}
