use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // IO-related.
    #[error("error reading '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("error writing '{path}'")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // Parsing-related.
    #[error("invalid CSV format")]
    InvalidCsv(#[from] csv::Error),
    #[error("invalid CSV content: {details}")]
    InvalidCsvContent { details: String },
    #[error("invalid column map (invalid RON format)")]
    InvalidColumnMap(#[from] ron::error::SpannedError),
    #[error("invalid ISO date: {value}")]
    InvalidIsoDate { value: String },
    #[error("invalid month key: {value}")]
    InvalidMonthKey { value: String },
    #[error("invalid amount: '{value}'")]
    InvalidAmount { value: String },

    // Payout registration.
    #[error("selection is empty, nothing to register")]
    EmptySelection,
    #[error("selection spans partners '{first}' and '{second}', register one partner at a time")]
    MixedPartnerSelection { first: String, second: String },
    #[error("ledger line '{id}' does not exist in the current statement")]
    UnknownItem { id: String },
    #[error("ledger line '{id}' is not selectable")]
    ItemNotSelectable { id: String },
    #[error("partner '{id}' not found")]
    UnknownPartner { id: String },
    #[error("period {period} of subscription '{subscription}' is already liquidated")]
    DuplicatePeriod { subscription: String, period: String },
    #[error("payout record '{id}' not found")]
    UnknownPayout { id: String },

    // Payout history snapshots.
    #[error("invalid payout history snapshot")]
    InvalidSnapshot(#[from] serde_json::Error),
}
