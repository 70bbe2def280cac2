// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod companies_csv_datasource;
        pub(crate) mod goals_csv_datasource;
        pub(crate) mod liquidations_csv_datasource;
        pub(crate) mod partners_csv_datasource;
        pub(crate) mod plans_csv_datasource;
        pub(crate) mod sheet_url;
        pub(crate) mod subscriptions_csv_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod amount_model;
        pub(crate) mod column_map;
        pub(crate) mod iso_date_model;
        pub(crate) mod percentage_model;
        pub(crate) mod sheet_rows;
    }
    pub(crate) mod repositories {
        pub(crate) mod dataset_repository_impl;
        pub(crate) mod payout_store;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod commercial_plan;
        pub(crate) mod company;
        pub(crate) mod dataset;
        pub(crate) mod goal_target;
        pub(crate) mod liquidation;
        pub(crate) mod month_key;
        pub(crate) mod partner;
        pub(crate) mod payable_item;
        pub(crate) mod payout_record;
        pub(crate) mod subscription;
    }
    pub(crate) mod logic {
        pub(crate) mod ledger_generator;
        pub(crate) mod monthly_amount;
        pub(crate) mod payout_builder;
        pub(crate) mod pending_aggregator;
        pub(crate) mod rule_resolver;
        mod utils;
    }
    pub(crate) mod repositories {
        pub(crate) mod dataset_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod sync_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod amount_fmt;
    pub(crate) mod statement_printer;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::commercial_plan::*;
        pub use crate::domain::entities::company::*;
        pub use crate::domain::entities::dataset::*;
        pub use crate::domain::entities::goal_target::*;
        pub use crate::domain::entities::liquidation::*;
        pub use crate::domain::entities::month_key::*;
        pub use crate::domain::entities::partner::*;
        pub use crate::domain::entities::payable_item::*;
        pub use crate::domain::entities::payout_record::*;
        pub use crate::domain::entities::subscription::*;
    }

    pub use crate::data::datasources::liquidations_csv_datasource::liquidations_to_csv;
    pub use crate::data::datasources::sheet_url::csv_export_url;
    pub use crate::data::models::column_map::{ColumnMap, ColumnOverrides};
    pub use crate::data::repositories::payout_store::PayoutStore;
    pub use crate::domain::logic::ledger_generator::{generate_statement, StatementInputs};
    pub use crate::domain::logic::monthly_amount::monthly_amount;
    pub use crate::domain::logic::payout_builder::PayoutBuilder;
    pub use crate::domain::logic::rule_resolver::{
        resolve_rule, FallbackReason, RuleResolution,
    };
    pub use crate::domain::repositories::dataset_repository::{
        DatasetRepository, SheetFiles, SheetText,
    };
    pub use crate::domain::usecases::sync_usecase::SyncUsecase;
    pub use crate::presentation::amount_fmt::format_amount;
    pub use crate::presentation::statement_printer::StatementPrinter;
}
