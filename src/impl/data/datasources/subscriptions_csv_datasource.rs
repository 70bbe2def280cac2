use std::collections::HashSet;

use tracing::warn;

use crate::{
    data::models::{
        amount_model::AmountModel, column_map::ColumnMap, iso_date_model::IsoDateModel,
        sheet_rows::SheetRows,
    },
    domain::entities::{
        commercial_plan::PlanId,
        company::CompanyId,
        month_key::MonthKey,
        partner::PartnerId,
        subscription::{ClientRef, Subscription, SubscriptionId, SubscriptionStatus},
    },
    errors::Error,
};

const ID: &str = "subscription_id";
const PARTNER: &str = "partner_id";
const CLIENT: &str = "client";
const COMPANY: &str = "company_id";
const FEE: &str = "fee";
const START: &str = "start_date";
const END: &str = "end_date";
const STATUS: &str = "status";
const OPENING: &str = "opening_balance";
const PAUSED: &str = "paused_months";
const CLOCK: &str = "commission_start";
const PLAN: &str = "plan_id";

pub(crate) fn default_columns() -> ColumnMap {
    ColumnMap::new(&[
        ("ID_Suscripcion", ID),
        ("Subscription ID", ID),
        ("Id", ID),
        ("ID_Partner", PARTNER),
        ("Partner", PARTNER),
        ("Cliente", CLIENT),
        ("Client", CLIENT),
        ("id_cliente", COMPANY),
        ("Company", COMPANY),
        ("Cuota", FEE),
        ("MRR", FEE),
        ("Fee", FEE),
        ("Fecha_Inicio", START),
        ("Inicio", START),
        ("Start", START),
        ("Fecha_Fin", END),
        ("Fin", END),
        ("End", END),
        ("Estado", STATUS),
        ("Status", STATUS),
        ("Saldo_Inicial", OPENING),
        ("Saldo", OPENING),
        ("Opening Balance", OPENING),
        ("Meses_Pausados", PAUSED),
        ("Paused", PAUSED),
        ("Fecha_Calculo_Comision", CLOCK),
        ("Calculo", CLOCK),
        ("Commission Start", CLOCK),
        ("id_incentivo", PLAN),
        ("Plan", PLAN),
    ])
}

pub(crate) trait SubscriptionsCsvDatasource {
    fn from_string(&self, s: &str) -> Result<Vec<Subscription>, Error>;
}

pub(crate) struct SubscriptionsCsvDatasourceImpl {
    columns: ColumnMap,
}

impl SubscriptionsCsvDatasourceImpl {
    pub(crate) fn new(columns: Option<ColumnMap>) -> Self {
        Self {
            columns: columns.unwrap_or_else(default_columns),
        }
    }
}

impl SubscriptionsCsvDatasource for SubscriptionsCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Vec<Subscription>, Error> {
        let sheet = SheetRows::parse(s, &self.columns)?;
        let mut subscriptions = Vec::new();
        for row in sheet.rows() {
            let Some(id) = row.get(ID) else {
                warn!("subscription row without an id skipped");
                continue;
            };
            let Some(start_date) = row.get(START).and_then(IsoDateModel::parse_opt) else {
                warn!(subscription = id, "subscription without a start date skipped");
                continue;
            };
            let client = match row.get(COMPANY) {
                Some(company) => ClientRef::Company(CompanyId(company.to_string())),
                None => ClientRef::Named(
                    row.get(CLIENT).unwrap_or("Unknown client").to_string(),
                ),
            };
            subscriptions.push(Subscription {
                id: SubscriptionId(id.to_string()),
                partner_id: PartnerId(row.text(PARTNER).to_string()),
                client,
                fee: AmountModel::parse_or_zero(row.text(FEE)),
                start_date,
                end_date: row.get(END).and_then(IsoDateModel::parse_opt),
                status: parse_status(row.text(STATUS)),
                opening_balance: row.get(OPENING).map(AmountModel::parse_or_zero),
                commission_start: row.get(CLOCK).and_then(IsoDateModel::parse_opt),
                paused_months: parse_paused(row.text(PAUSED)),
                plan_id: row.get(PLAN).map(|p| PlanId(p.to_string())),
            });
        }
        Ok(subscriptions)
    }
}

fn parse_status(raw: &str) -> SubscriptionStatus {
    match raw.trim().to_ascii_lowercase().as_str() {
        "cancelada" | "cancelado" | "cancelled" | "canceled" => SubscriptionStatus::Cancelled,
        _ => SubscriptionStatus::Active,
    }
}

/// Comma-separated `YYYY-MM` list; unparseable entries are dropped.
fn parse_paused(raw: &str) -> HashSet<MonthKey> {
    raw.split(',')
        .filter_map(|entry| entry.trim().parse::<MonthKey>().ok())
        .collect()
}
