use tracing::warn;
use uuid::Uuid;

use crate::{
    data::models::{
        amount_model::AmountModel, column_map::ColumnMap, iso_date_model::IsoDateModel,
        sheet_rows::SheetRows,
    },
    domain::entities::{
        liquidation::{Liquidation, LiquidationId, PaidPeriod},
        partner::PartnerId,
        subscription::SubscriptionId,
    },
    errors::Error,
};

const ID: &str = "liquidation_id";
const PARTNER: &str = "partner_id";
const SUBSCRIPTION: &str = "subscription_id";
const PERIOD: &str = "period";
const AMOUNT: &str = "amount";
const DATE: &str = "payment_date";

pub(crate) fn default_columns() -> ColumnMap {
    ColumnMap::new(&[
        ("ID_Liquidacion", ID),
        ("Id", ID),
        ("ID_Partner", PARTNER),
        ("Partner", PARTNER),
        ("ID_Suscripcion", SUBSCRIPTION),
        ("Subscription", SUBSCRIPTION),
        ("Mes_Pagado", PERIOD),
        ("Mes", PERIOD),
        ("Month", PERIOD),
        ("Period", PERIOD),
        ("Monto", AMOUNT),
        ("Importe", AMOUNT),
        ("Amount", AMOUNT),
        ("Fecha_Pago", DATE),
        ("Fecha", DATE),
        ("Payment Date", DATE),
    ])
}

pub(crate) trait LiquidationsCsvDatasource {
    fn from_string(&self, s: &str) -> Result<Vec<Liquidation>, Error>;
}

pub(crate) struct LiquidationsCsvDatasourceImpl {
    columns: ColumnMap,
}

impl LiquidationsCsvDatasourceImpl {
    pub(crate) fn new(columns: Option<ColumnMap>) -> Self {
        Self {
            columns: columns.unwrap_or_else(default_columns),
        }
    }
}

impl LiquidationsCsvDatasource for LiquidationsCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Vec<Liquidation>, Error> {
        let sheet = SheetRows::parse(s, &self.columns)?;
        let mut liquidations = Vec::new();
        for row in sheet.rows() {
            let Some(subscription) = row.get(SUBSCRIPTION) else {
                warn!("liquidation row without a subscription id skipped");
                continue;
            };
            let Ok(period) = row.text(PERIOD).parse::<PaidPeriod>() else {
                warn!(subscription, "liquidation row with an invalid period skipped");
                continue;
            };
            let Some(payment_date) = row.get(DATE).and_then(IsoDateModel::parse_opt) else {
                warn!(subscription, "liquidation row without a payment date skipped");
                continue;
            };
            let id = row
                .get(ID)
                .map(|id| id.to_string())
                .unwrap_or_else(|| format!("L-{}", Uuid::new_v4().simple()));
            liquidations.push(Liquidation {
                id: LiquidationId(id),
                partner_id: PartnerId(row.text(PARTNER).to_string()),
                subscription_id: SubscriptionId(subscription.to_string()),
                period,
                amount: AmountModel::parse_or_zero(row.text(AMOUNT)),
                payment_date,
            });
        }
        Ok(liquidations)
    }
}

/// Render liquidations back into the sheet's append format, for copying new
/// rows into the payment-history export.
pub fn liquidations_to_csv(liquidations: &[Liquidation]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "ID_Liquidacion",
        "ID_Partner",
        "ID_Suscripcion",
        "Mes_Pagado",
        "Monto",
        "Fecha_Pago",
    ])?;
    for liquidation in liquidations {
        writer.write_record([
            liquidation.id.to_string(),
            liquidation.partner_id.to_string(),
            liquidation.subscription_id.to_string(),
            liquidation.period.to_string(),
            format!("{:.2}", liquidation.amount),
            liquidation.payment_date.to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::InvalidCsvContent {
            details: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidCsvContent {
        details: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::entities::month_key::MonthKey;

    use super::*;

    #[test]
    fn parses_month_and_legacy_rows() {
        let csv = "\
ID_Liquidacion,ID_Partner,ID_Suscripcion,Mes_Pagado,Monto,Fecha_Pago
L01,P01,C01,2024-01,\"118,00\",2024-02-15
L02,P02,C03,SALDO-INICIAL,450,2024-03-01
L03,P02,C03,not-a-month,450,2024-03-01
";
        let liquidations = LiquidationsCsvDatasourceImpl::new(None)
            .from_string(csv)
            .unwrap();
        assert_eq!(liquidations.len(), 2);
        assert_eq!(
            liquidations[0].period,
            PaidPeriod::Month(MonthKey::new(2024, 1).unwrap())
        );
        assert_eq!(liquidations[1].period, PaidPeriod::LegacyBalance);
        assert!((liquidations[0].amount - 118.0).abs() < 1e-9);
    }

    #[test]
    fn exports_rows_in_sheet_format() {
        let liquidations = vec![Liquidation {
            id: LiquidationId("L01".into()),
            partner_id: PartnerId("P01".into()),
            subscription_id: SubscriptionId("C01".into()),
            period: PaidPeriod::Month(MonthKey::new(2024, 1).unwrap()),
            amount: 118.0,
            payment_date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
        }];
        let csv = liquidations_to_csv(&liquidations).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID_Liquidacion,ID_Partner,ID_Suscripcion,Mes_Pagado,Monto,Fecha_Pago"
        );
        assert_eq!(lines.next().unwrap(), "L01,P01,C01,2024-01,118.00,2024-02-15");
    }
}
