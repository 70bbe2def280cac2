use tracing::warn;

use crate::{
    data::models::{column_map::ColumnMap, iso_date_model::IsoDateModel, sheet_rows::SheetRows},
    domain::entities::{
        commercial_plan::{PartnerTier, PlanId},
        partner::{Partner, PartnerId, PartnerStatus},
    },
    errors::Error,
};

// Canonical field names.
const ID: &str = "partner_id";
const NAME: &str = "name";
const CONTACT: &str = "contact";
const EMAIL: &str = "email";
const STATUS: &str = "status";
const TIER: &str = "tier";
const ENROLLED: &str = "enrolled";
const COMMISSIONABLE: &str = "commissionable";
const PLAN: &str = "plan_id";

/// Built-in header aliases covering the Spanish and English sheet exports.
pub(crate) fn default_columns() -> ColumnMap {
    ColumnMap::new(&[
        ("ID_Partner", ID),
        ("Partner ID", ID),
        ("Id", ID),
        ("Nombre", NAME),
        ("Name", NAME),
        ("Empresa", NAME),
        ("Contacto", CONTACT),
        ("Contact", CONTACT),
        ("Persona", CONTACT),
        ("Email", EMAIL),
        ("Correo", EMAIL),
        ("Estado", STATUS),
        ("Status", STATUS),
        ("Nivel", TIER),
        ("Tier", TIER),
        ("Fecha_Alta", ENROLLED),
        ("Alta", ENROLLED),
        ("Enrolled", ENROLLED),
        ("Liquida_com_partner", COMMISSIONABLE),
        ("Liquidar", COMMISSIONABLE),
        ("Comisionable", COMMISSIONABLE),
        ("Commissionable", COMMISSIONABLE),
        ("PlanId", PLAN),
        ("Plan", PLAN),
    ])
}

pub(crate) trait PartnersCsvDatasource {
    fn from_string(&self, s: &str) -> Result<Vec<Partner>, Error>;
}

pub(crate) struct PartnersCsvDatasourceImpl {
    columns: ColumnMap,
}

impl PartnersCsvDatasourceImpl {
    pub(crate) fn new(columns: Option<ColumnMap>) -> Self {
        Self {
            columns: columns.unwrap_or_else(default_columns),
        }
    }
}

impl PartnersCsvDatasource for PartnersCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Vec<Partner>, Error> {
        let sheet = SheetRows::parse(s, &self.columns)?;
        let mut partners = Vec::new();
        for row in sheet.rows() {
            let Some(id) = row.get(ID) else {
                warn!("partner row without an id skipped");
                continue;
            };
            partners.push(Partner {
                id: PartnerId(id.to_string()),
                name: row.text(NAME).to_string(),
                contact: row.text(CONTACT).to_string(),
                email: row.text(EMAIL).to_string(),
                status: parse_status(row.text(STATUS)),
                tier: parse_tier(row.text(TIER)),
                enrolled: row.get(ENROLLED).and_then(IsoDateModel::parse_opt),
                commissionable: parse_flag(row.text(COMMISSIONABLE)),
                plan_id: row.get(PLAN).map(|p| PlanId(p.to_string())),
            });
        }
        Ok(partners)
    }
}

fn parse_tier(raw: &str) -> PartnerTier {
    match raw.trim().to_ascii_lowercase().as_str() {
        "platinum" => PartnerTier::Platinum,
        "gold" => PartnerTier::Gold,
        _ => PartnerTier::Silver,
    }
}

fn parse_status(raw: &str) -> PartnerStatus {
    let normalized = raw.trim().to_ascii_lowercase();
    if normalized.contains("potential") || normalized.contains("potencial") {
        PartnerStatus::Potential
    } else {
        PartnerStatus::Partner
    }
}

/// Blank cells count as commissionable; only an explicit "no" turns it off.
fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "no" | "false" | "0"
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn parses_spanish_sheet_export() {
        let csv = "\
ID_Partner,Nombre,Contacto,Email,Estado,Nivel,Fecha_Alta,Liquida_com_partner,PlanId
P01,3Dids,Andres,finanzas@3dids.com,Partner,Platinum,2023-01-15,Si,PLAN-2025
P03,Alcalink,Luis,hola@alcalink.com,Potential Partner,Silver,2022-11-05,No,
,SinId,,,,,,,
";
        let partners = PartnersCsvDatasourceImpl::new(None)
            .from_string(csv)
            .unwrap();
        assert_eq!(partners.len(), 2);
        assert_eq!(partners[0].id, PartnerId("P01".into()));
        assert_eq!(partners[0].tier, PartnerTier::Platinum);
        assert_eq!(partners[0].status, PartnerStatus::Partner);
        assert!(partners[0].commissionable);
        assert_eq!(
            partners[0].enrolled,
            NaiveDate::from_ymd_opt(2023, 1, 15)
        );
        assert_eq!(partners[0].plan_id, Some(PlanId("PLAN-2025".into())));
        assert_eq!(partners[1].status, PartnerStatus::Potential);
        assert!(!partners[1].commissionable);
        assert_eq!(partners[1].plan_id, None);
    }

    #[test]
    fn unknown_tier_defaults_to_silver() {
        let csv = "Id,Name,Tier\nP09,Acme,Diamond\n";
        let partners = PartnersCsvDatasourceImpl::new(None)
            .from_string(csv)
            .unwrap();
        assert_eq!(partners[0].tier, PartnerTier::Silver);
    }
}
