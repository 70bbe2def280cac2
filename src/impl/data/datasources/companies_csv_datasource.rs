use tracing::warn;

use crate::{
    data::models::{column_map::ColumnMap, iso_date_model::IsoDateModel, sheet_rows::SheetRows},
    domain::entities::{
        company::{Company, CompanyId},
        partner::PartnerId,
    },
    errors::Error,
};

const ID: &str = "company_id";
const NAME: &str = "name";
const DOMAIN: &str = "domain";
const PARTNER: &str = "partner_id";
const STATUS: &str = "status";
const CONVERTED: &str = "converted";

pub(crate) fn default_columns() -> ColumnMap {
    ColumnMap::new(&[
        ("id", ID),
        ("Company ID", ID),
        ("nombre_empresa", NAME),
        ("Empresa", NAME),
        ("Name", NAME),
        ("dominio", DOMAIN),
        ("Domain", DOMAIN),
        ("id_partner", PARTNER),
        ("Partner", PARTNER),
        ("estado_global", STATUS),
        ("Estado", STATUS),
        ("Status", STATUS),
        ("fecha_conversion", CONVERTED),
        ("Conversion", CONVERTED),
    ])
}

pub(crate) trait CompaniesCsvDatasource {
    fn from_string(&self, s: &str) -> Result<Vec<Company>, Error>;
}

pub(crate) struct CompaniesCsvDatasourceImpl {
    columns: ColumnMap,
}

impl CompaniesCsvDatasourceImpl {
    pub(crate) fn new(columns: Option<ColumnMap>) -> Self {
        Self {
            columns: columns.unwrap_or_else(default_columns),
        }
    }
}

impl CompaniesCsvDatasource for CompaniesCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Vec<Company>, Error> {
        let sheet = SheetRows::parse(s, &self.columns)?;
        let mut companies = Vec::new();
        for row in sheet.rows() {
            let Some(id) = row.get(ID) else {
                warn!("company row without an id skipped");
                continue;
            };
            companies.push(Company {
                id: CompanyId(id.to_string()),
                name: row.text(NAME).to_string(),
                domain: row.text(DOMAIN).to_string(),
                partner_id: PartnerId(row.text(PARTNER).to_string()),
                status: row.text(STATUS).to_string(),
                converted: row.get(CONVERTED).and_then(IsoDateModel::parse_opt),
            });
        }
        Ok(companies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_company_rows() {
        let csv = "\
id,nombre_empresa,dominio,id_partner,estado_global,fecha_conversion
C01,Hispanitas,hispanitas.com,P01,activo,2024-01-14
";
        let companies = CompaniesCsvDatasourceImpl::new(None)
            .from_string(csv)
            .unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].name, "Hispanitas");
        assert_eq!(companies[0].partner_id, PartnerId("P01".into()));
    }
}
