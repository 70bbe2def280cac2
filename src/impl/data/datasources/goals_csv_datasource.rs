use crate::{
    data::models::{
        amount_model::AmountModel, column_map::ColumnMap, iso_date_model::IsoDateModel,
        sheet_rows::SheetRows,
    },
    domain::entities::goal_target::GoalTarget,
    errors::Error,
};

const ID: &str = "goal_id";
const LABEL: &str = "label";
const CLIENTS: &str = "new_clients_target";
const PARTNERS: &str = "new_partners_target";
const MRR: &str = "mrr_target";
const START: &str = "start_date";
const END: &str = "end_date";

pub(crate) fn default_columns() -> ColumnMap {
    ColumnMap::new(&[
        ("id", ID),
        ("periodo", ID),
        ("label", LABEL),
        ("Etiqueta", LABEL),
        ("meta_altas", CLIENTS),
        ("Altas", CLIENTS),
        ("New Clients", CLIENTS),
        ("meta_partners", PARTNERS),
        ("Partners", PARTNERS),
        ("meta_mrr", MRR),
        ("MRR", MRR),
        ("fecha_inicio", START),
        ("Start", START),
        ("fecha_fin", END),
        ("End", END),
    ])
}

pub(crate) trait GoalsCsvDatasource {
    fn from_string(&self, s: &str) -> Result<Vec<GoalTarget>, Error>;
}

pub(crate) struct GoalsCsvDatasourceImpl {
    columns: ColumnMap,
}

impl GoalsCsvDatasourceImpl {
    pub(crate) fn new(columns: Option<ColumnMap>) -> Self {
        Self {
            columns: columns.unwrap_or_else(default_columns),
        }
    }
}

impl GoalsCsvDatasource for GoalsCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Vec<GoalTarget>, Error> {
        let sheet = SheetRows::parse(s, &self.columns)?;
        let mut goals = Vec::new();
        for row in sheet.rows() {
            let Some(id) = row.get(ID) else {
                continue;
            };
            let period = match (
                row.get(START).and_then(IsoDateModel::parse_opt),
                row.get(END).and_then(IsoDateModel::parse_opt),
            ) {
                (Some(start), Some(end)) => Some((start, end)),
                _ => None,
            };
            goals.push(GoalTarget {
                id: id.to_string(),
                label: row.get(LABEL).unwrap_or(id).to_string(),
                new_clients_target: row.text(CLIENTS).trim().parse().unwrap_or(0),
                new_partners_target: row.text(PARTNERS).trim().parse().unwrap_or(0),
                mrr_target: AmountModel::parse_or_zero(row.text(MRR)),
                period,
            });
        }
        Ok(goals)
    }
}
