use chrono::NaiveDate;

use crate::{
    data::models::{
        column_map::ColumnMap, iso_date_model::IsoDateModel, percentage_model::PercentageModel,
        sheet_rows::SheetRows,
    },
    domain::entities::commercial_plan::{CommercialPlan, PartnerTier, PlanId, TierRule},
    errors::Error,
};

const PLAN_ID: &str = "plan_id";
const PLAN_NAME: &str = "plan_name";
const START: &str = "start_date";
const ACTIVE: &str = "is_active";
const DEFAULT: &str = "is_default";
const TIER: &str = "tier";
const MIN: &str = "min_clients";
const MAX: &str = "max_clients";
const BOUNTY_MONTHS: &str = "bounty_months";
const BOUNTY_PCT: &str = "bounty_percentage";
const YEAR1_PCT: &str = "year1_percentage";
const YEAR2_PCT: &str = "year2_percentage";
const VESTING: &str = "vesting_months";

pub(crate) fn default_columns() -> ColumnMap {
    ColumnMap::new(&[
        ("PlanId", PLAN_ID),
        ("Id", PLAN_ID),
        ("id_incentivo", PLAN_ID),
        ("PlanName", PLAN_NAME),
        ("nombre_programa", PLAN_NAME),
        ("Nombre", PLAN_NAME),
        ("StartDate", START),
        ("Inicio", START),
        ("anio_vigencia", START),
        ("Vigencia", START),
        ("IsActive", ACTIVE),
        ("Activo", ACTIVE),
        ("IsDefault", DEFAULT),
        ("Defecto", DEFAULT),
        ("Tier", TIER),
        ("Nivel", TIER),
        ("MinCount", MIN),
        ("Min", MIN),
        ("MaxCount", MAX),
        ("Max", MAX),
        ("BountyMonths", BOUNTY_MONTHS),
        ("Meses_Bounty", BOUNTY_MONTHS),
        ("BountyPercentage", BOUNTY_PCT),
        ("Porcentaje_Bounty", BOUNTY_PCT),
        ("% Bounty", BOUNTY_PCT),
        ("Year1Percentage", YEAR1_PCT),
        ("% Year 1", YEAR1_PCT),
        ("% Año 1", YEAR1_PCT),
        ("Year2Percentage", YEAR2_PCT),
        ("% Year 2", YEAR2_PCT),
        ("% Año 2", YEAR2_PCT),
        ("VestingMonths", VESTING),
        ("Permanencia", VESTING),
        ("Vesting", VESTING),
        ("Lockup", VESTING),
    ])
}

pub(crate) trait PlansCsvDatasource {
    fn from_string(&self, s: &str) -> Result<Vec<CommercialPlan>, Error>;
}

pub(crate) struct PlansCsvDatasourceImpl {
    columns: ColumnMap,
}

impl PlansCsvDatasourceImpl {
    pub(crate) fn new(columns: Option<ColumnMap>) -> Self {
        Self {
            columns: columns.unwrap_or_else(default_columns),
        }
    }
}

impl PlansCsvDatasource for PlansCsvDatasourceImpl {
    /// The sheet carries one row per tier rule; rows sharing a plan id are
    /// grouped into one plan, the first row winning the plan metadata.
    fn from_string(&self, s: &str) -> Result<Vec<CommercialPlan>, Error> {
        let sheet = SheetRows::parse(s, &self.columns)?;
        let mut plans: Vec<CommercialPlan> = Vec::new();
        for row in sheet.rows() {
            // Blank filler rows carry neither a tier nor a plan name.
            if row.get(TIER).is_none() && row.get(PLAN_NAME).is_none() {
                continue;
            }
            let id = PlanId(row.get(PLAN_ID).unwrap_or("DEFAULT").to_string());
            let rule = TierRule {
                tier: parse_tier(row.text(TIER)),
                min_clients: parse_count(row.text(MIN)).unwrap_or(0),
                max_clients: parse_count(row.text(MAX)),
                bounty_months: parse_count(row.text(BOUNTY_MONTHS)).unwrap_or(0),
                bounty_percentage: PercentageModel::parse_or_zero(row.text(BOUNTY_PCT)),
                year1_percentage: PercentageModel::parse_or_zero(row.text(YEAR1_PCT)),
                year2_percentage: PercentageModel::parse_or_zero(row.text(YEAR2_PCT)),
                vesting_months: parse_count(row.text(VESTING)).unwrap_or(6),
            };
            match plans.iter_mut().find(|p| p.id == id) {
                Some(plan) => plan.rules.push(rule),
                None => plans.push(CommercialPlan {
                    id,
                    name: row.get(PLAN_NAME).unwrap_or("Commercial plan").to_string(),
                    start_date: parse_start(row.text(START)),
                    is_active: parse_flag(row.text(ACTIVE)),
                    is_default: parse_flag(row.text(DEFAULT)),
                    rules: vec![rule],
                }),
            }
        }
        Ok(plans)
    }
}

fn parse_tier(raw: &str) -> PartnerTier {
    match raw.trim().to_ascii_lowercase().as_str() {
        "platinum" => PartnerTier::Platinum,
        "gold" => PartnerTier::Gold,
        _ => PartnerTier::Silver,
    }
}

/// "Infinity" and blanks read as unbounded.
fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1" | "si" | "yes")
}

/// A full ISO date, or a bare vintage year meaning January 1st of that year.
fn parse_start(raw: &str) -> NaiveDate {
    if let Some(date) = IsoDateModel::parse_opt(raw) {
        return date;
    }
    let year = raw.trim().parse::<i32>().unwrap_or(2024);
    NaiveDate::from_ymd_opt(year, 1, 1)
        .expect("January 1st exists for every year")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_rule_rows_into_plans() {
        let csv = "\
PlanId,PlanName,StartDate,IsActive,IsDefault,Tier,MinCount,MaxCount,BountyMonths,BountyPercentage,Year1Percentage,Year2Percentage,VestingMonths
PLAN-2025,Legacy 2025,2025-01-01,true,true,Silver,0,9,1,1,\"0,2\",15%,6
PLAN-2025,Legacy 2025,2025-01-01,true,true,Gold,10,20,2,100%,20,0.15,6
PLAN-2025,Legacy 2025,2025-01-01,true,true,Platinum,21,Infinity,3,1,20%,\"0,15\",6
,,,,,,,,,,,,
";
        let plans = PlansCsvDatasourceImpl::new(None).from_string(csv).unwrap();
        assert_eq!(plans.len(), 1);
        let plan = &plans[0];
        assert_eq!(plan.id, PlanId("PLAN-2025".into()));
        assert!(plan.is_active && plan.is_default);
        assert_eq!(plan.rules.len(), 3);
        assert!(plan.validate().is_empty());

        let gold = &plan.rules[1];
        assert_eq!(gold.tier, PartnerTier::Gold);
        assert_eq!(gold.bounty_months, 2);
        assert!((gold.bounty_percentage - 1.0).abs() < 1e-9);
        assert!((gold.year1_percentage - 0.20).abs() < 1e-9);
        assert!((gold.year2_percentage - 0.15).abs() < 1e-9);

        let platinum = &plan.rules[2];
        assert_eq!(platinum.max_clients, None);
    }

    #[test]
    fn bare_year_reads_as_january_first() {
        let csv = "PlanId,Nombre,Vigencia,Nivel\nP1,Programa,2025,Silver\n";
        let plans = PlansCsvDatasourceImpl::new(None).from_string(csv).unwrap();
        assert_eq!(
            plans[0].start_date,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
    }

    #[test]
    fn missing_vesting_defaults_to_six_months() {
        let csv = "PlanId,Nombre,Nivel\nP1,Programa,Silver\n";
        let plans = PlansCsvDatasourceImpl::new(None).from_string(csv).unwrap();
        assert_eq!(plans[0].rules[0].vesting_months, 6);
    }
}
