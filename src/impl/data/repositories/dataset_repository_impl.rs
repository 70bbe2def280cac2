use std::path::Path;

use async_trait::async_trait;

use crate::{
    data::{
        datasources::{
            companies_csv_datasource::{CompaniesCsvDatasource, CompaniesCsvDatasourceImpl},
            goals_csv_datasource::{GoalsCsvDatasource, GoalsCsvDatasourceImpl},
            liquidations_csv_datasource::{
                LiquidationsCsvDatasource, LiquidationsCsvDatasourceImpl,
            },
            partners_csv_datasource::{PartnersCsvDatasource, PartnersCsvDatasourceImpl},
            plans_csv_datasource::{PlansCsvDatasource, PlansCsvDatasourceImpl},
            subscriptions_csv_datasource::{
                SubscriptionsCsvDatasource, SubscriptionsCsvDatasourceImpl,
            },
        },
        models::column_map::ColumnOverrides,
    },
    domain::{
        entities::dataset::Dataset,
        repositories::dataset_repository::{DatasetRepository, SheetFiles, SheetText},
    },
    errors::Error,
};

pub(crate) struct DatasetRepositoryImpl<
    P = PartnersCsvDatasourceImpl,
    C = CompaniesCsvDatasourceImpl,
    S = SubscriptionsCsvDatasourceImpl,
    L = LiquidationsCsvDatasourceImpl,
    N = PlansCsvDatasourceImpl,
    G = GoalsCsvDatasourceImpl,
> where
    P: PartnersCsvDatasource,
    C: CompaniesCsvDatasource,
    S: SubscriptionsCsvDatasource,
    L: LiquidationsCsvDatasource,
    N: PlansCsvDatasource,
    G: GoalsCsvDatasource,
{
    partners_datasource: P,
    companies_datasource: C,
    subscriptions_datasource: S,
    liquidations_datasource: L,
    plans_datasource: N,
    goals_datasource: G,
}

#[async_trait]
impl<P, C, S, L, N, G> DatasetRepository for DatasetRepositoryImpl<P, C, S, L, N, G>
where
    P: PartnersCsvDatasource + Send + Sync,
    C: CompaniesCsvDatasource + Send + Sync,
    S: SubscriptionsCsvDatasource + Send + Sync,
    L: LiquidationsCsvDatasource + Send + Sync,
    N: PlansCsvDatasource + Send + Sync,
    G: GoalsCsvDatasource + Send + Sync,
{
    fn from_strings(&self, sheets: &SheetText<'_>) -> Result<Dataset, Error> {
        Ok(Dataset {
            partners: self.partners_datasource.from_string(sheets.partners)?,
            companies: self.companies_datasource.from_string(sheets.companies)?,
            subscriptions: self
                .subscriptions_datasource
                .from_string(sheets.subscriptions)?,
            plans: self.plans_datasource.from_string(sheets.plans)?,
            liquidations: self
                .liquidations_datasource
                .from_string(sheets.liquidations)?,
            goals: self.goals_datasource.from_string(sheets.goals)?,
        })
    }

    async fn from_files(&self, sheets: &SheetFiles<'_>) -> Result<Dataset, Error> {
        let (partners, companies, subscriptions, liquidations, plans, goals) = futures::try_join!(
            read_sheet(sheets.partners),
            read_sheet(sheets.companies),
            read_sheet(sheets.subscriptions),
            read_sheet(sheets.liquidations),
            read_sheet(sheets.plans),
            read_sheet(sheets.goals),
        )?;
        self.from_strings(&SheetText {
            partners: &partners,
            companies: &companies,
            subscriptions: &subscriptions,
            liquidations: &liquidations,
            plans: &plans,
            goals: &goals,
        })
    }
}

impl DatasetRepositoryImpl {
    pub(crate) fn new() -> Self {
        Self::with_overrides(ColumnOverrides::default())
    }

    pub(crate) fn with_overrides(overrides: ColumnOverrides) -> Self {
        DatasetRepositoryImpl {
            partners_datasource: PartnersCsvDatasourceImpl::new(overrides.partners),
            companies_datasource: CompaniesCsvDatasourceImpl::new(overrides.companies),
            subscriptions_datasource: SubscriptionsCsvDatasourceImpl::new(overrides.subscriptions),
            liquidations_datasource: LiquidationsCsvDatasourceImpl::new(overrides.liquidations),
            plans_datasource: PlansCsvDatasourceImpl::new(overrides.plans),
            goals_datasource: GoalsCsvDatasourceImpl::new(overrides.goals),
        }
    }
}

async fn read_sheet(path: &Path) -> Result<String, Error> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Read {
            path: path.display().to_string(),
            source,
        })
}
