use async_trait::async_trait;
use tracing::debug;

use crate::{
    data::{
        models::column_map::ColumnOverrides,
        repositories::dataset_repository_impl::DatasetRepositoryImpl,
    },
    domain::{
        entities::dataset::Dataset,
        repositories::dataset_repository::{DatasetRepository, SheetFiles, SheetText},
    },
    errors::Error,
};

/// Loads the input collections from sheet exports in one shot. A failing
/// sheet fails the whole sync, so callers never swap in a half-loaded
/// dataset.
#[async_trait]
pub trait SyncUsecase: Send + Sync {
    fn from_strings(&self, sheets: &SheetText<'_>) -> Result<Dataset, Error>;

    async fn from_files(&self, sheets: &SheetFiles<'_>) -> Result<Dataset, Error>;
}

pub(crate) struct SyncUsecaseImpl<
    R = DatasetRepositoryImpl, // Default.
> where
    R: DatasetRepository,
{
    dataset_repository: R,
}

#[async_trait]
impl<R> SyncUsecase for SyncUsecaseImpl<R>
where
    R: DatasetRepository,
{
    fn from_strings(&self, sheets: &SheetText<'_>) -> Result<Dataset, Error> {
        let dataset = self.dataset_repository.from_strings(sheets)?;
        log_counts(&dataset);
        Ok(dataset)
    }

    async fn from_files(&self, sheets: &SheetFiles<'_>) -> Result<Dataset, Error> {
        let dataset = self.dataset_repository.from_files(sheets).await?;
        log_counts(&dataset);
        Ok(dataset)
    }
}

impl SyncUsecaseImpl {
    pub(crate) fn new() -> Self {
        SyncUsecaseImpl {
            dataset_repository: DatasetRepositoryImpl::new(),
        }
    }

    pub(crate) fn with_overrides(overrides: ColumnOverrides) -> Self {
        SyncUsecaseImpl {
            dataset_repository: DatasetRepositoryImpl::with_overrides(overrides),
        }
    }
}

fn log_counts(dataset: &Dataset) {
    debug!(
        partners = dataset.partners.len(),
        companies = dataset.companies.len(),
        subscriptions = dataset.subscriptions.len(),
        plans = dataset.plans.len(),
        liquidations = dataset.liquidations.len(),
        goals = dataset.goals.len(),
        "dataset synced"
    );
}
