use std::path::Path;

use async_trait::async_trait;

use crate::{domain::entities::dataset::Dataset, errors::Error};

/// Raw sheet exports, one CSV text per collection.
#[derive(Debug, Clone, Copy)]
pub struct SheetText<'a> {
    pub partners: &'a str,
    pub companies: &'a str,
    pub subscriptions: &'a str,
    pub liquidations: &'a str,
    pub plans: &'a str,
    pub goals: &'a str,
}

/// On-disk locations of the sheet exports.
#[derive(Debug, Clone, Copy)]
pub struct SheetFiles<'a> {
    pub partners: &'a Path,
    pub companies: &'a Path,
    pub subscriptions: &'a Path,
    pub liquidations: &'a Path,
    pub plans: &'a Path,
    pub goals: &'a Path,
}

/// Loads a complete [`Dataset`] from sheet exports. Either every collection
/// parses and a full dataset comes back, or an error does — there is no
/// partially loaded result for a caller to accidentally apply.
#[async_trait]
pub trait DatasetRepository: Send + Sync {
    fn from_strings(&self, sheets: &SheetText<'_>) -> Result<Dataset, Error>;

    async fn from_files(&self, sheets: &SheetFiles<'_>) -> Result<Dataset, Error>;
}
