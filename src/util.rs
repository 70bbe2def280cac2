use chrono::{Local, NaiveDate};
use iso_currency::Currency;

use crate::{
    data::{models::column_map::ColumnOverrides, repositories::payout_store::PayoutStore},
    domain::{
        entities::{
            dataset::Dataset,
            liquidation::Liquidation,
            partner::{Partner, PartnerId},
            payable_item::PayableItem,
            payout_record::{PayoutId, PayoutRecord},
        },
        logic::{
            ledger_generator::{generate_statement, StatementInputs},
            payout_builder::PayoutBuilder,
        },
        repositories::dataset_repository::{SheetFiles, SheetText},
        usecases::sync_usecase::{SyncUsecase as _, SyncUsecaseImpl},
    },
    errors::Error,
    presentation::statement_printer::StatementPrinter,
};

/// One-stop entry point for a dashboard or report frontend: owns the current
/// dataset and the payout log, and wires the sync, statement, registration
/// and printing pieces together.
pub struct CommissionBoardUtil {
    sync_usecase: SyncUsecaseImpl,
    printer: StatementPrinter,
    dataset: Dataset,
    payouts: PayoutStore,
}

impl CommissionBoardUtil {
    pub fn new() -> Self {
        Self {
            sync_usecase: SyncUsecaseImpl::new(),
            printer: StatementPrinter::new(Currency::EUR),
            dataset: Dataset::default(),
            payouts: PayoutStore::new(),
        }
    }

    pub fn with_options(overrides: ColumnOverrides, currency: Currency) -> Self {
        Self {
            sync_usecase: SyncUsecaseImpl::with_overrides(overrides),
            printer: StatementPrinter::new(currency),
            dataset: Dataset::default(),
            payouts: PayoutStore::new(),
        }
    }

    /// Replace the input collections from fresh sheet exports. On failure
    /// the previously loaded collections stay untouched.
    pub fn sync_from_strings(&mut self, sheets: &SheetText<'_>) -> Result<(), Error> {
        self.dataset = self.sync_usecase.from_strings(sheets)?;
        Ok(())
    }

    pub async fn sync_from_files(&mut self, sheets: &SheetFiles<'_>) -> Result<(), Error> {
        self.dataset = self.sync_usecase.from_files(sheets).await?;
        Ok(())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn payout_history(&self) -> &[PayoutRecord] {
        self.payouts.payouts()
    }

    /// The full payable statement, optionally scoped to one partner.
    pub fn statement(&self, scope: Option<&PartnerId>) -> Vec<PayableItem> {
        self.statement_at(scope, today())
    }

    /// Same, with an explicit evaluation clock for reproducible runs.
    pub fn statement_at(&self, scope: Option<&PartnerId>, today: NaiveDate) -> Vec<PayableItem> {
        let liquidations = self.all_liquidations();
        let inputs = StatementInputs {
            subscriptions: &self.dataset.subscriptions,
            liquidations: &liquidations,
            partners: &self.dataset.partners,
            plans: &self.dataset.plans,
            companies: &self.dataset.companies,
        };
        generate_statement(&inputs, scope, today)
    }

    /// Register the selected statement lines as paid: mints one liquidation
    /// per covered period plus a pending payout record, all or nothing.
    pub fn register_payout(&mut self, selection: &[String]) -> Result<PayoutRecord, Error> {
        self.register_payout_at(selection, today())
    }

    pub fn register_payout_at(
        &mut self,
        selection: &[String],
        today: NaiveDate,
    ) -> Result<PayoutRecord, Error> {
        let ledger = self.statement_at(None, today);
        let (liquidations, record) =
            PayoutBuilder::new(selection, &ledger, &self.dataset.partners).build(today)?;
        self.payouts.register(liquidations, record.clone())?;
        Ok(record)
    }

    pub fn set_payment_date(
        &mut self,
        id: &PayoutId,
        date: Option<NaiveDate>,
    ) -> Result<PayoutRecord, Error> {
        self.payouts.set_payment_date(id, date)
    }

    pub fn print_payout(&self, record: &PayoutRecord) -> String {
        self.printer.print_payout(record)
    }

    pub fn print_selection(&self, partner: &Partner, items: &[PayableItem]) -> String {
        self.printer.print_selection(partner, items)
    }

    pub async fn save_payout_snapshot(&self, path: impl AsRef<std::path::Path> + Send) -> Result<(), Error> {
        self.payouts.save_snapshot(path).await
    }

    pub async fn load_payout_snapshot(
        &mut self,
        path: impl AsRef<std::path::Path> + Send,
    ) -> Result<(), Error> {
        self.payouts = PayoutStore::load_snapshot(path).await?;
        Ok(())
    }

    /// Registered liquidations merged over the imported ones; both suppress
    /// re-billing on the next statement run.
    fn all_liquidations(&self) -> Vec<Liquidation> {
        self.dataset
            .liquidations
            .iter()
            .chain(self.payouts.liquidations())
            .cloned()
            .collect()
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
