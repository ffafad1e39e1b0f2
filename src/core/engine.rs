//! Transaction processing engine
//!
//! This module provides the `TransactionEngine`, which creates transactions by
//! coordinating the asset resolver, the balance rules, and the status
//! resolver, then persisting the result through the transaction store. It
//! also serves updates, history search, listings, and health checks.
//!
//! The creation path enforces:
//! - The request must target the ledger it is submitted to
//! - Every endpoint and reference name must resolve (subject to the
//!   configured [`ReferencePolicy`])
//! - A transaction is saved once, already in its terminal status
//!
//! Balances are read, never written. Applying an approved transaction to the
//! ledger is left to whoever consumes the stored records.

use crate::core::asset_resolver::AssetResolver;
use crate::core::asset_store::InMemoryAssetStore;
use crate::core::balance_rules::BalanceRuleEngine;
use crate::core::config::{EngineConfig, ReferencePolicy};
use crate::core::reference_store::InMemoryReferenceStore;
use crate::core::search::{SearchCriteria, TransactionFilter};
use crate::core::status_resolver::StatusResolver;
use crate::core::traits::{AssetStore, StatusStore, TransactionStore, TypeStore};
use crate::core::transaction_store::InMemoryTransactionStore;
use crate::types::{
    FinancialTransaction, NewTransactionRequest, Page, PageRequest, PaymentError, ReferenceKind,
    StatusRecord, TransactionSpecialization, TransactionStatus, TransactionView, TypeRecord,
};
use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Engine over the in-memory stores shipped with this crate
pub type InMemoryEngine =
    TransactionEngine<InMemoryAssetStore, InMemoryReferenceStore, InMemoryTransactionStore>;

/// Result of [`TransactionEngine::check_health`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    /// A ledger could not be read; carries the failure message
    Unhealthy(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

/// Transaction processing engine
///
/// Generic over its stores so the same decision logic runs against any
/// persistence. `R` serves both status and type records.
pub struct TransactionEngine<A, R, T>
where
    A: AssetStore,
    R: StatusStore + TypeStore,
    T: TransactionStore,
{
    assets: A,
    references: R,
    transactions: T,
    config: EngineConfig,
}

impl InMemoryEngine {
    /// Create an engine over a loaded asset ledger, the default reference
    /// records, and an empty transaction store
    pub fn in_memory(assets: InMemoryAssetStore, config: EngineConfig) -> Self {
        Self::with_config(
            assets,
            InMemoryReferenceStore::with_defaults(),
            InMemoryTransactionStore::new(),
            config,
        )
    }
}

impl<A, R, T> TransactionEngine<A, R, T>
where
    A: AssetStore,
    R: StatusStore + TypeStore,
    T: TransactionStore,
{
    /// Create an engine with the default configuration
    pub fn new(assets: A, references: R, transactions: T) -> Self {
        Self::with_config(assets, references, transactions, EngineConfig::default())
    }

    pub fn with_config(assets: A, references: R, transactions: T, config: EngineConfig) -> Self {
        TransactionEngine {
            assets,
            references,
            transactions,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn assets(&self) -> &A {
        &self.assets
    }

    pub fn transactions(&self) -> &T {
        &self.transactions
    }

    /// Create a transaction on the ledger named by the request itself
    pub fn create(&self, request: NewTransactionRequest) -> Result<TransactionView, PaymentError> {
        let ledger = request.specialization;
        self.create_on(ledger, request)
    }

    /// Create a transaction on a specific ledger
    ///
    /// # Arguments
    ///
    /// * `ledger` - The ledger the caller is creating on
    /// * `request` - The proposed transaction
    ///
    /// # Returns
    ///
    /// The stored transaction, approved or declined
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request's specialization is not `ledger` (nothing is written)
    /// - An endpoint cannot be resolved
    /// - A status or type name is unknown under the strict policy
    /// - The transaction store fails (`CreationFailed`)
    pub fn create_on(
        &self,
        ledger: TransactionSpecialization,
        request: NewTransactionRequest,
    ) -> Result<TransactionView, PaymentError> {
        if request.specialization != ledger {
            warn!(%ledger, actual = %request.specialization, "request submitted to the wrong ledger");
            return Err(PaymentError::incorrect_specialization(
                ledger,
                request.specialization,
            ));
        }

        debug!(%ledger, "creating transaction");

        let NewTransactionRequest {
            amount,
            source,
            target,
            status_name,
            type_name,
            notes,
            ..
        } = request;

        // Pool tokens only mean something on the account ledger
        let (source, target) = if ledger.honours_system_pool() {
            (source, target)
        } else {
            (source.into_explicit(), target.into_explicit())
        };

        let requested_dollars = amount.whole_dollars();
        let resolver = AssetResolver::new(&self.assets, &self.config.pooled_asset_type);
        let source = resolver.resolve(&source, requested_dollars)?;
        let target = resolver.resolve(&target, requested_dollars)?;

        // The requested status is validated but the engine decides the outcome
        self.bind_status(&status_name)?;
        let transaction_type = self.bind_type(&type_name)?;

        let mut transaction = FinancialTransaction {
            id: Uuid::new_v4().to_string(),
            specialization: ledger,
            amount,
            status: TransactionStatus::Pending,
            status_name: TransactionStatus::Pending.name().to_string(),
            source,
            target,
            transaction_type,
            notes,
            status_time: now(),
        };

        let decision = BalanceRuleEngine::evaluate(
            &transaction.source,
            &transaction.target,
            &transaction.amount,
            transaction.transaction_type.as_ref(),
        );
        let resolution = StatusResolver::new(&self.references).resolve(&decision);

        transaction.status = resolution.status;
        transaction.status_name = resolution.status_name;
        if let Some(note) = resolution.note {
            transaction.notes = Some(note);
        }

        let saved = self
            .transactions
            .save(transaction)
            .map_err(|e| PaymentError::creation_failed(e.to_string()))?;

        info!(id = %saved.id, %ledger, status = %saved.status_name, "transaction created");
        Ok(saved.to_view())
    }

    /// Get a transaction by id
    pub fn find_transaction(&self, id: &str) -> Result<TransactionView, PaymentError> {
        self.transactions
            .find_by_id(id)
            .map(|tx| tx.to_view())
            .ok_or_else(|| PaymentError::transaction_not_found(id))
    }

    /// Set a transaction's status and notes
    ///
    /// The status is looked up by name and the status time is reset to now.
    /// Balances are not re-evaluated.
    ///
    /// # Errors
    ///
    /// - `TransactionNotFound` for an unknown id
    /// - `ReferenceNotFound` for an unknown status name
    pub fn update_transaction(
        &self,
        id: &str,
        status_name: &str,
        notes: Option<String>,
    ) -> Result<TransactionView, PaymentError> {
        let mut transaction = self
            .transactions
            .find_by_id(id)
            .ok_or_else(|| PaymentError::transaction_not_found(id))?;

        let record = StatusStore::find_by_name(&self.references, status_name)
            .ok_or_else(|| PaymentError::reference_not_found(ReferenceKind::Status, status_name))?;
        let status = TransactionStatus::from_code(record.code)
            .ok_or_else(|| PaymentError::reference_not_found(ReferenceKind::Status, status_name))?;

        transaction.status = status;
        transaction.status_name = record.name;
        transaction.notes = notes;
        transaction.status_time = now();

        let saved = self.transactions.save(transaction)?;
        info!(id = %saved.id, status = %saved.status_name, "transaction updated");
        Ok(saved.to_view())
    }

    /// Page through the history of one asset, filtered by free-text input
    ///
    /// See [`SearchCriteria::classify`] for how the input is interpreted.
    pub fn search_transactions(
        &self,
        asset_id: &str,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<TransactionView>, PaymentError> {
        let criteria = SearchCriteria::classify(search);
        debug!(asset = %asset_id, kind = criteria.kind(), "searching transactions");

        let filter = TransactionFilter::new(asset_id, criteria);
        let found = self.transactions.find_page(&filter, page)?;
        Ok(found.map(|tx| tx.to_view()))
    }

    /// Page through all transactions, or those of one ledger
    pub fn list_transactions(
        &self,
        specialization: Option<TransactionSpecialization>,
        page: PageRequest,
    ) -> Result<Page<TransactionView>, PaymentError> {
        let found = self.transactions.find_all(specialization, page)?;
        Ok(found.map(|tx| tx.to_view()))
    }

    /// Probe every ledger with a one-item listing
    pub fn check_health(&self) -> HealthStatus {
        for ledger in TransactionSpecialization::ALL {
            if let Err(e) = self.transactions.find_all(Some(ledger), PageRequest::new(0, 1)) {
                warn!(%ledger, error = %e, "health probe failed");
                return HealthStatus::Unhealthy(e.to_string());
            }
        }
        HealthStatus::Healthy
    }

    fn bind_status(&self, name: &str) -> Result<Option<StatusRecord>, PaymentError> {
        let found = StatusStore::find_by_name(&self.references, name);
        self.apply_policy(ReferenceKind::Status, name, found)
    }

    fn bind_type(&self, name: &str) -> Result<Option<TypeRecord>, PaymentError> {
        let found = TypeStore::find_by_name(&self.references, name);
        self.apply_policy(ReferenceKind::Type, name, found)
    }

    fn apply_policy<V>(
        &self,
        kind: ReferenceKind,
        name: &str,
        found: Option<V>,
    ) -> Result<Option<V>, PaymentError> {
        match (found, self.config.reference_policy) {
            (Some(record), _) => Ok(Some(record)),
            (None, ReferencePolicy::Strict) => Err(PaymentError::reference_not_found(kind, name)),
            (None, ReferencePolicy::Lenient) => {
                warn!(%kind, reference = name, "reference record not found, continuing without it");
                Ok(None)
            }
        }
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
