//! Store traits consumed by the transaction engine
//!
//! The engine never talks to a database directly. Every read and the single
//! write of a new transaction go through these traits, so the same decision
//! logic runs against the in-memory stores of this crate or any persistent
//! implementation. All methods take `&self`; implementations provide their
//! own synchronization so a single engine can be shared across threads.

use crate::core::search::TransactionFilter;
use crate::types::{
    FinancialAsset, FinancialTransaction, Page, PageRequest, PaymentError, StatusRecord,
    TransactionSpecialization, TypeRecord,
};

/// Read access to ledger endpoints
pub trait AssetStore: Send + Sync {
    /// Get an asset by id
    fn find_by_id(&self, id: &str) -> Option<FinancialAsset>;

    /// Get the pooled system accounts able to cover an amount
    ///
    /// Returns the active assets of `asset_type` whose balance is
    /// non-negative with more than `min_dollars` whole dollars.
    fn find_pooled_candidates(&self, asset_type: &str, min_dollars: i64) -> Vec<FinancialAsset>;
}

/// Read access to transaction status records
pub trait StatusStore: Send + Sync {
    fn find_by_name(&self, name: &str) -> Option<StatusRecord>;

    fn find_by_code(&self, code: u8) -> Option<StatusRecord>;
}

/// Read access to transaction type records
pub trait TypeStore: Send + Sync {
    fn find_by_name(&self, name: &str) -> Option<TypeRecord>;
}

/// Persistence of transactions
pub trait TransactionStore: Send + Sync {
    /// Insert or replace a transaction, returning the stored record
    fn save(&self, transaction: FinancialTransaction) -> Result<FinancialTransaction, PaymentError>;

    /// Get a transaction by id
    fn find_by_id(&self, id: &str) -> Option<FinancialTransaction>;

    /// Get one page of the transactions matching a history filter
    fn find_page(
        &self,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<Page<FinancialTransaction>, PaymentError>;

    /// Get one page of all transactions, optionally restricted to one ledger
    fn find_all(
        &self,
        specialization: Option<TransactionSpecialization>,
        page: PageRequest,
    ) -> Result<Page<FinancialTransaction>, PaymentError>;
}
