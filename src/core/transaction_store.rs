//! Thread-safe in-memory transaction storage
//!
//! This module provides the `InMemoryTransactionStore`, which keeps every
//! created transaction keyed by id using `DashMap`, so a single engine can be
//! shared across the async batch strategy's tasks.
//!
//! # Ordering
//!
//! Listings and history pages are ordered by status time, then by id, which
//! keeps paging stable across calls.

use crate::core::search::TransactionFilter;
use crate::core::traits::TransactionStore;
use crate::types::{
    FinancialTransaction, Page, PageRequest, PaymentError, TransactionId,
    TransactionSpecialization,
};
use dashmap::DashMap;

/// Thread-safe in-memory implementation of [`TransactionStore`]
///
/// Concurrent reads and writes of different transactions do not block each
/// other; operations on the same id are serialized by the map's shard locks.
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    /// Concurrent map of transaction id to transaction
    transactions: DashMap<TransactionId, FinancialTransaction>,
}

impl InMemoryTransactionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            transactions: DashMap::new(),
        }
    }

    /// Number of stored transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Collect the transactions accepted by `keep`, in listing order
    fn collect_ordered<F>(&self, keep: F) -> Vec<FinancialTransaction>
    where
        F: Fn(&FinancialTransaction) -> bool,
    {
        let mut matching: Vec<FinancialTransaction> = self
            .transactions
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        matching.sort_by(|a, b| {
            a.status_time
                .cmp(&b.status_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        matching
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn save(&self, transaction: FinancialTransaction) -> Result<FinancialTransaction, PaymentError> {
        self.transactions
            .insert(transaction.id.clone(), transaction.clone());
        Ok(transaction)
    }

    fn find_by_id(&self, id: &str) -> Option<FinancialTransaction> {
        // Clone to avoid holding the shard lock
        self.transactions.get(id).map(|entry| entry.value().clone())
    }

    fn find_page(
        &self,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<Page<FinancialTransaction>, PaymentError> {
        let matching = self.collect_ordered(|tx| filter.matches(tx));
        Ok(Page::from_ordered(matching, page))
    }

    fn find_all(
        &self,
        specialization: Option<TransactionSpecialization>,
        page: PageRequest,
    ) -> Result<Page<FinancialTransaction>, PaymentError> {
        let matching = self.collect_ordered(|tx| {
            specialization.map_or(true, |wanted| tx.specialization == wanted)
        });
        Ok(Page::from_ordered(matching, page))
    }
}
