//! Concurrent batch processing for the async strategy
//!
//! This module provides the `BatchProcessor` struct, which runs every request
//! of a batch through a shared engine concurrently and hands the results back
//! in request order.
//!
//! # Design
//!
//! Creation never writes balances, so requests of a batch are independent of
//! each other and need no partitioning. Each request runs on its own tokio
//! task; at most `max_concurrent` tasks are in flight at once.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     ├── Arc<InMemoryEngine>  (shared, &self-only engine)
//!     └── max_concurrent       (in-flight task limit)
//! ```

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, error};

use crate::core::engine::{InMemoryEngine, TransactionEngine};
use crate::core::traits::{AssetStore, StatusStore, TransactionStore, TypeStore};
use crate::types::{NewTransactionRequest, NumberedRequest, PaymentError, TransactionView};

/// Result of processing a single request
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// 1-based position of the request in the input
    pub number: u64,

    /// The request as read
    pub request: NewTransactionRequest,

    /// The created transaction, or why creation failed
    pub outcome: Result<TransactionView, PaymentError>,
}

impl ProcessingResult {
    /// Run one request through an engine
    ///
    /// Failures are logged and kept in the result; they never abort a run.
    pub fn process<A, R, T>(engine: &TransactionEngine<A, R, T>, numbered: NumberedRequest) -> Self
    where
        A: AssetStore,
        R: StatusStore + TypeStore,
        T: TransactionStore,
    {
        let NumberedRequest { number, request } = numbered;
        let outcome = engine.create(request.clone());

        if let Err(e) = &outcome {
            debug!(request = number, error = %e, "request failed");
        }

        Self {
            number,
            request,
            outcome,
        }
    }
}

/// Batch processor over a shared engine
#[derive(Clone)]
pub struct BatchProcessor {
    engine: Arc<InMemoryEngine>,
    max_concurrent: usize,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// # Arguments
    ///
    /// * `engine` - Arc-wrapped engine shared by all tasks
    /// * `max_concurrent` - Maximum requests in flight; zero is treated as one
    pub fn new(engine: Arc<InMemoryEngine>, max_concurrent: usize) -> Self {
        Self {
            engine,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Process a batch concurrently
    ///
    /// # Returns
    ///
    /// One result per request, sorted by request number. A request whose task
    /// panicked is logged and has no result.
    pub async fn process_batch(&self, batch: Vec<NumberedRequest>) -> Vec<ProcessingResult> {
        let mut results: Vec<ProcessingResult> = stream::iter(batch)
            .map(|numbered| {
                let engine = Arc::clone(&self.engine);
                tokio::spawn(async move { ProcessingResult::process(&*engine, numbered) })
            })
            .buffer_unordered(self.max_concurrent)
            .filter_map(|joined| async move {
                match joined {
                    Ok(result) => Some(result),
                    Err(e) => {
                        error!(error = %e, "request task failed");
                        None
                    }
                }
            })
            .collect()
            .await;

        results.sort_by_key(|result| result.number);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset_store::InMemoryAssetStore;
    use crate::core::config::EngineConfig;
    use crate::types::{
        AssetToken, CurrencyValue, FinancialAsset, TransactionSpecialization, TransactionStatus,
    };

    fn engine() -> Arc<InMemoryEngine> {
        let assets = InMemoryAssetStore::from_assets(vec![
            FinancialAsset {
                id: "checking".to_string(),
                owner: "u1".to_string(),
                active: true,
                balance: CurrencyValue::new(100, 0, false).unwrap(),
                asset_type: "1".to_string(),
            },
            FinancialAsset {
                id: "savings".to_string(),
                owner: "u1".to_string(),
                active: true,
                balance: CurrencyValue::new(100, 0, false).unwrap(),
                asset_type: "1".to_string(),
            },
        ]);
        Arc::new(InMemoryEngine::in_memory(assets, EngineConfig::default()))
    }

    fn numbered(number: u64, dollars: i64, target: &str) -> NumberedRequest {
        NumberedRequest {
            number,
            request: NewTransactionRequest {
                specialization: TransactionSpecialization::Account,
                amount: CurrencyValue::new(dollars, 0, false).unwrap(),
                source: AssetToken::source("checking"),
                target: AssetToken::target(target),
                status_name: "Pending".to_string(),
                type_name: "Transfer".to_string(),
                notes: None,
            },
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_results_come_back_in_request_order() {
        let processor = BatchProcessor::new(engine(), 4);
        let batch: Vec<_> = (1..=50).map(|n| numbered(n, 10, "savings")).collect();

        let results = processor.process_batch(batch).await;

        let numbers: Vec<u64> = results.iter().map(|r| r.number).collect();
        assert_eq!(numbers, (1..=50).collect::<Vec<_>>());
        assert!(results.iter().all(|r| r.outcome.is_ok()));
    }

    #[tokio::test]
    async fn test_failures_are_kept_per_request() {
        let engine = engine();
        let processor = BatchProcessor::new(Arc::clone(&engine), 2);

        let results = processor
            .process_batch(vec![
                numbered(1, 10, "savings"),
                numbered(2, 10, "nowhere"),
                numbered(3, 500, "savings"),
            ])
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].outcome.as_ref().unwrap().status(),
            Some(TransactionStatus::Approved)
        );
        assert_eq!(
            results[1].outcome.as_ref().unwrap_err(),
            &PaymentError::asset_resolution_failure("nowhere")
        );
        assert_eq!(
            results[2].outcome.as_ref().unwrap().status(),
            Some(TransactionStatus::Declined)
        );
        assert_eq!(engine.transactions().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let processor = BatchProcessor::new(engine(), 0);
        assert!(processor.process_batch(Vec::new()).await.is_empty());
    }
}
