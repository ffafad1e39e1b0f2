//! Asynchronous batch processing strategy
//!
//! Multi-threaded implementation of the ProcessingStrategy trait. Requests
//! are read in batches and every request of a batch is created concurrently
//! on a tokio multi-threaded runtime.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── BatchProcessor (concurrent creation, results in request order)
//!         └── Arc<InMemoryEngine>
//! ```
//!
//! # Ordering
//!
//! Batches are processed one after another and each batch's results are
//! sorted by request number before they are written, so the output is in
//! request order, identical to the sync strategy's.

use crate::core::{BatchProcessor, InMemoryEngine};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::ResultWriter;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration for batch processing
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of requests per batch
    pub batch_size: usize,
    /// Worker threads, and the limit on requests in flight
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig; zero values fall back to the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid max_concurrent_batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process a request file in concurrent batches
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Reads requests in batches using AsyncReader
    /// 3. Creates each batch's requests concurrently via BatchProcessor
    /// 4. Writes each batch's results before reading the next batch
    fn process(
        &self,
        engine: &Arc<InMemoryEngine>,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let processor =
                BatchProcessor::new(Arc::clone(engine), self.config.max_concurrent_batches);

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads futures::io, tokio files need the compat layer
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);
            let mut writer = ResultWriter::new(output)?;

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                debug!(size = batch.len(), "processing batch");
                let results = processor.process_batch(batch).await;
                writer.write_all(&results)?;
            }

            writer.finish()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineConfig, InMemoryAssetStore};
    use crate::strategy::SyncProcessingStrategy;
    use crate::types::{CurrencyValue, FinancialAsset};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn engine() -> Arc<InMemoryEngine> {
        let assets = InMemoryAssetStore::from_assets([("a", 100), ("b", 50), ("pool", 900)].map(
            |(id, dollars)| FinancialAsset {
                id: id.to_string(),
                owner: "u1".to_string(),
                active: true,
                balance: CurrencyValue::new(dollars, 0, false).unwrap(),
                asset_type: if id == "pool" { "3" } else { "1" }.to_string(),
            },
        ));
        Arc::new(InMemoryEngine::in_memory(assets, EngineConfig::default()))
    }

    fn requests() -> String {
        let mut content = String::from("specialization,amount,source,target,status,type,notes\n");
        for n in 0..25 {
            let row = match n % 5 {
                0 => "ACCOUNT,10,a,b,Pending,Payment,rent\n",
                1 => "ACCOUNT,75,a,b,Pending,Payment,\n",
                2 => "ACCOUNT,20,Deposit,a,Pending,Deposit,\n",
                3 => "CARD,1,a,b,Pending,Refund,\n",
                _ => "LOAN,not-money,a,b,Pending,Payment,\n",
            };
            content.push_str(row);
        }
        content
    }

    #[test]
    fn test_async_strategy_matches_sync_output_across_batches() {
        let file = create_temp_csv(&requests());

        let mut sync_output = Vec::new();
        SyncProcessingStrategy
            .process(&engine(), file.path(), &mut sync_output)
            .unwrap();

        // Small batches force several rounds
        let strategy = AsyncProcessingStrategy::new(BatchConfig::new(3, 4));
        let mut async_output = Vec::new();
        strategy
            .process(&engine(), file.path(), &mut async_output)
            .unwrap();

        let sync_output = String::from_utf8(sync_output).unwrap();
        assert_eq!(String::from_utf8(async_output).unwrap(), sync_output);
        // header + 20 valid requests
        assert_eq!(sync_output.lines().count(), 21);
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy = AsyncProcessingStrategy::new(BatchConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(&engine(), Path::new("nonexistent.csv"), &mut output);
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_batch_config_zero_values_fall_back() {
        let config = BatchConfig::new(0, 0);
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.max_concurrent_batches, num_cpus::get());
    }
}
