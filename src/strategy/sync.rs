//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. Requests
//! are streamed from the `SyncReader` one at a time, created on the engine,
//! and their result rows written immediately, so memory use does not grow
//! with the input file.

use crate::core::{InMemoryEngine, ProcessingResult};
use crate::io::csv_format::ResultWriter;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use transaction_engine::core::{EngineConfig, InMemoryAssetStore, InMemoryEngine};
/// use transaction_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let engine = Arc::new(InMemoryEngine::in_memory(InMemoryAssetStore::new(), EngineConfig::default()));
/// let mut output = std::io::stdout();
///
/// SyncProcessingStrategy
///     .process(&engine, Path::new("requests.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        engine: &Arc<InMemoryEngine>,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let reader = SyncReader::new(input_path)?;
        let mut writer = ResultWriter::new(output)?;

        for row in reader {
            match row {
                Ok(numbered) => {
                    let result = ProcessingResult::process(&**engine, numbered);
                    writer.write(&result)?;
                }
                Err(e) => warn!(error = %e, "skipping request"),
            }
        }

        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineConfig, InMemoryAssetStore};
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
        let assets = InMemoryAssetStore::from_assets(["a", "b"].map(|id| FinancialAsset {
            id: id.to_string(),
            owner: "u1".to_string(),
            active: true,
            balance: CurrencyValue::new(100, 0, false).unwrap(),
            asset_type: "1".to_string(),
        }));
        Arc::new(InMemoryEngine::in_memory(assets, EngineConfig::default()))
    }

    #[test]
    fn test_sync_strategy_writes_one_row_per_valid_request() {
        let file = create_temp_csv(
            "specialization,amount,source,target,status,type,notes\n\
             ACCOUNT,10,a,b,Pending,Payment,first\n\
             ACCOUNT,oops,a,b,Pending,Payment,\n\
             ACCOUNT,10,a,zzz,Pending,Payment,\n",
        );
        let engine = engine();
        let mut output = Vec::new();

        SyncProcessingStrategy
            .process(&engine, file.path(), &mut output)
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "request,specialization,amount,source,target,status,notes\n\
             1,ACCOUNT,10.00,a,b,Approved,first\n\
             3,ACCOUNT,10.00,a,zzz,Failed,Asset 'zzz' could not be resolved\n"
        );
        assert_eq!(engine.transactions().len(), 1);
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let mut output = Vec::new();
        let result = SyncProcessingStrategy.process(&engine(), Path::new("nonexistent.csv"), &mut output);
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
