//! Processing strategy module for request files
//!
//! This module defines the Strategy pattern for complete processing
//! pipelines, covering both CSV parsing and engine processing. This allows
//! different processing implementations (synchronous, asynchronous batch) to
//! be selected at runtime.

use crate::cli::StrategyType;
use crate::core::InMemoryEngine;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete request pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Process a request file and write one result row per request
    ///
    /// # Arguments
    ///
    /// * `engine` - Engine the requests are created on; shared so the caller
    ///   can query it afterwards
    /// * `input_path` - Path to the request CSV file
    /// * `output` - Writer for the result CSV
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - Output cannot be written
    ///
    /// Malformed rows and failed requests are logged and never abort the run.
    fn process(
        &self,
        engine: &Arc<InMemoryEngine>,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
