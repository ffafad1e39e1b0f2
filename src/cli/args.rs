use crate::core::{EngineConfig, ReferencePolicy};
use crate::strategy::BatchConfig;
use crate::types::{PageRequest, DEFAULT_PAGE_SIZE, DEFAULT_POOLED_ASSET_TYPE};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Create account, card, and loan transactions from a request file
#[derive(Parser, Debug)]
#[command(name = "transaction-engine")]
#[command(about = "Create account, card, and loan transactions from a request file", long_about = None)]
pub struct CliArgs {
    /// Request CSV file path
    #[arg(value_name = "REQUESTS", help = "Path to the request CSV file")]
    pub input_file: PathBuf,

    /// Asset ledger CSV file path
    #[arg(
        long = "assets",
        value_name = "ASSETS",
        help = "Path to the asset ledger CSV file (id,owner,active,balance,asset_type)"
    )]
    pub assets_file: PathBuf,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of requests per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of requests per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent requests (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Worker threads and requests in flight (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Account type id of the pooled system accounts
    #[arg(
        long = "pool-type",
        value_name = "TYPE",
        default_value = DEFAULT_POOLED_ASSET_TYPE,
        help = "Asset type id of the pooled system accounts"
    )]
    pub pool_type: String,

    /// Handling of unknown status and type names
    #[arg(
        long = "reference-policy",
        value_name = "POLICY",
        default_value = "strict",
        help = "'strict' rejects unknown status/type names, 'lenient' logs and continues"
    )]
    pub reference_policy: ReferencePolicyArg,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level or filter directive (logs go to stderr)"
    )]
    pub log_level: String,

    /// Print this asset's history instead of the per-request results
    #[arg(long = "history", value_name = "ASSET_ID")]
    pub history: Option<String>,

    /// History search: an amount, a YYYY-MM-DD date, or text
    #[arg(long = "search", value_name = "TEXT", requires = "history")]
    pub search: Option<String>,

    /// History page number, starting at 0
    #[arg(long = "page", value_name = "N", default_value_t = 0)]
    pub page: usize,

    /// History page size
    #[arg(long = "page-size", value_name = "N", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

/// Available strategies for processing request files
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Command-line spelling of [`ReferencePolicy`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReferencePolicyArg {
    Strict,
    Lenient,
}

impl From<ReferencePolicyArg> for ReferencePolicy {
    fn from(arg: ReferencePolicyArg) -> Self {
        match arg {
            ReferencePolicyArg::Strict => ReferencePolicy::Strict,
            ReferencePolicyArg::Lenient => ReferencePolicy::Lenient,
        }
    }
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values take the defaults; zero values fall back to the
    /// defaults with a logged warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            pooled_asset_type: self.pool_type.clone(),
            reference_policy: self.reference_policy.into(),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}
